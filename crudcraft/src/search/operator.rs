//! Search operators and their field-shape taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Comparison operators a searchable property can be filtered with.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchOperator {
    /// Equality (`IN` over the supplied values)
    #[default]
    Equals,
    /// Inequality (`NOT IN` over the supplied values)
    NotEquals,
    /// Substring match
    Contains,
    /// Prefix match
    StartsWith,
    /// Suffix match
    EndsWith,
    /// Membership
    In,
    /// Non-membership
    NotIn,
    /// Regular expression match
    Regex,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// Half-open range `[start, end)`
    Range,
    /// Strictly before a value
    Before,
    /// Strictly after a value
    After,
    /// Inclusive range `[start, end]`
    Between,
    /// No value (NULL, empty text, empty collection)
    IsEmpty,
    /// Any value
    NotEmpty,
    /// Collection cardinality equal to
    SizeEquals,
    /// Collection cardinality greater than
    SizeGt,
    /// Collection cardinality less than
    SizeLt,
    /// Collection holds every supplied value
    ContainsAll,
    /// Map holds the supplied key
    ContainsKey,
    /// Map holds the supplied value
    ContainsValue,
}

/// Shape of the request fields an operator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldGroup {
    /// One multi-value container field named after the property
    Values,
    /// A `{property}_start` / `{property}_end` pair
    Range,
    /// One integer field holding a collection size
    Size,
}

impl SearchOperator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 24] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
        Self::In,
        Self::NotIn,
        Self::Regex,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Range,
        Self::Before,
        Self::After,
        Self::Between,
        Self::IsEmpty,
        Self::NotEmpty,
        Self::SizeEquals,
        Self::SizeGt,
        Self::SizeLt,
        Self::ContainsAll,
        Self::ContainsKey,
        Self::ContainsValue,
    ];

    /// Equality, membership, emptiness and substring style operators.
    #[must_use]
    pub const fn is_value_operator(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::NotEquals
                | Self::In
                | Self::NotIn
                | Self::IsEmpty
                | Self::NotEmpty
                | Self::StartsWith
                | Self::EndsWith
                | Self::Contains
        )
    }

    /// Ordering comparisons. `Range` is not a member even though it reads a start/end pair, see [`Self::field_group`].
    #[must_use]
    pub const fn is_range_operator(self) -> bool {
        matches!(
            self,
            Self::Gt | Self::Gte | Self::Lt | Self::Lte | Self::Between
        )
    }

    /// Collection cardinality comparisons.
    #[must_use]
    pub const fn is_size_operator(self) -> bool {
        matches!(self, Self::SizeEquals | Self::SizeGt | Self::SizeLt)
    }

    /// The request field group this operator reads its operands from.
    ///
    /// Operators outside the three families fall into the group matching their
    /// operand shape: `Range` reads a start/end pair, the remaining ones read
    /// the value container.
    #[must_use]
    pub const fn field_group(self) -> FieldGroup {
        if self.is_size_operator() {
            FieldGroup::Size
        } else if self.is_range_operator() || matches!(self, Self::Range) {
            FieldGroup::Range
        } else {
            FieldGroup::Values
        }
    }

    /// Whether the operator ignores operand values entirely.
    #[must_use]
    pub const fn is_operator_only(self) -> bool {
        matches!(self, Self::IsEmpty | Self::NotEmpty)
    }

    /// Wire name, as accepted in `{property}Op` query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::Contains => "CONTAINS",
            Self::StartsWith => "STARTS_WITH",
            Self::EndsWith => "ENDS_WITH",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::Regex => "REGEX",
            Self::Gt => "GT",
            Self::Gte => "GTE",
            Self::Lt => "LT",
            Self::Lte => "LTE",
            Self::Range => "RANGE",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::Between => "BETWEEN",
            Self::IsEmpty => "IS_EMPTY",
            Self::NotEmpty => "NOT_EMPTY",
            Self::SizeEquals => "SIZE_EQUALS",
            Self::SizeGt => "SIZE_GT",
            Self::SizeLt => "SIZE_LT",
            Self::ContainsAll => "CONTAINS_ALL",
            Self::ContainsKey => "CONTAINS_KEY",
            Self::ContainsValue => "CONTAINS_VALUE",
        }
    }

    /// Rust variant name, as spelled in generated `SearchOperator::Variant` paths.
    #[must_use]
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "NotEquals",
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
            Self::In => "In",
            Self::NotIn => "NotIn",
            Self::Regex => "Regex",
            Self::Gt => "Gt",
            Self::Gte => "Gte",
            Self::Lt => "Lt",
            Self::Lte => "Lte",
            Self::Range => "Range",
            Self::Before => "Before",
            Self::After => "After",
            Self::Between => "Between",
            Self::IsEmpty => "IsEmpty",
            Self::NotEmpty => "NotEmpty",
            Self::SizeEquals => "SizeEquals",
            Self::SizeGt => "SizeGt",
            Self::SizeLt => "SizeLt",
            Self::ContainsAll => "ContainsAll",
            Self::ContainsKey => "ContainsKey",
            Self::ContainsValue => "ContainsValue",
        }
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown operator name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search operator '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for SearchOperator {
    type Err = UnknownOperator;

    /// Accepts the wire name in any case, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}
