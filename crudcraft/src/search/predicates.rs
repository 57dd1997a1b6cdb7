//! Single-predicate builders used by generated `to_condition` bodies.
//!
//! Comparisons sea-query supports directly (`is_in`, `gt`, `between`, ...) are
//! emitted inline by the generator; the helpers here cover pattern matching,
//! emptiness, cardinality and JSON / array containment, which need escaping or
//! backend operators. Operators use `PostgreSQL` syntax.

use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::Value;

/// Longest operand accepted for LIKE and regex matching.
pub const MAX_PATTERN_LENGTH: usize = 10_000;

/// Which end of the value a LIKE pattern is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeKind {
    Contains,
    StartsWith,
    EndsWith,
}

impl LikeKind {
    /// Rust variant name, as spelled in generated `LikeKind::Variant` paths.
    #[must_use]
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
        }
    }
}

/// Storage shape of a column, deciding what "empty" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Array column: empty when NULL or without elements
    Collection,
    /// Text column: empty when NULL or `''`
    Text,
    /// Anything else: empty when NULL
    Scalar,
}

/// Escape LIKE wildcards so user input only matches literally.
#[must_use]
pub fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn bounded(value: &str) -> &str {
    if value.len() <= MAX_PATTERN_LENGTH {
        return value;
    }
    tracing::warn!(
        length = value.len(),
        limit = MAX_PATTERN_LENGTH,
        "search operand truncated"
    );
    let mut end = MAX_PATTERN_LENGTH;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Build the LIKE pattern for `value`, wildcards escaped.
#[must_use]
pub fn like_pattern(kind: LikeKind, value: &str) -> String {
    let escaped = escape_like_wildcards(bounded(value));
    match kind {
        LikeKind::Contains => format!("%{escaped}%"),
        LikeKind::StartsWith => format!("{escaped}%"),
        LikeKind::EndsWith => format!("%{escaped}"),
    }
}

/// `column LIKE pattern ESCAPE '\'`.
#[must_use]
pub fn like(column: Expr, kind: LikeKind, value: impl ToString) -> SimpleExpr {
    let pattern = like_pattern(kind, &value.to_string());
    column.like(LikeExpr::new(pattern).escape('\\'))
}

/// `column ~ pattern`.
#[must_use]
pub fn regex(column: Expr, pattern: impl ToString) -> SimpleExpr {
    let pattern = bounded(&pattern.to_string()).to_string();
    Expr::cust_with_exprs("$1 ~ $2", [column.into(), Expr::val(pattern).into()])
}

/// Emptiness test for a column of the given kind.
#[must_use]
pub fn is_empty(column: Expr, kind: ValueKind) -> SimpleExpr {
    match kind {
        ValueKind::Collection => size_of(column).eq(0),
        ValueKind::Text => column.clone().is_null().or(column.eq("")),
        ValueKind::Scalar => column.is_null(),
    }
}

/// Negation of [`is_empty`].
#[must_use]
pub fn not_empty(column: Expr, kind: ValueKind) -> SimpleExpr {
    is_empty(column, kind).not()
}

/// Cardinality of an array column, NULL counted as zero.
#[must_use]
pub fn size_of(column: Expr) -> Expr {
    Expr::expr(Expr::cust_with_exprs(
        "COALESCE(cardinality($1), 0)",
        [column.into()],
    ))
}

/// `value = ANY(column)` for each value, joined with AND: the array column holds every value.
#[must_use]
pub fn contains_all<V, I>(column: Expr, values: I) -> SimpleExpr
where
    V: Into<Value>,
    I: IntoIterator<Item = V>,
{
    values
        .into_iter()
        .map(|value| {
            Expr::cust_with_exprs(
                "$1 = ANY($2)",
                [Expr::val(value).into(), column.clone().into()],
            )
        })
        .reduce(SimpleExpr::and)
        .unwrap_or_else(|| Expr::cust("TRUE"))
}

/// The JSON object column has the key (`jsonb_exists`, the function form of `?`).
#[must_use]
pub fn contains_key(column: Expr, key: impl ToString) -> SimpleExpr {
    Expr::cust_with_exprs(
        "jsonb_exists($1, $2)",
        [column.into(), Expr::val(key.to_string()).into()],
    )
}

/// The JSON object column has a member whose text value equals `value`.
#[must_use]
pub fn contains_value(column: Expr, value: impl ToString) -> SimpleExpr {
    Expr::cust_with_exprs(
        "EXISTS (SELECT 1 FROM jsonb_each_text($1) AS kv WHERE kv.value = $2)",
        [column.into(), Expr::val(value.to_string()).into()],
    )
}
