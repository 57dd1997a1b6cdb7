use sea_orm::Condition;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the predicates of one search request are combined.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicMode {
    /// Every predicate must hold
    #[default]
    And,
    /// Any predicate may hold
    Or,
}

impl LogicMode {
    /// Empty accumulator for this mode: `Condition::all()` or `Condition::any()`.
    #[must_use]
    pub fn condition(self) -> Condition {
        match self {
            Self::And => Condition::all(),
            Self::Or => Condition::any(),
        }
    }

    /// The accumulated condition, or `Condition::all()` when nothing was added
    /// so an unfiltered `Or` request matches every row instead of none.
    #[must_use]
    pub fn finish(self, condition: Condition) -> Condition {
        if condition.is_empty() {
            Condition::all()
        } else {
            condition
        }
    }
}
