//! Runtime support for code generated by `crudcraft-codegen`.
//!
//! Generated search requests build a [`sea_orm::Condition`] through the
//! pieces in [`search`]: the operator taxonomy, the [`search::LogicMode`]
//! accumulator and the [`search::SearchPath`] navigation builder.

pub mod search;

pub use sea_orm;
pub use search::{FieldGroup, LogicMode, SearchOperator, SearchPath};
