//! Errors raised while generating code for a model.
//!
//! Every variant is fatal for the model being generated: the generator never
//! emits partially-correct code. Unresolvable relationship targets during search
//! collection are not errors, they only stop recursion (see
//! [`crate::search::collector`]).

use crudcraft::SearchOperator;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// The model reader has no model under this name
    #[error("unknown model '{name}'")]
    UnknownModel { name: String },

    /// A descriptor breaks one of its structural invariants
    #[error("invalid descriptor for field '{model}.{field}': {reason}")]
    InvalidDescriptor {
        model: String,
        field: String,
        reason: String,
    },

    /// An operator is configured on a property but no generator is registered for it
    #[error("no predicate generator registered for operator {operator}")]
    MissingPredicateGenerator { operator: SearchOperator },

    /// A model needs an `id` field for the requested output
    #[error("model '{model}' has no 'id' field, required for {purpose}")]
    MissingIdentity { model: String, purpose: String },

    /// A type string could not be parsed as a Rust type
    #[error("invalid type '{source_text}': {message}")]
    InvalidType {
        source_text: String,
        message: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generated tokens are not a valid Rust file
    #[error("failed to render generated code for '{model}': {message}")]
    Render { model: String, message: String },
}

pub type Result<T, E = CodegenError> = std::result::Result<T, E>;

impl CodegenError {
    pub(crate) fn invalid_descriptor(
        model: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDescriptor {
            model: model.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_type(source_text: impl Into<String>, error: &syn::Error) -> Self {
        Self::InvalidType {
            source_text: source_text.into(),
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodegenError {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(error.to_string())
    }
}
