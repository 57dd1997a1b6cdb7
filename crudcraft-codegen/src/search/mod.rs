//! # Search Request Generation
//!
//! Turns a model's searchable fields into a `{Model}SearchRequest` type.
//!
//! ## Pipeline
//!
//! 1. [`SearchFieldCollector`] flattens the model graph into [`SearchField`]s,
//!    one per reachable searchable column (`title`, `author_name`, `tags_size`).
//! 2. [`PropertySpec::from_search_fields`] merges fields sharing a property name
//!    and decides which request fields each property needs.
//! 3. [`PredicateGeneratorRegistry`] supplies one [`PredicateGenerator`] per
//!    operator; together with the property specs they fill a
//!    [`SearchRequestBuilder`].
//!
//! [`generate_search_request`] runs steps 2 and 3 for an already collected field list.

pub mod builder;
pub mod collector;
pub mod field;
pub mod predicates;
pub mod property;
mod request;

pub use builder::SearchRequestBuilder;
pub use collector::SearchFieldCollector;
pub use field::{QueryPath, SearchField};
pub use predicates::{PredicateContext, PredicateGenerator, PredicateGeneratorRegistry};
pub use property::PropertySpec;
pub use request::generate_search_request;
