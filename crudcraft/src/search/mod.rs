//! # Search Requests
//!
//! Building blocks referenced by generated `{Model}SearchRequest` types.
//!
//! ## Main Components
//!
//! - **[`SearchOperator`]**: the closed operator set and its VALUE / RANGE / SIZE taxonomy
//! - **[`LogicMode`]**: whether property predicates are combined with AND or OR
//! - **[`SearchPath`]**: `root.join("author").get("name")` style column navigation
//! - **[`predicates`]**: single-predicate builders for the operators sea-query has no method for
//!
//! ## Generated Shape
//!
//! ```rust,ignore
//! // BlogPost { title: String, author: BlogAuthor { name, email } }
//! let mut request = BlogPostSearchRequest::default();
//! request.set_author_name(Some(["Ada"]));
//! request.set_author_name_op(Some(SearchOperator::StartsWith));
//!
//! // (author.name LIKE 'Ada%' ESCAPE '\')
//! let condition = request.to_condition();
//! ```
//!
//! Each property carries a `{property}_op` field; only the operator stored there
//! contributes a predicate, so one property never yields two conflicting filters.

pub mod logic;
pub mod operator;
pub mod path;
pub mod predicates;

pub use logic::LogicMode;
pub use operator::{FieldGroup, SearchOperator};
pub use path::SearchPath;
pub use predicates::ValueKind;
