//! Model descriptors handed to the generator.
//!
//! A [`ModelReader`] turns a type name into a [`ModelDescriptor`]; the
//! generator never inspects Rust source itself. [`ModelRegistry`] is the
//! in-memory reader, filled in code or from a TOML manifest.

mod descriptor;
mod field;
mod reader;

pub use descriptor::ModelDescriptor;
pub use field::{FieldDescriptor, RelationshipKind};
pub use reader::{ModelReader, ModelRegistry};
