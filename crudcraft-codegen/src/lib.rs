//! # crudcraft-codegen
//!
//! Build-time generator for the search and DTO layer of a CRUD API on Sea-ORM.
//!
//! ## Main Components
//!
//! - **[`model`]**: field and model descriptors, and the [`ModelReader`] seam they are resolved through
//! - **[`types`]**: the [`TypeMapper`] canonicalising value types
//! - **[`search`]**: the depth-limited field collector, property specs and per-operator predicate generators
//! - **[`dto`]**: Request / Response / Ref shapes
//! - **[`Generator`]**: runs all of the above for one model and renders the result
//!
//! ## Example
//!
//! ```rust,ignore
//! use crudcraft_codegen::{Generator, GeneratorConfig, ModelRegistry};
//!
//! let models = ModelRegistry::from_manifest_file("models.toml")?;
//! let config = GeneratorConfig::from_file("crudcraft.toml")?.with_env_overrides()?;
//! let generator = Generator::new(models, config)?;
//!
//! if let Some(post) = generator.generate("BlogPost")? {
//!     let rendered = post.render()?;
//!     std::fs::write(out_dir.join("blog_post_search.rs"), rendered.search_request)?;
//! }
//! ```
//!
//! Generated code refers to the runtime crate (`::crudcraft` by default) for
//! [`crudcraft::SearchOperator`], [`crudcraft::LogicMode`] and the query helpers,
//! and to `::serde` and `::utoipa` for derives.

pub mod config;
pub mod dto;
pub mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod render;
pub mod search;
pub mod types;

pub use config::GeneratorConfig;
pub use dto::{DtoField, DtoFlavor, DtoShapeResolver};
pub use error::{CodegenError, Result};
pub use generator::{GeneratedModel, Generator, RenderedModel};
pub use model::{FieldDescriptor, ModelDescriptor, ModelReader, ModelRegistry, RelationshipKind};
pub use search::{
    PredicateGenerator, PredicateGeneratorRegistry, PropertySpec, SearchField, SearchFieldCollector,
};
pub use types::{TypeMapper, TypeMapperBuilder, TypeMapping};
