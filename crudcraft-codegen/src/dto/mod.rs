//! # DTO Generation
//!
//! Every concrete model gets three projections:
//!
//! - **`{Model}Request`**: write side, relationships flattened to identifier
//!   fields (`author_id`, `tag_ids`)
//! - **`{Model}Response`**: read side, relationships as `{Target}Ref`
//! - **`{Model}Ref`**: the identifier plus the fields marked for references
//!
//! Fields can also opt into named response variants, each emitted as
//! `{Model}{Variant}Response`. [`DtoShapeResolver`] decides every member's
//! name and type; the functions in this module assemble the structs.

mod emit;
pub mod resolver;

pub use emit::{generate_ref_dto, generate_request_dto, generate_response_dto, response_variants};
pub use resolver::{DtoField, DtoFlavor, DtoShapeResolver};
