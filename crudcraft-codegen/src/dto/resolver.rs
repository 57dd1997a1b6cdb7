//! Per-field shape of the Request, Response and Ref DTOs.
//!
//! | Field | Request | Response | Ref |
//! |---|---|---|---|
//! | plain | as declared | as declared | as declared |
//! | embedded `T` | `dto::request::TRequest` | `dto::response::TResponse` | `dto::response::TRef` |
//! | relationship `author: Author` | `author_id: Uuid` | `dto::response::AuthorRef` | `dto::response::AuthorRef` |
//! | relationship `tags: Vec<Tag>` | `tag_ids: Vec<Uuid>` | `Vec<dto::response::TagRef>` | `Vec<dto::response::TagRef>` |
//!
//! `Option` and the collection kind of the declared type are preserved in
//! every case. Plain fields with field-level security become `Option` in
//! every flavor so a restricted value can be left out.

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, Result};
use crate::model::{FieldDescriptor, ModelDescriptor, ModelReader};
use crate::naming;
use crate::types::type_utils;
use proc_macro2::Ident;
use std::fmt;

/// Which projection of a model a DTO is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtoFlavor {
    /// Write side, relationships flattened to identifiers
    Request,
    /// Read side, relationships as Ref DTOs
    Response,
    /// Minimal projection used to represent relationships
    Ref,
}

impl DtoFlavor {
    /// Type name suffix (`AuthorRequest`, `AuthorResponse`, `AuthorRef`).
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Response => "Response",
            Self::Ref => "Ref",
        }
    }

    /// Module under `{base_package}::dto` holding DTOs of this flavor.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response | Self::Ref => "response",
        }
    }

    /// Whether `field` appears in DTOs of this flavor. Identifiers are always in the Ref DTO.
    #[must_use]
    pub fn includes(self, field: &FieldDescriptor) -> bool {
        match self {
            Self::Request => field.in_request(),
            Self::Response => field.in_dto(),
            Self::Ref => field.in_ref() || field.is_id(),
        }
    }

    const fn is_read_side(self) -> bool {
        !matches!(self, Self::Request)
    }
}

impl fmt::Display for DtoFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A resolved DTO member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtoField {
    name: String,
    ty: syn::Type,
    copy_on_construct: bool,
}

impl DtoField {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ident(&self) -> Ident {
        naming::ident(&self.name)
    }

    #[must_use]
    pub const fn ty(&self) -> &syn::Type {
        &self.ty
    }

    /// Collection members the constructor collects into a fresh container.
    #[must_use]
    pub const fn copy_on_construct(&self) -> bool {
        self.copy_on_construct
    }
}

/// Decides the name and type of every DTO member.
pub struct DtoShapeResolver<R> {
    reader: R,
    id_type: syn::Type,
}

impl<R: ModelReader> DtoShapeResolver<R> {
    /// `id_type` is used for relationship targets the reader cannot resolve,
    /// or that have no `id` field.
    pub const fn new(reader: R, id_type: syn::Type) -> Self {
        Self { reader, id_type }
    }

    pub fn from_config(reader: R, config: &GeneratorConfig) -> Result<Self> {
        Ok(Self::new(reader, config.id_type()?))
    }

    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Name and type of `field` in the `flavor` DTO of `model`.
    pub fn resolve(
        &self,
        model: &ModelDescriptor,
        field: &FieldDescriptor,
        flavor: DtoFlavor,
    ) -> Result<DtoField> {
        let declared = field.declared_type();
        let (name, ty) = if field.is_embedded() {
            let target = self.dto_type(model, field, flavor)?;
            (field.name().to_string(), type_utils::rewrap(declared, |_| target))
        } else if field.is_relationship() && flavor == DtoFlavor::Request {
            let id_type = self.target_id_type(field);
            let name = if type_utils::is_collection(declared) {
                format!("{}_ids", naming::singularize(field.name()))
            } else {
                format!("{}_id", field.name())
            };
            (name, type_utils::rewrap(declared, |_| id_type))
        } else if field.is_relationship() {
            let target = self.dto_type(model, field, DtoFlavor::Ref)?;
            (field.name().to_string(), type_utils::rewrap(declared, |_| target))
        } else {
            (field.name().to_string(), declared.clone())
        };

        let plain = !field.is_relationship() && !field.is_embedded();
        let ty = if plain && field.has_field_security() {
            type_utils::wrap_option(&ty)
        } else {
            ty
        };
        let copy_on_construct = flavor.is_read_side() && type_utils::is_collection(&ty);
        Ok(DtoField {
            name,
            ty,
            copy_on_construct,
        })
    }

    /// Resolve every field `flavor` includes, in declaration order.
    pub fn resolve_all(&self, model: &ModelDescriptor, flavor: DtoFlavor) -> Result<Vec<DtoField>> {
        model
            .fields()
            .iter()
            .filter(|field| flavor.includes(field))
            .map(|field| self.resolve(model, field, flavor))
            .collect()
    }

    /// `{base_package}::dto::{namespace}::{Target}{Suffix}` for the field's target.
    fn dto_type(
        &self,
        model: &ModelDescriptor,
        field: &FieldDescriptor,
        flavor: DtoFlavor,
    ) -> Result<syn::Type> {
        let (Some(target), Some(simple)) = (field.target_type(), field.target_simple_name()) else {
            return Err(CodegenError::invalid_descriptor(
                model.name(),
                field.name(),
                "relationship or embedded field without a target type",
            ));
        };
        // Targets the reader knows live under their own base package.
        let base_package = self.reader.resolve(target).map_or_else(
            || model.base_package().to_string(),
            |target| target.base_package().to_string(),
        );
        let mut path = String::new();
        if !base_package.is_empty() {
            path.push_str(&base_package);
            path.push_str("::");
        }
        path.push_str(&format!("dto::{}::{simple}{}", flavor.namespace(), flavor.suffix()));
        type_utils::parse_type(&path)
    }

    fn target_id_type(&self, field: &FieldDescriptor) -> syn::Type {
        field
            .target_type()
            .and_then(|target| self.reader.resolve(target))
            .and_then(|target| {
                target
                    .id_field()
                    .map(|id| type_utils::strip_option(id.declared_type()).clone())
            })
            .unwrap_or_else(|| self.id_type.clone())
    }
}
