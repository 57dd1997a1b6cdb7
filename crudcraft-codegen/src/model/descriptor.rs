use super::field::FieldDescriptor;
use crate::error::{CodegenError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

/// A model and its fields, as resolved by a [`super::ModelReader`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDescriptor {
    name: String,
    package: String,
    #[serde(default)]
    base_package: Option<String>,
    #[serde(default)]
    fields: Vec<Arc<FieldDescriptor>>,
    #[serde(default, rename = "abstract")]
    abstract_model: bool,
    #[serde(default)]
    search_depth: Option<u32>,
}

impl ModelDescriptor {
    /// A concrete model whose DTO namespaces hang off `package`.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            base_package: None,
            fields: Vec::new(),
            abstract_model: false,
            search_depth: None,
        }
    }

    #[must_use]
    pub fn with_base_package(mut self, base_package: impl Into<String>) -> Self {
        self.base_package = Some(base_package.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    #[must_use]
    pub const fn with_abstract(mut self, abstract_model: bool) -> Self {
        self.abstract_model = abstract_model;
        self
    }

    /// Seed budget for collecting this model's search fields.
    #[must_use]
    pub const fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = Some(depth);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Module the `dto::request` and `dto::response` namespaces live under.
    #[must_use]
    pub fn base_package(&self) -> &str {
        self.base_package.as_deref().unwrap_or(&self.package)
    }

    /// `{package}::{name}`, the identity of the model.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.package, self.name)
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// The field named `id`, in any case.
    #[must_use]
    pub fn id_field(&self) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|field| field.is_id())
    }

    #[must_use]
    pub fn has_searchable_fields(&self) -> bool {
        self.fields.iter().any(|field| field.is_searchable())
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &Arc<FieldDescriptor>> {
        self.fields.iter().filter(|field| field.is_searchable())
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.abstract_model
    }

    #[must_use]
    pub const fn search_depth(&self) -> Option<u32> {
        self.search_depth
    }

    /// Validate every field and reject duplicate field names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            field.validate(&self.name)?;
            if !seen.insert(field.name()) {
                return Err(CodegenError::invalid_descriptor(
                    &self.name,
                    field.name(),
                    "duplicate field name",
                ));
            }
        }
        Ok(())
    }
}
