use super::descriptor::ModelDescriptor;
use crate::error::{CodegenError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Resolves type names to model descriptors.
///
/// Called again for the same name during recursive collection, so
/// implementations must return the same descriptor every time and must not
/// mutate shared state on lookup.
pub trait ModelReader {
    /// Look up a model by qualified (`crate::blog::BlogPost`) or simple (`BlogPost`) name.
    fn resolve(&self, type_name: &str) -> Option<Arc<ModelDescriptor>>;
}

impl<T: ModelReader + ?Sized> ModelReader for &T {
    fn resolve(&self, type_name: &str) -> Option<Arc<ModelDescriptor>> {
        (**self).resolve(type_name)
    }
}

impl<T: ModelReader + ?Sized> ModelReader for Arc<T> {
    fn resolve(&self, type_name: &str) -> Option<Arc<ModelDescriptor>> {
        (**self).resolve(type_name)
    }
}

/// In-memory [`ModelReader`] filled programmatically or from a manifest.
///
/// ```toml
/// [[models]]
/// name = "BlogPost"
/// package = "crate::blog"
///
/// [[models.fields]]
/// name = "title"
/// type = "String"
/// searchable = true
/// operators = ["CONTAINS", "EQUALS"]
///
/// [[models.fields]]
/// name = "author"
/// type = "BlogAuthor"
/// relationship = "many_to_one"
/// target = "crate::blog::BlogAuthor"
/// searchable = true
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, Arc<ModelDescriptor>>,
    by_simple_name: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a model; qualified names must be unique.
    pub fn register(&mut self, model: ModelDescriptor) -> Result<Arc<ModelDescriptor>> {
        model.validate()?;
        let qualified = model.qualified_name();
        if self.models.contains_key(&qualified) {
            return Err(CodegenError::Config(format!(
                "model '{qualified}' is registered twice"
            )));
        }
        let model = Arc::new(model);
        self.by_simple_name
            .entry(model.name().to_string())
            .or_default()
            .push(qualified.clone());
        self.models.insert(qualified, Arc::clone(&model));
        Ok(model)
    }

    /// Builder-style [`Self::register`].
    pub fn with_model(mut self, model: ModelDescriptor) -> Result<Self> {
        self.register(model)?;
        Ok(self)
    }

    pub fn from_manifest_str(source: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(source)?;
        let mut registry = Self::new();
        for model in manifest.models {
            registry.register(model)?;
        }
        tracing::debug!(models = registry.len(), "loaded model manifest");
        Ok(registry)
    }

    pub fn from_manifest_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CodegenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_manifest_str(&source)
    }

    /// Registered models in qualified-name order.
    pub fn models(&self) -> impl Iterator<Item = &Arc<ModelDescriptor>> {
        self.models.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelReader for ModelRegistry {
    fn resolve(&self, type_name: &str) -> Option<Arc<ModelDescriptor>> {
        let name = type_name.trim().trim_start_matches("::");
        if let Some(model) = self.models.get(name) {
            return Some(Arc::clone(model));
        }
        let simple = name.rsplit("::").next().unwrap_or(name);
        // Simple names only resolve when unambiguous.
        match self.by_simple_name.get(simple).map(Vec::as_slice) {
            Some([qualified]) => self.models.get(qualified).cloned(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDescriptor, RelationshipKind};
    use crudcraft::SearchOperator;
    use syn::parse_quote;

    const MANIFEST: &str = r#"
        [[models]]
        name = "BlogPost"
        package = "crate::blog"
        search_depth = 3

        [[models.fields]]
        name = "title"
        type = "String"
        searchable = true
        operators = ["CONTAINS", "EQUALS"]

        [[models.fields]]
        name = "tags"
        type = "Vec<Tag>"
        relationship = "many_to_many"
        target = "crate::tags::Tag"

        [[models]]
        name = "Tag"
        package = "crate::tags"

        [[models.fields]]
        name = "id"
        type = "i64"
    "#;

    #[test]
    fn test_manifest_loading() {
        let registry = ModelRegistry::from_manifest_str(MANIFEST).unwrap();
        assert_eq!(registry.len(), 2);

        let post = registry.resolve("crate::blog::BlogPost").unwrap();
        assert_eq!(post.search_depth(), Some(3));
        let title = post.field("title").unwrap();
        assert_eq!(
            title.search_operators(),
            vec![SearchOperator::Contains, SearchOperator::Equals]
        );
        let tags = post.field("tags").unwrap();
        assert_eq!(tags.relationship_kind(), RelationshipKind::ManyToMany);
        let expected: syn::Type = parse_quote!(Vec<Tag>);
        assert_eq!(tags.declared_type(), &expected);
    }

    #[test]
    fn test_resolve_by_simple_and_prefixed_names() {
        let registry = ModelRegistry::from_manifest_str(MANIFEST).unwrap();
        assert!(registry.resolve("Tag").is_some());
        assert!(registry.resolve("::crate::tags::Tag").is_some());
        assert!(registry.resolve("other::Tag").is_some());
        assert!(registry.resolve("Missing").is_none());
    }

    #[test]
    fn test_ambiguous_simple_name_does_not_resolve() {
        let registry = ModelRegistry::new()
            .with_model(ModelDescriptor::new("Tag", "crate::a"))
            .unwrap()
            .with_model(ModelDescriptor::new("Tag", "crate::b"))
            .unwrap();
        assert!(registry.resolve("Tag").is_none());
        assert!(registry.resolve("crate::a::Tag").is_some());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ModelRegistry::new();
        registry.register(ModelDescriptor::new("Tag", "crate::tags")).unwrap();
        let err = registry
            .register(ModelDescriptor::new("Tag", "crate::tags"))
            .unwrap_err();
        assert!(matches!(err, CodegenError::Config(_)));
    }

    #[test]
    fn test_invalid_descriptor_is_rejected_on_insert() {
        let mut registry = ModelRegistry::new();
        let broken = ModelDescriptor::new("Post", "crate")
            .with_field(FieldDescriptor::new("title", parse_quote!(String)))
            .with_field(FieldDescriptor::new("title", parse_quote!(String)));
        assert!(matches!(
            registry.register(broken),
            Err(CodegenError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn test_manifest_with_bad_type_fails() {
        let err = ModelRegistry::from_manifest_str(
            "[[models]]\nname = \"A\"\npackage = \"crate\"\n[[models.fields]]\nname = \"x\"\ntype = \"Vec<\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::Config(_)));
    }
}
