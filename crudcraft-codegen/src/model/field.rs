use crate::error::{CodegenError, Result};
use crate::naming;
use crate::types::type_utils;
use crudcraft::SearchOperator;
use serde::Deserialize;
use std::collections::BTreeSet;

/// How a field relates to another model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    #[default]
    None,
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipKind {
    #[must_use]
    pub const fn is_relationship(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the owning side holds many targets.
    #[must_use]
    pub const fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

/// One field of a model, as handed over by the model reader.
///
/// Built once with the consuming `with_*` methods, then shared behind an
/// `Arc` by [`super::ModelDescriptor`] and never mutated again.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    name: String,
    #[serde(rename = "type", deserialize_with = "type_utils::deserialize_type")]
    declared_type: syn::Type,
    #[serde(default)]
    relationship: RelationshipKind,
    #[serde(default)]
    embedded: bool,
    #[serde(default, rename = "target")]
    target_type: Option<String>,
    #[serde(default)]
    searchable: bool,
    #[serde(default, rename = "operators")]
    search_operators: Vec<SearchOperator>,
    #[serde(default)]
    search_depth: u32,
    #[serde(default = "included")]
    in_dto: bool,
    #[serde(default = "included")]
    in_request: bool,
    #[serde(default)]
    in_ref: bool,
    #[serde(default, rename = "response_dtos")]
    response_dto_names: BTreeSet<String>,
    #[serde(default)]
    field_security: bool,
    #[serde(default)]
    validations: Vec<String>,
}

const fn included() -> bool {
    true
}

impl FieldDescriptor {
    /// A plain field included in the Request and Response DTOs, not searchable.
    pub fn new(name: impl Into<String>, declared_type: syn::Type) -> Self {
        Self {
            name: name.into(),
            declared_type,
            relationship: RelationshipKind::None,
            embedded: false,
            target_type: None,
            searchable: false,
            search_operators: Vec::new(),
            search_depth: 0,
            in_dto: true,
            in_request: true,
            in_ref: false,
            response_dto_names: BTreeSet::new(),
            field_security: false,
            validations: Vec::new(),
        }
    }

    #[must_use]
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Operators offered for this field; the first one is its default.
    #[must_use]
    pub fn with_operators(mut self, operators: impl IntoIterator<Item = SearchOperator>) -> Self {
        self.search_operators = operators.into_iter().collect();
        self
    }

    /// Explicit recursion budget for this relationship (0 keeps the ambient budget).
    #[must_use]
    pub const fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    #[must_use]
    pub fn with_relationship(mut self, kind: RelationshipKind, target: impl Into<String>) -> Self {
        self.relationship = kind;
        self.target_type = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_embedded(mut self, target: impl Into<String>) -> Self {
        self.embedded = true;
        self.target_type = Some(target.into());
        self
    }

    #[must_use]
    pub const fn with_in_dto(mut self, include: bool) -> Self {
        self.in_dto = include;
        self
    }

    #[must_use]
    pub const fn with_in_request(mut self, include: bool) -> Self {
        self.in_request = include;
        self
    }

    #[must_use]
    pub const fn with_in_ref(mut self, include: bool) -> Self {
        self.in_ref = include;
        self
    }

    /// Also expose the field in the named extra response DTO.
    #[must_use]
    pub fn with_response_dto(mut self, variant: impl Into<String>) -> Self {
        self.response_dto_names.insert(variant.into());
        self
    }

    #[must_use]
    pub const fn with_field_security(mut self) -> Self {
        self.field_security = true;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: impl Into<String>) -> Self {
        self.validations.push(validation.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn declared_type(&self) -> &syn::Type {
        &self.declared_type
    }

    #[must_use]
    pub const fn relationship_kind(&self) -> RelationshipKind {
        self.relationship
    }

    #[must_use]
    pub const fn is_relationship(&self) -> bool {
        self.relationship.is_relationship()
    }

    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Fully qualified path of the related or embedded model.
    #[must_use]
    pub fn target_type(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    /// Last path segment of [`Self::target_type`].
    #[must_use]
    pub fn target_simple_name(&self) -> Option<&str> {
        self.target_type()
            .map(|target| target.rsplit("::").next().unwrap_or(target).trim())
    }

    #[must_use]
    pub const fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Configured operators, `[Equals]` when none were given.
    #[must_use]
    pub fn search_operators(&self) -> Vec<SearchOperator> {
        if self.search_operators.is_empty() {
            vec![SearchOperator::Equals]
        } else {
            self.search_operators.clone()
        }
    }

    /// The operator that represents this field in a collection pass.
    #[must_use]
    pub fn representative_operator(&self) -> SearchOperator {
        self.search_operators
            .first()
            .copied()
            .unwrap_or(SearchOperator::Equals)
    }

    #[must_use]
    pub const fn search_depth(&self) -> u32 {
        self.search_depth
    }

    #[must_use]
    pub const fn in_dto(&self) -> bool {
        self.in_dto
    }

    #[must_use]
    pub const fn in_request(&self) -> bool {
        self.in_request
    }

    #[must_use]
    pub const fn in_ref(&self) -> bool {
        self.in_ref
    }

    #[must_use]
    pub const fn response_dto_names(&self) -> &BTreeSet<String> {
        &self.response_dto_names
    }

    #[must_use]
    pub const fn has_field_security(&self) -> bool {
        self.field_security
    }

    #[must_use]
    pub fn validations(&self) -> &[String] {
        &self.validations
    }

    /// Identifier fields are named `id`, in any case.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.name.eq_ignore_ascii_case("id")
    }

    /// Check the structural invariants of this descriptor.
    pub fn validate(&self, model: &str) -> Result<()> {
        let fail = |reason: &str| Err(CodegenError::invalid_descriptor(model, &self.name, reason));

        if naming::field_ident(&self.name).is_none() {
            return fail("field name is not an identifier");
        }
        let needs_target = self.is_relationship() || self.embedded;
        match (&self.target_type, needs_target) {
            (None, true) => return fail("relationship or embedded field without a target type"),
            (Some(_), false) => return fail("target type given for a plain field"),
            (Some(target), true) if syn::parse_str::<syn::Path>(target).is_err() => {
                return fail("target type is not a path");
            }
            _ => {}
        }
        if self.embedded && self.is_relationship() {
            return fail("a field cannot be both embedded and a relationship");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_default_operator_is_equals() {
        let field = FieldDescriptor::new("title", parse_quote!(String)).searchable();
        assert_eq!(field.representative_operator(), SearchOperator::Equals);
        assert_eq!(field.search_operators(), vec![SearchOperator::Equals]);
    }

    #[test]
    fn test_first_configured_operator_represents_the_field() {
        let field = FieldDescriptor::new("title", parse_quote!(String))
            .with_operators([SearchOperator::Contains, SearchOperator::Equals]);
        assert_eq!(field.representative_operator(), SearchOperator::Contains);
    }

    #[test]
    fn test_target_simple_name() {
        let field = FieldDescriptor::new("author", parse_quote!(BlogAuthor))
            .with_relationship(RelationshipKind::ManyToOne, "crate::blog::BlogAuthor");
        assert_eq!(field.target_simple_name(), Some("BlogAuthor"));
    }

    #[test]
    fn test_relationship_requires_target() {
        let mut field = FieldDescriptor::new("author", parse_quote!(BlogAuthor));
        field.relationship = RelationshipKind::ManyToOne;
        assert!(field.validate("BlogPost").is_err());
    }

    #[test]
    fn test_plain_field_rejects_target() {
        let mut field = FieldDescriptor::new("title", parse_quote!(String));
        field.target_type = Some("crate::X".into());
        let err = field.validate("BlogPost").unwrap_err();
        assert!(err.to_string().contains("BlogPost.title"));
    }

    #[test]
    fn test_embedded_and_relationship_conflict() {
        let field = FieldDescriptor::new("address", parse_quote!(Address))
            .with_embedded("crate::Address")
            .with_relationship(RelationshipKind::OneToOne, "crate::Address");
        assert!(field.validate("Customer").is_err());
    }

    #[test]
    fn test_valid_descriptors() {
        let plain = FieldDescriptor::new("title", parse_quote!(String));
        let embedded = FieldDescriptor::new("address", parse_quote!(Address)).with_embedded("crate::Address");
        assert!(plain.validate("M").is_ok());
        assert!(embedded.validate("M").is_ok());
    }

    #[test]
    fn test_keyword_names_are_valid_but_self_is_not() {
        assert!(FieldDescriptor::new("type", parse_quote!(String)).validate("M").is_ok());
        assert!(FieldDescriptor::new("self", parse_quote!(String)).validate("M").is_err());
    }

    #[test]
    fn test_id_detection_ignores_case() {
        assert!(FieldDescriptor::new("ID", parse_quote!(i64)).is_id());
        assert!(!FieldDescriptor::new("identity", parse_quote!(i64)).is_id());
    }
}
