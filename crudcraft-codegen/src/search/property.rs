//! One generated search-request property and the members it needs.

use super::builder::SearchRequestBuilder;
use super::collector::group_by_property;
use super::field::SearchField;
use super::predicates::{PredicateContext, PredicateGeneratorRegistry};
use crate::error::Result;
use crate::model::FieldDescriptor;
use crate::naming;
use crate::types::{TypeMapper, type_utils};
use crudcraft::search::ValueKind;
use crudcraft::{FieldGroup, SearchOperator};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use std::collections::BTreeSet;
use std::sync::Arc;

/// All operators selectable for one property of a search request.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    descriptor: Arc<FieldDescriptor>,
    name: String,
    operators: BTreeSet<SearchOperator>,
    default_operator: SearchOperator,
    value_type: syn::Type,
    fields: Vec<SearchField>,
}

impl PropertySpec {
    /// Merge collected fields sharing a property name, in first-seen order.
    pub fn from_search_fields(fields: &[SearchField], mapper: &TypeMapper) -> Vec<Self> {
        group_by_property(fields)
            .into_iter()
            .filter_map(|group| Self::from_group(&group, mapper))
            .collect()
    }

    fn from_group(group: &[&SearchField], mapper: &TypeMapper) -> Option<Self> {
        let first = group.first()?;
        let descriptor = Arc::clone(first.descriptor());
        let default_operator = first.operator();
        // A `_size` property only keeps size operators, others keep everything configured.
        let size_property = default_operator.is_size_operator();
        let operators = group
            .iter()
            .map(|field| field.operator())
            .chain(descriptor.search_operators())
            .filter(|operator| !size_property || operator.is_size_operator())
            .collect();

        // Relationship and embedded terminals carry no scalar of their own.
        let element = (!descriptor.is_relationship() && !descriptor.is_embedded())
            .then(|| type_utils::element_type(descriptor.declared_type()));
        let value_type = mapper.map(element);

        Some(Self {
            descriptor,
            name: first.property().to_string(),
            operators,
            default_operator,
            value_type,
            fields: group.iter().map(|field| (*field).clone()).collect(),
        })
    }

    #[must_use]
    pub fn descriptor(&self) -> &Arc<FieldDescriptor> {
        &self.descriptor
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn operators(&self) -> &BTreeSet<SearchOperator> {
        &self.operators
    }

    /// Operator applied when the request leaves `{name}_op` unset.
    #[must_use]
    pub const fn default_operator(&self) -> SearchOperator {
        self.default_operator
    }

    /// Element type of the value fields, after type mapping.
    #[must_use]
    pub const fn value_type(&self) -> &syn::Type {
        &self.value_type
    }

    #[must_use]
    pub fn search_fields(&self) -> &[SearchField] {
        &self.fields
    }

    /// Field groups the operators need; emptiness operators need none.
    #[must_use]
    pub fn field_groups(&self) -> BTreeSet<FieldGroup> {
        self.operators
            .iter()
            .filter(|operator| !operator.is_operator_only())
            .map(|operator| operator.field_group())
            .collect()
    }

    /// Storage shape deciding what emptiness means for this property.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        let declared = self.descriptor.declared_type();
        if type_utils::is_collection(declared) {
            ValueKind::Collection
        } else if type_utils::is_text(declared) {
            ValueKind::Text
        } else {
            ValueKind::Scalar
        }
    }

    #[must_use]
    pub fn values_ident(&self) -> Ident {
        naming::ident(&self.name)
    }

    #[must_use]
    pub fn start_ident(&self) -> Ident {
        format_ident!("{}_start", self.name)
    }

    #[must_use]
    pub fn end_ident(&self) -> Ident {
        format_ident!("{}_end", self.name)
    }

    /// `{name}_size`, or `{name}` when the property already ends in `_size`.
    #[must_use]
    pub fn size_ident(&self) -> Ident {
        if self.name.ends_with("_size") {
            naming::ident(&self.name)
        } else {
            format_ident!("{}_size", self.name)
        }
    }

    #[must_use]
    pub fn op_ident(&self) -> Ident {
        format_ident!("{}_op", self.name)
    }

    /// Declare the fields and accessors of every needed field group, plus `{name}_op`.
    pub fn add_members(&self, builder: &mut SearchRequestBuilder) {
        let value_type = &self.value_type;
        let runtime = builder.runtime().clone();
        let raw_name = &self.name;

        for group in self.field_groups() {
            match group {
                FieldGroup::Values => {
                    let field = self.values_ident();
                    let setter = format_ident!("set_{}", self.name);
                    builder.add_field(
                        &field,
                        &quote!(Option<Vec<#value_type>>),
                        &format!("Operand values for `{raw_name}`."),
                    );
                    builder.add_accessor(quote! {
                        #[must_use]
                        pub fn #field(&self) -> Option<&[#value_type]> {
                            self.#field.as_deref()
                        }

                        pub fn #setter<I>(&mut self, values: Option<I>)
                        where
                            I: IntoIterator<Item = #value_type>,
                        {
                            self.#field = values.map(|values| values.into_iter().collect());
                        }
                    });
                }
                FieldGroup::Range => {
                    for (field, bound) in [(self.start_ident(), "Lower"), (self.end_ident(), "Upper")] {
                        let setter = format_ident!("set_{}", field);
                        builder.add_field(
                            &field,
                            &quote!(Option<#value_type>),
                            &format!("{bound} bound for `{raw_name}`."),
                        );
                        builder.add_accessor(quote! {
                            #[must_use]
                            pub fn #field(&self) -> Option<&#value_type> {
                                self.#field.as_ref()
                            }

                            pub fn #setter(&mut self, value: Option<#value_type>) {
                                self.#field = value;
                            }
                        });
                    }
                }
                FieldGroup::Size => {
                    let field = self.size_ident();
                    let setter = format_ident!("set_{}", field);
                    builder.add_field(
                        &field,
                        &quote!(Option<i64>),
                        &format!("Collection size compared against `{raw_name}`."),
                    );
                    builder.add_accessor(quote! {
                        #[must_use]
                        pub fn #field(&self) -> Option<i64> {
                            self.#field
                        }

                        pub fn #setter(&mut self, size: Option<i64>) {
                            self.#field = size;
                        }
                    });
                }
            }
        }

        let op = self.op_ident();
        let setter = format_ident!("set_{}", op);
        let doc = format!(
            "Operator applied to `{raw_name}`, `{}` when unset.",
            self.default_operator
        );
        builder.add_field(&op, &quote!(Option<#runtime::SearchOperator>), &doc);
        builder.add_accessor(quote! {
            #[must_use]
            pub fn #op(&self) -> Option<#runtime::SearchOperator> {
                self.#op
            }

            pub fn #setter(&mut self, operator: Option<#runtime::SearchOperator>) {
                self.#op = operator;
            }
        });
    }

    /// One `Clone` initializer per field declared by [`Self::add_members`].
    pub fn add_copy_statements(&self, builder: &mut SearchRequestBuilder) {
        let mut idents = Vec::new();
        for group in self.field_groups() {
            match group {
                FieldGroup::Values => idents.push(self.values_ident()),
                FieldGroup::Range => {
                    idents.push(self.start_ident());
                    idents.push(self.end_ident());
                }
                FieldGroup::Size => idents.push(self.size_ident()),
            }
        }
        idents.push(self.op_ident());
        for ident in idents {
            builder.add_copy_statement(quote!(#ident: self.#ident.clone()));
        }
    }

    /// Add the predicate of every operator for every collected field of this property.
    pub fn add_predicates(
        &self,
        builder: &mut SearchRequestBuilder,
        registry: &PredicateGeneratorRegistry,
    ) -> Result<()> {
        let runtime = builder.runtime().clone();
        let context = PredicateContext::new(&runtime, self);
        for field in &self.fields {
            for operator in &self.operators {
                let generator = registry.of(*operator).inspect_err(|_| {
                    tracing::error!(property = %self.name, %operator, "no predicate generator");
                })?;
                builder.add_predicate(generator.generate(field, &context)?);
            }
        }
        Ok(())
    }
}

/// `runtime::SearchOperator::Variant`
pub(crate) fn operator_tokens(runtime: &syn::Path, operator: SearchOperator) -> TokenStream {
    let variant = format_ident!("{}", operator.variant_name());
    quote!(#runtime::SearchOperator::#variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelDescriptor, ModelRegistry, RelationshipKind};
    use crate::search::SearchFieldCollector;
    use syn::parse_quote;

    fn specs(field: FieldDescriptor) -> Vec<PropertySpec> {
        let model = ModelDescriptor::new("Post", "crate").with_field(field);
        let fields = SearchFieldCollector::new(ModelRegistry::new()).collect(&model, 1);
        PropertySpec::from_search_fields(&fields, &TypeMapper::default())
    }

    fn field_names(spec: &PropertySpec) -> Vec<String> {
        let mut builder = SearchRequestBuilder::new("Post", parse_quote!(::crudcraft));
        spec.add_members(&mut builder);
        let file: syn::File = syn::parse2(builder.build()).unwrap();
        let syn::Item::Struct(item) = &file.items[0] else {
            panic!("expected struct");
        };
        item.fields
            .iter()
            .filter_map(|field| field.ident.as_ref().map(ToString::to_string))
            .filter(|name| name != "logic")
            .collect()
    }

    #[test]
    fn test_value_operators_share_one_container() {
        let spec = &specs(
            FieldDescriptor::new("title", parse_quote!(String))
                .searchable()
                .with_operators([SearchOperator::Equals, SearchOperator::Contains]),
        )[0];
        assert_eq!(spec.default_operator(), SearchOperator::Equals);
        assert_eq!(spec.operators().len(), 2);
        assert_eq!(field_names(spec), ["title", "title_op"]);
    }

    #[test]
    fn test_range_operators_add_start_end_pair() {
        let spec = &specs(
            FieldDescriptor::new("price", parse_quote!(Decimal))
                .searchable()
                .with_operators([SearchOperator::Gt, SearchOperator::Between]),
        )[0];
        assert_eq!(field_names(spec), ["price_start", "price_end", "price_op"]);
        let value_type = spec.value_type();
        assert_eq!(quote!(#value_type).to_string(), ":: rust_decimal :: Decimal");
    }

    #[test]
    fn test_mixed_families_generate_side_by_side() {
        let spec = &specs(
            FieldDescriptor::new("tags", parse_quote!(Vec<String>))
                .searchable()
                .with_operators([SearchOperator::ContainsAll, SearchOperator::SizeGt]),
        )[0];
        assert_eq!(spec.name(), "tags");
        assert_eq!(field_names(spec), ["tags", "tags_size", "tags_op"]);
        assert_eq!(spec.value_kind(), ValueKind::Collection);
    }

    #[test]
    fn test_size_property_keeps_only_size_operators() {
        let spec = &specs(
            FieldDescriptor::new("tags", parse_quote!(Vec<String>))
                .searchable()
                .with_operators([SearchOperator::SizeGt, SearchOperator::ContainsAll]),
        )[0];
        assert_eq!(spec.name(), "tags_size");
        assert_eq!(spec.operators().iter().copied().collect::<Vec<_>>(), [SearchOperator::SizeGt]);
        assert_eq!(field_names(spec), ["tags_size", "tags_size_op"]);
    }

    #[test]
    fn test_emptiness_operators_only_add_the_op_field() {
        let spec = &specs(
            FieldDescriptor::new("summary", parse_quote!(Option<String>))
                .searchable()
                .with_operators([SearchOperator::IsEmpty, SearchOperator::NotEmpty]),
        )[0];
        assert_eq!(field_names(spec), ["summary_op"]);
        assert_eq!(spec.value_kind(), ValueKind::Text);
    }

    #[test]
    fn test_relationship_terminal_uses_json_values() {
        let spec = &specs(
            FieldDescriptor::new("author", parse_quote!(Author))
                .searchable()
                .with_relationship(RelationshipKind::ManyToOne, "crate::Author"),
        )[0];
        let value_type = spec.value_type();
        assert_eq!(quote!(#value_type).to_string(), ":: serde_json :: Value");
    }

    #[test]
    fn test_operator_tokens_name_every_variant() {
        let runtime: syn::Path = parse_quote!(::crudcraft);
        for operator in SearchOperator::ALL {
            let path: syn::Path = syn::parse2(operator_tokens(&runtime, operator)).unwrap();
            let variant = &path.segments.last().unwrap().ident;
            assert_eq!(variant.to_string(), format!("{operator:?}"));
        }
    }

    #[test]
    fn test_copy_statements_cover_every_field() {
        let spec = &specs(
            FieldDescriptor::new("price", parse_quote!(i64))
                .searchable()
                .with_operators([SearchOperator::Equals, SearchOperator::Between]),
        )[0];
        let mut builder = SearchRequestBuilder::new("Post", parse_quote!(::crudcraft));
        spec.add_members(&mut builder);
        spec.add_copy_statements(&mut builder);
        let rendered = builder.build().to_string();
        for field in ["price", "price_start", "price_end", "price_op"] {
            assert!(
                rendered.contains(&format!("{field} : self . {field} . clone ()")),
                "{field} missing from {rendered}"
            );
        }
    }
}
