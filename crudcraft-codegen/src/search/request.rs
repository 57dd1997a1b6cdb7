use super::builder::SearchRequestBuilder;
use super::predicates::PredicateGeneratorRegistry;
use super::property::PropertySpec;
use crate::error::Result;
use crate::model::ModelDescriptor;
use proc_macro2::TokenStream;

/// Emit `{Model}SearchRequest` with one member group and predicate set per property.
pub fn generate_search_request(
    model: &ModelDescriptor,
    properties: &[PropertySpec],
    registry: &PredicateGeneratorRegistry,
    runtime: &syn::Path,
) -> Result<TokenStream> {
    let mut builder = SearchRequestBuilder::new(model.name(), runtime.clone());
    for property in properties {
        property.add_members(&mut builder);
        property.add_copy_statements(&mut builder);
        property.add_predicates(&mut builder, registry)?;
    }
    tracing::debug!(
        model = model.name(),
        properties = properties.len(),
        fields = builder.field_count(),
        "generated search request"
    );
    Ok(builder.build())
}
