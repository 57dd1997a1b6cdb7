use super::{PredicateContext, PredicateGenerator};
use crate::error::Result;
use crate::search::SearchField;
use crudcraft::SearchOperator;
use proc_macro2::TokenStream;
use quote::quote;

/// The array column holds every value.
#[derive(Debug, Clone, Copy)]
pub struct ContainsAll;

impl PredicateGenerator for ContainsAll {
    fn operator(&self) -> SearchOperator {
        SearchOperator::ContainsAll
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let predicates = context.predicates();
        let path = field.path_tokens(context.runtime());
        context.with_values(
            SearchOperator::ContainsAll,
            &quote! {
                condition = condition.add(#predicates::contains_all(#path, values.iter().cloned()));
            },
        )
    }
}

/// The JSON object column has any of the keys.
#[derive(Debug, Clone, Copy)]
pub struct ContainsKey;

impl PredicateGenerator for ContainsKey {
    fn operator(&self) -> SearchOperator {
        SearchOperator::ContainsKey
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let predicates = context.predicates();
        let path = field.path_tokens(context.runtime());
        let body = context.any_value(&quote!(#predicates::contains_key(#path, value)));
        context.with_values(SearchOperator::ContainsKey, &body)
    }
}

/// The JSON object column has any of the values.
#[derive(Debug, Clone, Copy)]
pub struct ContainsValue;

impl PredicateGenerator for ContainsValue {
    fn operator(&self) -> SearchOperator {
        SearchOperator::ContainsValue
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let predicates = context.predicates();
        let path = field.path_tokens(context.runtime());
        let body = context.any_value(&quote!(#predicates::contains_value(#path, value)));
        context.with_values(SearchOperator::ContainsValue, &body)
    }
}
