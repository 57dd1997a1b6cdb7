use super::{PredicateContext, PredicateGenerator};
use crate::error::Result;
use crate::search::SearchField;
use crudcraft::{FieldGroup, SearchOperator};
use proc_macro2::TokenStream;
use quote::quote;

/// `Gt` / `Gte` against `{property}_start`, `Lt` / `Lte` against `{property}_end`.
#[derive(Debug, Clone, Copy)]
pub struct Comparison {
    operator: SearchOperator,
}

impl Comparison {
    #[must_use]
    pub const fn new(operator: SearchOperator) -> Self {
        Self { operator }
    }
}

impl PredicateGenerator for Comparison {
    fn operator(&self) -> SearchOperator {
        self.operator
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        context.require(self.operator, FieldGroup::Range)?;
        let property = context.property();
        let (bound, method) = match self.operator {
            SearchOperator::Gt => (property.start_ident(), quote!(gt)),
            SearchOperator::Gte => (property.start_ident(), quote!(gte)),
            SearchOperator::Lt => (property.end_ident(), quote!(lt)),
            _ => (property.end_ident(), quote!(lte)),
        };
        let path = field.path_tokens(context.runtime());
        let active = context.is_active(self.operator);
        Ok(quote! {
            if #active {
                if let Some(bound) = self.#bound.as_ref() {
                    condition = condition.add(#path.#method(bound.clone()));
                }
            }
        })
    }
}

/// OR of `path < value` (`Before`) or `path > value` (`After`).
#[derive(Debug, Clone, Copy)]
pub struct Temporal {
    operator: SearchOperator,
}

impl Temporal {
    #[must_use]
    pub const fn new(operator: SearchOperator) -> Self {
        Self { operator }
    }
}

impl PredicateGenerator for Temporal {
    fn operator(&self) -> SearchOperator {
        self.operator
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let path = field.path_tokens(context.runtime());
        let method = if self.operator == SearchOperator::Before {
            quote!(lt)
        } else {
            quote!(gt)
        };
        let body = context.any_value(&quote!(#path.#method(value.clone())));
        context.with_values(self.operator, &body)
    }
}
