use super::{PredicateContext, PredicateGenerator};
use crate::error::Result;
use crate::search::SearchField;
use crudcraft::SearchOperator;
use proc_macro2::TokenStream;
use quote::quote;

/// `path IN (values)` for `Equals` / `In`, `NOT IN` for `NotEquals` / `NotIn`.
#[derive(Debug, Clone, Copy)]
pub struct Membership {
    operator: SearchOperator,
}

impl Membership {
    #[must_use]
    pub const fn new(operator: SearchOperator) -> Self {
        Self { operator }
    }

    const fn negated(self) -> bool {
        matches!(self.operator, SearchOperator::NotEquals | SearchOperator::NotIn)
    }
}

impl PredicateGenerator for Membership {
    fn operator(&self) -> SearchOperator {
        self.operator
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let path = field.path_tokens(context.runtime());
        let predicate = if self.negated() {
            quote!(#path.is_not_in(values.iter().cloned()))
        } else {
            quote!(#path.is_in(values.iter().cloned()))
        };
        context.with_values(
            self.operator,
            &quote! {
                condition = condition.add(#predicate);
            },
        )
    }
}
