use super::{PredicateContext, PredicateGenerator};
use crate::error::Result;
use crate::search::SearchField;
use crudcraft::{FieldGroup, SearchOperator};
use proc_macro2::TokenStream;
use quote::quote;

/// Compares the cardinality of a collection column (NULL counts as 0).
#[derive(Debug, Clone, Copy)]
pub struct SizeComparison {
    operator: SearchOperator,
}

impl SizeComparison {
    #[must_use]
    pub const fn new(operator: SearchOperator) -> Self {
        Self { operator }
    }
}

impl PredicateGenerator for SizeComparison {
    fn operator(&self) -> SearchOperator {
        self.operator
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        context.require(self.operator, FieldGroup::Size)?;
        let method = match self.operator {
            SearchOperator::SizeGt => quote!(gt),
            SearchOperator::SizeLt => quote!(lt),
            _ => quote!(eq),
        };
        let size = context.property().size_ident();
        let predicates = context.predicates();
        let path = field.path_tokens(context.runtime());
        let active = context.is_active(self.operator);
        Ok(quote! {
            if #active {
                if let Some(size) = self.#size {
                    condition = condition.add(#predicates::size_of(#path).#method(size));
                }
            }
        })
    }
}
