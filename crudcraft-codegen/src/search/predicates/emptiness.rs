use super::{PredicateContext, PredicateGenerator};
use crate::error::Result;
use crate::search::SearchField;
use crudcraft::SearchOperator;
use crudcraft::search::ValueKind;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// `IsEmpty` / `NotEmpty`: reads no operand, so it only fires when selected
/// explicitly through `{property}_op`.
#[derive(Debug, Clone, Copy)]
pub struct Emptiness {
    operator: SearchOperator,
}

impl Emptiness {
    #[must_use]
    pub const fn new(operator: SearchOperator) -> Self {
        Self { operator }
    }
}

impl PredicateGenerator for Emptiness {
    fn operator(&self) -> SearchOperator {
        self.operator
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let predicates = context.predicates();
        let helper = if self.operator == SearchOperator::NotEmpty {
            format_ident!("not_empty")
        } else {
            format_ident!("is_empty")
        };
        let kind = match context.property().value_kind() {
            ValueKind::Collection => format_ident!("Collection"),
            ValueKind::Text => format_ident!("Text"),
            ValueKind::Scalar => format_ident!("Scalar"),
        };
        let runtime = context.runtime();
        let path = field.path_tokens(runtime);
        let op = context.property().op_ident();
        let operator = context.operator(self.operator);
        Ok(quote! {
            if self.#op == Some(#operator) {
                condition = condition.add(#predicates::#helper(#path, #runtime::search::ValueKind::#kind));
            }
        })
    }
}
