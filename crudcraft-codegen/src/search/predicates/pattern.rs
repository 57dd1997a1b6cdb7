use super::{PredicateContext, PredicateGenerator};
use crate::error::Result;
use crate::search::SearchField;
use crudcraft::SearchOperator;
use crudcraft::search::predicates::LikeKind;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// OR of escaped `LIKE` matches, one per value.
#[derive(Debug, Clone, Copy)]
pub struct LikeMatch {
    operator: SearchOperator,
    kind: LikeKind,
}

impl LikeMatch {
    #[must_use]
    pub const fn new(operator: SearchOperator, kind: LikeKind) -> Self {
        Self { operator, kind }
    }
}

impl PredicateGenerator for LikeMatch {
    fn operator(&self) -> SearchOperator {
        self.operator
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let path = field.path_tokens(context.runtime());
        let predicates = context.predicates();
        let kind = format_ident!("{}", self.kind.variant_name());
        let body = context.any_value(&quote! {
            #predicates::like(#path, #predicates::LikeKind::#kind, value)
        });
        context.with_values(self.operator, &body)
    }
}

/// OR of `path ~ value` regular expression matches.
#[derive(Debug, Clone, Copy)]
pub struct RegexMatch;

impl PredicateGenerator for RegexMatch {
    fn operator(&self) -> SearchOperator {
        SearchOperator::Regex
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        let path = field.path_tokens(context.runtime());
        let predicates = context.predicates();
        let body = context.any_value(&quote! {
            #predicates::regex(#path, value)
        });
        context.with_values(SearchOperator::Regex, &body)
    }
}
