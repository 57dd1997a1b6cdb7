use super::{PredicateContext, PredicateGenerator};
use crate::error::Result;
use crate::search::SearchField;
use crudcraft::{FieldGroup, SearchOperator};
use proc_macro2::TokenStream;
use quote::quote;

/// Inclusive `path BETWEEN start AND end`; a single bound becomes `>=` or `<=`.
#[derive(Debug, Clone, Copy)]
pub struct Between;

impl PredicateGenerator for Between {
    fn operator(&self) -> SearchOperator {
        SearchOperator::Between
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        context.require(SearchOperator::Between, FieldGroup::Range)?;
        let property = context.property();
        let (start, end) = (property.start_ident(), property.end_ident());
        let path = field.path_tokens(context.runtime());
        let active = context.is_active(SearchOperator::Between);
        Ok(quote! {
            if #active {
                match (self.#start.as_ref(), self.#end.as_ref()) {
                    (Some(start), Some(end)) => {
                        condition = condition.add(#path.between(start.clone(), end.clone()));
                    }
                    (Some(start), None) => {
                        condition = condition.add(#path.gte(start.clone()));
                    }
                    (None, Some(end)) => {
                        condition = condition.add(#path.lte(end.clone()));
                    }
                    (None, None) => {}
                }
            }
        })
    }
}

/// Half-open `start <= path < end` added as one predicate; either bound may be missing.
#[derive(Debug, Clone, Copy)]
pub struct HalfOpenRange;

impl PredicateGenerator for HalfOpenRange {
    fn operator(&self) -> SearchOperator {
        SearchOperator::Range
    }

    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream> {
        context.require(SearchOperator::Range, FieldGroup::Range)?;
        let property = context.property();
        let (start, end) = (property.start_ident(), property.end_ident());
        let path = field.path_tokens(context.runtime());
        let active = context.is_active(SearchOperator::Range);
        Ok(quote! {
            if #active {
                match (self.#start.as_ref(), self.#end.as_ref()) {
                    (Some(start), Some(end)) => {
                        condition = condition.add(#path.gte(start.clone()).and(#path.lt(end.clone())));
                    }
                    (Some(start), None) => {
                        condition = condition.add(#path.gte(start.clone()));
                    }
                    (None, Some(end)) => {
                        condition = condition.add(#path.lt(end.clone()));
                    }
                    (None, None) => {}
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{generate, property};
    use crate::model::FieldDescriptor;
    use crudcraft::SearchOperator;
    use syn::parse_quote;

    fn created_at(operator: SearchOperator) -> String {
        let spec = property(
            FieldDescriptor::new("created_at", parse_quote!(DateTime<Utc>))
                .searchable()
                .with_operators([operator]),
        );
        generate(&spec, operator).unwrap()
    }

    #[test]
    fn test_between_is_inclusive_with_single_bound_fallbacks() {
        let code = created_at(SearchOperator::Between);
        assert!(code.contains(". between (start . clone () , end . clone ())"), "{code}");
        assert!(code.contains(". gte (start . clone ())"), "{code}");
        assert!(code.contains(". lte (end . clone ())"), "{code}");
    }

    #[test]
    fn test_range_is_half_open() {
        let code = created_at(SearchOperator::Range);
        assert!(code.contains(". gte (start . clone ())"), "{code}");
        assert!(code.contains(". lt (end . clone ())"), "{code}");
        assert!(!code.contains("between"), "{code}");
    }

    #[test]
    fn test_range_bounds_form_one_predicate() {
        let code = created_at(SearchOperator::Range);
        assert!(
            code.contains(". gte (start . clone ()) . and ("),
            "{code}"
        );
        assert_eq!(code.matches("(Some (start) , Some (end))").count(), 1, "{code}");
    }
}
