//! Per-operator predicate generators.
//!
//! Every generator emits statements for the body of `to_condition`. The
//! statements guard themselves: they only add a predicate to `condition` when
//! the request's `{property}_op` (or the property's default operator when it is
//! unset) is the generator's operator and the operand fields are filled in.
//! Emptiness operators have no operands and fire only when selected
//! explicitly.

mod content;
mod emptiness;
mod membership;
mod ordering;
mod pattern;
mod range;
mod size;

pub use content::{ContainsAll, ContainsKey, ContainsValue};
pub use emptiness::Emptiness;
pub use membership::Membership;
pub use ordering::{Comparison, Temporal};
pub use pattern::{LikeMatch, RegexMatch};
pub use range::{Between, HalfOpenRange};
pub use size::SizeComparison;

use super::field::SearchField;
use super::property::{PropertySpec, operator_tokens};
use crate::error::{CodegenError, Result};
use crudcraft::{FieldGroup, SearchOperator};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeMap;
use std::fmt;

/// Emits the predicate of one operator.
pub trait PredicateGenerator: Send + Sync {
    fn operator(&self) -> SearchOperator;

    /// Statements adding this operator's predicate for `field` to `condition`.
    fn generate(&self, field: &SearchField, context: &PredicateContext<'_>) -> Result<TokenStream>;
}

/// What a generator knows about the property it generates for.
pub struct PredicateContext<'a> {
    runtime: &'a syn::Path,
    property: &'a PropertySpec,
}

impl<'a> PredicateContext<'a> {
    #[must_use]
    pub const fn new(runtime: &'a syn::Path, property: &'a PropertySpec) -> Self {
        Self { runtime, property }
    }

    #[must_use]
    pub const fn runtime(&self) -> &syn::Path {
        self.runtime
    }

    #[must_use]
    pub const fn property(&self) -> &PropertySpec {
        self.property
    }

    /// Fail unless the property declares the field group `operator` reads.
    pub fn require(&self, operator: SearchOperator, group: FieldGroup) -> Result<()> {
        if self.property.field_groups().contains(&group) {
            Ok(())
        } else {
            Err(CodegenError::Config(format!(
                "operator {operator} reads {group:?} fields, property '{}' declares none",
                self.property.name()
            )))
        }
    }

    /// `runtime::search::predicates`
    pub(crate) fn predicates(&self) -> TokenStream {
        let runtime = self.runtime;
        quote!(#runtime::search::predicates)
    }

    pub(crate) fn operator(&self, operator: SearchOperator) -> TokenStream {
        operator_tokens(self.runtime, operator)
    }

    /// True when `operator` is the active operator, explicitly or by default.
    pub(crate) fn is_active(&self, operator: SearchOperator) -> TokenStream {
        let op = self.property.op_ident();
        let default = self.operator(self.property.default_operator());
        let operator = self.operator(operator);
        quote!(self.#op.unwrap_or(#default) == #operator)
    }

    /// Run `body` with `values: &[T]` bound when `operator` is active and values are given.
    pub(crate) fn with_values(&self, operator: SearchOperator, body: &TokenStream) -> Result<TokenStream> {
        self.require(operator, FieldGroup::Values)?;
        let active = self.is_active(operator);
        let values = self.property.values_ident();
        Ok(quote! {
            if #active {
                if let Some(values) = self.#values.as_deref() {
                    if !values.is_empty() {
                        #body
                    }
                }
            }
        })
    }

    /// OR one predicate per element of `values`; `predicate` sees `value: &T`.
    pub(crate) fn any_value(&self, predicate: &TokenStream) -> TokenStream {
        let runtime = self.runtime;
        quote! {
            let mut any = #runtime::sea_orm::Condition::any();
            for value in values {
                any = any.add(#predicate);
            }
            condition = condition.add(any);
        }
    }
}

/// Generators by operator. Immutable once built, shared across models.
pub struct PredicateGeneratorRegistry {
    generators: BTreeMap<SearchOperator, Box<dyn PredicateGenerator>>,
}

impl fmt::Debug for PredicateGeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateGeneratorRegistry")
            .field("operators", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for PredicateGeneratorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl PredicateGeneratorRegistry {
    /// A registry without generators.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    /// One generator for every [`SearchOperator`].
    #[must_use]
    pub fn standard() -> Self {
        use crudcraft::search::predicates::LikeKind;
        use SearchOperator as Op;

        Self::empty()
            .with_generator(Membership::new(Op::Equals))
            .with_generator(Membership::new(Op::In))
            .with_generator(Membership::new(Op::NotEquals))
            .with_generator(Membership::new(Op::NotIn))
            .with_generator(LikeMatch::new(Op::Contains, LikeKind::Contains))
            .with_generator(LikeMatch::new(Op::StartsWith, LikeKind::StartsWith))
            .with_generator(LikeMatch::new(Op::EndsWith, LikeKind::EndsWith))
            .with_generator(RegexMatch)
            .with_generator(Comparison::new(Op::Gt))
            .with_generator(Comparison::new(Op::Gte))
            .with_generator(Comparison::new(Op::Lt))
            .with_generator(Comparison::new(Op::Lte))
            .with_generator(Temporal::new(Op::Before))
            .with_generator(Temporal::new(Op::After))
            .with_generator(Between)
            .with_generator(HalfOpenRange)
            .with_generator(Emptiness::new(Op::IsEmpty))
            .with_generator(Emptiness::new(Op::NotEmpty))
            .with_generator(SizeComparison::new(Op::SizeEquals))
            .with_generator(SizeComparison::new(Op::SizeGt))
            .with_generator(SizeComparison::new(Op::SizeLt))
            .with_generator(ContainsAll)
            .with_generator(ContainsKey)
            .with_generator(ContainsValue)
    }

    /// Register a generator, replacing any previous one for its operator.
    #[must_use]
    pub fn with_generator(mut self, generator: impl PredicateGenerator + 'static) -> Self {
        self.generators.insert(generator.operator(), Box::new(generator));
        self
    }

    pub fn of(&self, operator: SearchOperator) -> Result<&dyn PredicateGenerator> {
        self.generators
            .get(&operator)
            .map(|generator| &**generator)
            .ok_or(CodegenError::MissingPredicateGenerator { operator })
    }

    pub fn operators(&self) -> impl Iterator<Item = SearchOperator> + '_ {
        self.generators.keys().copied()
    }
}
