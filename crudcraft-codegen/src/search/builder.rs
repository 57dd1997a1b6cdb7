use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

/// Accumulates the pieces of one `{Model}SearchRequest` type.
///
/// [`super::PropertySpec`] adds fields, accessors, clone initializers and
/// predicate statements; [`Self::build`] assembles them into the struct, its
/// `Clone` impl and an inherent impl ending in `to_condition`.
pub struct SearchRequestBuilder {
    name: Ident,
    runtime: syn::Path,
    fields: Vec<TokenStream>,
    accessors: Vec<TokenStream>,
    copy_statements: Vec<TokenStream>,
    predicates: Vec<TokenStream>,
}

impl SearchRequestBuilder {
    /// Builder for `{model}SearchRequest`, calling into the runtime crate at `runtime`.
    pub fn new(model: &str, runtime: syn::Path) -> Self {
        Self {
            name: format_ident!("{}SearchRequest", model),
            runtime,
            fields: Vec::new(),
            accessors: Vec::new(),
            copy_statements: Vec::new(),
            predicates: Vec::new(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &Ident {
        &self.name
    }

    #[must_use]
    pub const fn runtime(&self) -> &syn::Path {
        &self.runtime
    }

    /// Add a private field with a doc line.
    pub fn add_field(&mut self, ident: &Ident, ty: &TokenStream, doc: &str) {
        self.fields.push(quote! {
            #[doc = #doc]
            #ident: #ty
        });
    }

    pub fn add_accessor(&mut self, tokens: TokenStream) {
        self.accessors.push(tokens);
    }

    /// Add one `field: expr` initializer of the `Clone` impl.
    pub fn add_copy_statement(&mut self, tokens: TokenStream) {
        self.copy_statements.push(tokens);
    }

    /// Add statements run inside `to_condition`, where `condition` is in scope.
    pub fn add_predicate(&mut self, tokens: TokenStream) {
        self.predicates.push(tokens);
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn build(self) -> TokenStream {
        let Self {
            name,
            runtime,
            fields,
            accessors,
            copy_statements,
            predicates,
        } = self;
        let doc = format!(
            "Search parameters for `{}`; every property is optional.",
            name.to_string().trim_end_matches("SearchRequest")
        );

        quote! {
            #[doc = #doc]
            #[derive(Debug, Default, ::serde::Serialize, ::serde::Deserialize, ::utoipa::ToSchema)]
            #[serde(rename_all = "camelCase", default)]
            pub struct #name {
                /// How property predicates are combined.
                logic: #runtime::search::LogicMode,
                #(#fields,)*
            }

            impl Clone for #name {
                fn clone(&self) -> Self {
                    Self {
                        logic: self.logic,
                        #(#copy_statements,)*
                    }
                }
            }

            impl #name {
                #[must_use]
                pub fn logic(&self) -> #runtime::search::LogicMode {
                    self.logic
                }

                pub fn set_logic(&mut self, logic: #runtime::search::LogicMode) {
                    self.logic = logic;
                }

                #(#accessors)*

                /// Condition combining the predicate of every property that is set.
                #[must_use]
                #[allow(unused_mut)]
                pub fn to_condition(&self) -> #runtime::sea_orm::Condition {
                    let mut condition = self.logic.condition();
                    #(#predicates)*
                    self.logic.finish(condition)
                }
            }
        }
    }
}
