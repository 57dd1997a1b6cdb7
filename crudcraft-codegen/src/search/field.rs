use crate::model::FieldDescriptor;
use crudcraft::SearchOperator;
use proc_macro2::TokenStream;
use quote::quote;
use std::fmt;
use std::sync::Arc;

/// Navigation from the searched model to a column, shared with the runtime.
pub use crudcraft::search::path::ColumnPath as QueryPath;

/// One flattened `(property, path, operator)` produced by the collector.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchField {
    descriptor: Arc<FieldDescriptor>,
    property: String,
    path: QueryPath,
    operator: SearchOperator,
}

impl SearchField {
    pub(crate) fn new(
        descriptor: Arc<FieldDescriptor>,
        property: String,
        path: QueryPath,
        operator: SearchOperator,
    ) -> Self {
        Self {
            descriptor,
            property,
            path,
            operator,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &Arc<FieldDescriptor> {
        &self.descriptor
    }

    /// Accessor name on the search request (`author_name`, `tags_size`).
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub const fn path(&self) -> &QueryPath {
        &self.path
    }

    /// `author.name`
    #[must_use]
    pub fn dotted_path(&self) -> String {
        self.path.dotted()
    }

    #[must_use]
    pub const fn operator(&self) -> SearchOperator {
        self.operator
    }

    /// Expression building this field's column in generated code.
    #[must_use]
    pub fn path_tokens(&self, runtime: &syn::Path) -> TokenStream {
        path_tokens(&self.path, runtime)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.property, self.operator, self.path)
    }
}

/// `runtime::search::SearchPath::root().join("a").get("b").expr()`
pub(crate) fn path_tokens(path: &QueryPath, runtime: &syn::Path) -> TokenStream {
    let joins = path.joins();
    let column = path.column();
    quote! {
        #runtime::search::SearchPath::root()
            #(.join(#joins))*
            .get(#column)
            .expr()
    }
}
