//! Canonicalisation of declared field types.
//!
//! Value types from the date/time, identifier and big-number crates are
//! rewritten to absolute paths (`DateTime<Utc>` becomes
//! `::chrono::DateTime<::chrono::Utc>`) so generated code compiles whatever
//! the caller imported. `Option` and collection wrappers are kept and their
//! elements mapped; everything else passes through untouched.

use super::type_utils::COLLECTION_TYPES;
use quote::format_ident;
use std::fmt;
use std::sync::Arc;
use syn::{GenericArgument, PathArguments, Type};

/// `(type name, owning crate)` of every value type with a canonical path.
const KNOWN_VALUE_TYPES: &[(&str, &str)] = &[
    ("DateTime", "chrono"),
    ("NaiveDate", "chrono"),
    ("NaiveDateTime", "chrono"),
    ("NaiveTime", "chrono"),
    ("Utc", "chrono"),
    ("FixedOffset", "chrono"),
    ("OffsetDateTime", "time"),
    ("PrimitiveDateTime", "time"),
    ("Date", "time"),
    ("Time", "time"),
    ("Uuid", "uuid"),
    ("Decimal", "rust_decimal"),
    ("BigDecimal", "bigdecimal"),
    ("BigInt", "num_bigint"),
];

/// A caller-supplied mapping, consulted before the built-in table.
///
/// Returning `None` passes the type on to the next mapping. Closures of type
/// `Fn(&syn::Type) -> Option<syn::Type>` implement it.
pub trait TypeMapping: Send + Sync {
    fn map_type(&self, ty: &Type) -> Option<Type>;
}

impl<F> TypeMapping for F
where
    F: Fn(&Type) -> Option<Type> + Send + Sync,
{
    fn map_type(&self, ty: &Type) -> Option<Type> {
        self(ty)
    }
}

#[derive(Default)]
pub struct TypeMapperBuilder {
    custom: Vec<Box<dyn TypeMapping>>,
}

impl TypeMapperBuilder {
    /// Register a mapping. Later registrations are tried first.
    #[must_use]
    pub fn with_mapping(mut self, mapping: impl TypeMapping + 'static) -> Self {
        self.custom.push(Box::new(mapping));
        self
    }

    #[must_use]
    pub fn build(mut self) -> TypeMapper {
        self.custom.reverse();
        TypeMapper {
            custom: Arc::new(self.custom),
        }
    }
}

/// Maps declared types to the types generated code uses. Immutable once built.
#[derive(Clone, Default)]
pub struct TypeMapper {
    custom: Arc<Vec<Box<dyn TypeMapping>>>,
}

impl fmt::Debug for TypeMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMapper")
            .field("custom_mappings", &self.custom.len())
            .finish()
    }
}

impl TypeMapper {
    #[must_use]
    pub fn builder() -> TypeMapperBuilder {
        TypeMapperBuilder::default()
    }

    /// Map a declared type. A missing type maps to `::serde_json::Value`.
    #[must_use]
    pub fn map(&self, ty: Option<&Type>) -> Type {
        match ty {
            Some(ty) => self.map_type(ty),
            None => syn::parse_quote!(::serde_json::Value),
        }
    }

    fn map_type(&self, ty: &Type) -> Type {
        if let Some(mapped) = self.custom.iter().find_map(|mapping| mapping.map_type(ty)) {
            return mapped;
        }

        let Type::Path(type_path) = ty else {
            return ty.clone();
        };
        if type_path.qself.is_some() {
            return ty.clone();
        }
        let Some(last) = type_path.path.segments.last() else {
            return ty.clone();
        };

        if last.ident == "Option" || COLLECTION_TYPES.iter().any(|name| last.ident == name) {
            let mut mapped = type_path.clone();
            if let Some(segment) = mapped.path.segments.last_mut() {
                self.map_arguments(&mut segment.arguments);
            }
            return Type::Path(mapped);
        }

        if let Some(mut canonical) = canonical_path(&type_path.path) {
            if let Some(segment) = canonical.segments.last_mut() {
                segment.arguments = last.arguments.clone();
                self.map_arguments(&mut segment.arguments);
            }
            return Type::Path(syn::TypePath {
                qself: None,
                path: canonical,
            });
        }

        ty.clone()
    }

    fn map_arguments(&self, arguments: &mut PathArguments) {
        if let PathArguments::AngleBracketed(args) = arguments {
            for arg in &mut args.args {
                if let GenericArgument::Type(inner) = arg {
                    *inner = self.map_type(inner);
                }
            }
        }
    }
}

/// `::krate::Name` for a known value type written bare or under its own crate.
fn canonical_path(path: &syn::Path) -> Option<syn::Path> {
    let last = path.segments.last()?;
    let (name, krate) = KNOWN_VALUE_TYPES
        .iter()
        .find(|(name, _)| last.ident == name)?;
    let first = path.segments.first()?;
    if path.segments.len() > 1 && first.ident != krate {
        return None;
    }
    let krate = format_ident!("{}", krate);
    let name = format_ident!("{}", name);
    Some(syn::parse_quote!(::#krate::#name))
}
