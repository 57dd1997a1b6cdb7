//! Type introspection helpers for descriptor types.
//!
//! Wrapper detection looks at the last path segment, so `Option<T>`,
//! `std::option::Option<T>` and `core::option::Option<T>` are all recognised.

use crate::error::CodegenError;
use serde::{Deserialize, Deserializer};
use syn::{GenericArgument, PathArguments, Type};

/// Containers treated as multi-valued. The element type is the first generic argument.
pub const COLLECTION_TYPES: &[&str] = &["Vec", "VecDeque", "HashSet", "BTreeSet", "LinkedList"];

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None,
    }
}

fn first_type_argument(segment: &syn::PathSegment) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
    } else {
        None
    }
}

/// Identifier of the last path segment (`Vec` for `std::vec::Vec<T>`).
pub fn last_ident(ty: &Type) -> Option<&syn::Ident> {
    last_segment(ty).map(|segment| &segment.ident)
}

/// `T` for `Option<T>`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    last_segment(ty)
        .filter(|segment| segment.ident == "Option")
        .and_then(first_type_argument)
}

pub fn is_option(ty: &Type) -> bool {
    option_inner(ty).is_some()
}

/// Element type of a collection (`T` for `Vec<T>`), ignoring `Option`.
pub fn collection_inner(ty: &Type) -> Option<&Type> {
    last_segment(strip_option(ty))
        .filter(|segment| COLLECTION_TYPES.iter().any(|name| segment.ident == name))
        .and_then(first_type_argument)
}

/// Whether the type is a collection, or an `Option` of one.
pub fn is_collection(ty: &Type) -> bool {
    collection_inner(ty).is_some()
}

/// `T` for `Option<T>`, the type itself otherwise.
pub fn strip_option(ty: &Type) -> &Type {
    option_inner(ty).unwrap_or(ty)
}

/// The scalar a field holds: wrappers and one collection level removed.
///
/// `Option<Vec<String>>` and `String` both give `String`.
pub fn element_type(ty: &Type) -> &Type {
    collection_inner(ty).unwrap_or_else(|| strip_option(ty))
}

/// `String`, `str` and `&str` compare against `''` for emptiness.
pub fn is_text(ty: &Type) -> bool {
    match strip_option(ty) {
        Type::Reference(reference) => is_text(&reference.elem),
        other => last_ident(other).is_some_and(|ident| ident == "String" || ident == "str"),
    }
}

/// `Option<ty>`, unless `ty` already is one.
pub fn wrap_option(ty: &Type) -> Type {
    if is_option(ty) {
        ty.clone()
    } else {
        syn::parse_quote!(Option<#ty>)
    }
}

/// Replace the element type, keeping the `Option` and collection wrappers around it.
///
/// `rewrap(Option<Vec<Tag>>, |_| Uuid)` gives `Option<Vec<Uuid>>`.
pub fn rewrap(ty: &Type, element: impl FnOnce(&Type) -> Type) -> Type {
    let Type::Path(type_path) = ty else {
        return element(ty);
    };
    let is_wrapper = last_segment(ty).is_some_and(|segment| {
        segment.ident == "Option" || COLLECTION_TYPES.iter().any(|name| segment.ident == name)
    });
    if !is_wrapper {
        return element(ty);
    }

    let mut rebuilt = type_path.clone();
    if let Some(segment) = rebuilt.path.segments.last_mut()
        && let PathArguments::AngleBracketed(args) = &mut segment.arguments
        && let Some(GenericArgument::Type(inner)) = args
            .args
            .iter_mut()
            .find(|arg| matches!(arg, GenericArgument::Type(_)))
    {
        *inner = rewrap(inner, element);
        return Type::Path(rebuilt);
    }
    element(ty)
}

/// Parse a Rust type from source text.
pub fn parse_type(source: &str) -> Result<Type, CodegenError> {
    syn::parse_str(source).map_err(|error| CodegenError::invalid_type(source, &error))
}

/// `deserialize_with` adapter reading a type written as a string.
pub(crate) fn deserialize_type<'de, D>(deserializer: D) -> Result<Type, D::Error>
where
    D: Deserializer<'de>,
{
    let source = String::deserialize(deserializer)?;
    parse_type(&source).map_err(serde::de::Error::custom)
}
