//! Identifier construction for generated members.

use heck::ToSnakeCase;
use proc_macro2::{Ident, Span};

/// Words whose singular is not derived by suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("criteria", "criterion"),
    ("analyses", "analysis"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("lives", "life"),
];

/// Words with the same singular and plural form.
const UNCOUNTABLE: &[&str] = &[
    "data", "metadata", "series", "species", "news", "sheep", "fish", "deer", "equipment",
    "information", "media",
];

/// English singular of a snake_case name; only the last word changes.
///
/// `tags` -> `tag`, `blog_categories` -> `blog_category`, `people` -> `person`.
#[must_use]
pub fn singularize(name: &str) -> String {
    let (head, word) = match name.rfind('_') {
        Some(index) => name.split_at(index + 1),
        None => ("", name),
    };
    format!("{head}{}", singular_word(word))
}

fn singular_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return (*singular).to_string();
    }

    let strip = |suffix: &str, replacement: &str| -> String {
        format!("{}{replacement}", &word[..word.len() - suffix.len()])
    };
    if lower.len() > 3 && lower.ends_with("ies") {
        strip("ies", "y")
    } else if ["sses", "xes", "ches", "shes", "zzes", "oes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        strip("es", "")
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.to_string()
    } else if lower.len() > 1 && lower.ends_with('s') {
        strip("s", "")
    } else {
        word.to_string()
    }
}

/// Flattened accessor name for `field` reached through `prefix`.
///
/// `("", "title")` -> `title`, `("author", "name")` -> `author_name`.
#[must_use]
pub fn property_name(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_snake_case()
    } else {
        format!("{prefix}_{field}").to_snake_case()
    }
}

/// Parse `name` as an identifier, falling back to a raw identifier for keywords.
///
/// `None` when no identifier can spell the name (`self`, `1st`, `a-b`).
#[must_use]
pub fn field_ident(name: &str) -> Option<Ident> {
    if let Ok(ident) = syn::parse_str::<Ident>(name) {
        return Some(ident);
    }
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_');
    let plain = starts_well && chars.all(|c| c.is_alphanumeric() || c == '_');
    if plain && !matches!(name, "self" | "Self" | "super" | "crate" | "_") {
        Some(Ident::new_raw(name, Span::call_site()))
    } else {
        None
    }
}

/// Identifier for a name already checked by descriptor validation.
#[must_use]
pub fn ident(name: &str) -> Ident {
    field_ident(name).unwrap_or_else(|| Ident::new(&name.to_snake_case(), Span::call_site()))
}
