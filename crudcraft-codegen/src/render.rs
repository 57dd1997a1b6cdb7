use crate::error::{CodegenError, Result};
use proc_macro2::TokenStream;

/// First line of every rendered file.
pub const GENERATED_HEADER: &str = "// @generated by crudcraft-codegen. Do not edit.";

/// Format generated items for `model` as a Rust source file with prettyplease.
///
/// Fails with [`CodegenError::Render`] when the tokens do not parse as a file.
pub fn render_tokens(model: &str, tokens: &TokenStream) -> Result<String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|error| CodegenError::Render {
        model: model.to_string(),
        message: error.to_string(),
    })?;
    let formatted = prettyplease::unparse(&file);
    tracing::trace!(model, lines = formatted.lines().count(), "rendered generated code");
    Ok(format!("{GENERATED_HEADER}\n\n{formatted}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn test_render_formats_items() {
        let rendered = render_tokens("Tag", &quote!(pub struct TagRef { id: i64 })).unwrap();
        assert!(rendered.starts_with(GENERATED_HEADER));
        assert!(rendered.contains("pub struct TagRef {\n    id: i64,\n}"), "{rendered}");
    }

    #[test]
    fn test_render_rejects_non_items() {
        let err = render_tokens("Tag", &quote!(let x = 1;)).unwrap_err();
        assert!(matches!(err, CodegenError::Render { model, .. } if model == "Tag"));
    }
}
