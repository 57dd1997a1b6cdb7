use super::resolver::{DtoField, DtoFlavor, DtoShapeResolver};
use crate::error::{CodegenError, Result};
use crate::model::{ModelDescriptor, ModelReader};
use crate::types::type_utils;
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeSet;

/// `{Model}Request`: public fields, relationships as identifiers.
pub fn generate_request_dto<R: ModelReader>(
    model: &ModelDescriptor,
    resolver: &DtoShapeResolver<R>,
) -> Result<TokenStream> {
    let name = format_ident!("{}{}", model.name(), DtoFlavor::Request.suffix());
    let doc = format!("Write-side projection of `{}`.", model.name());
    let mut fields = Vec::new();
    for descriptor in model.fields().iter().filter(|field| DtoFlavor::Request.includes(field)) {
        let field = resolver.resolve(model, descriptor, DtoFlavor::Request)?;
        let ident = field.ident();
        let ty = field.ty();
        let docs = descriptor
            .validations()
            .iter()
            .map(|validation| format!("Validation: `{validation}`"));
        fields.push(quote! {
            #(#[doc = #docs])*
            pub #ident: #ty
        });
    }

    Ok(quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize, ::utoipa::ToSchema)]
        #[serde(rename_all = "camelCase")]
        pub struct #name {
            #(#fields,)*
        }
    })
}

/// `{Model}Response`, or `{Model}{Variant}Response` with only the fields naming `variant`.
pub fn generate_response_dto<R: ModelReader>(
    model: &ModelDescriptor,
    resolver: &DtoShapeResolver<R>,
    variant: Option<&str>,
) -> Result<TokenStream> {
    let mut fields = Vec::new();
    for descriptor in model.fields() {
        let included = match variant {
            Some(variant) => descriptor.response_dto_names().contains(variant),
            None => DtoFlavor::Response.includes(descriptor),
        };
        if included {
            fields.push(resolver.resolve(model, descriptor, DtoFlavor::Response)?);
        }
    }

    let (name, doc) = match variant {
        Some(variant) => (
            format_ident!("{}{}Response", model.name(), variant.to_case(Case::Pascal)),
            format!("`{variant}` read-side projection of `{}`.", model.name()),
        ),
        None => (
            format_ident!("{}Response", model.name()),
            format!("Read-side projection of `{}`.", model.name()),
        ),
    };
    Ok(read_side_struct(&name, &doc, &fields))
}

/// `{Model}Ref`. Fails when the model has no `id` field.
pub fn generate_ref_dto<R: ModelReader>(
    model: &ModelDescriptor,
    resolver: &DtoShapeResolver<R>,
) -> Result<TokenStream> {
    if model.id_field().is_none() {
        return Err(CodegenError::MissingIdentity {
            model: model.qualified_name(),
            purpose: "a Ref DTO".to_string(),
        });
    }
    let fields = resolver.resolve_all(model, DtoFlavor::Ref)?;
    let name = format_ident!("{}{}", model.name(), DtoFlavor::Ref.suffix());
    let doc = format!("Reference to a `{}`.", model.name());
    Ok(read_side_struct(&name, &doc, &fields))
}

/// Every extra response variant named by a field of `model`.
#[must_use]
pub fn response_variants(model: &ModelDescriptor) -> BTreeSet<String> {
    model
        .fields()
        .iter()
        .flat_map(|field| field.response_dto_names().iter().cloned())
        .collect()
}

/// Private fields, borrowed getters and a `new` that collects collection arguments.
fn read_side_struct(name: &syn::Ident, doc: &str, fields: &[DtoField]) -> TokenStream {
    let mut declarations = Vec::new();
    let mut getters = Vec::new();
    let mut parameters = Vec::new();
    let mut initializers = Vec::new();

    for field in fields {
        let ident = field.ident();
        let ty = field.ty();
        declarations.push(quote!(#ident: #ty));
        getters.push(quote! {
            #[must_use]
            pub fn #ident(&self) -> &#ty {
                &self.#ident
            }
        });

        match type_utils::collection_inner(ty).filter(|_| field.copy_on_construct()) {
            Some(element) if type_utils::is_option(ty) => {
                parameters.push(quote!(#ident: Option<impl IntoIterator<Item = #element>>));
                initializers.push(quote!(#ident: #ident.map(|values| values.into_iter().collect())));
            }
            Some(element) => {
                parameters.push(quote!(#ident: impl IntoIterator<Item = #element>));
                initializers.push(quote!(#ident: #ident.into_iter().collect()));
            }
            None => {
                parameters.push(quote!(#ident: #ty));
                initializers.push(quote!(#ident));
            }
        }
    }

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize, ::utoipa::ToSchema)]
        #[serde(rename_all = "camelCase")]
        pub struct #name {
            #(#declarations,)*
        }

        impl #name {
            #[must_use]
            #[allow(clippy::too_many_arguments)]
            pub fn new(#(#parameters),*) -> Self {
                Self {
                    #(#initializers,)*
                }
            }

            #(#getters)*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDescriptor, ModelRegistry, RelationshipKind};
    use syn::parse_quote;

    fn author() -> ModelDescriptor {
        ModelDescriptor::new("Author", "crate::models")
            .with_field(FieldDescriptor::new("id", parse_quote!(Uuid)))
            .with_field(
                FieldDescriptor::new("name", parse_quote!(String))
                    .with_in_ref(true)
                    .with_validation("length(min = 1)")
                    .with_response_dto("summary"),
            )
            .with_field(
                FieldDescriptor::new("posts", parse_quote!(Vec<Post>))
                    .with_relationship(RelationshipKind::OneToMany, "crate::models::Post")
                    .with_response_dto("summary"),
            )
            .with_field(
                FieldDescriptor::new("nicknames", parse_quote!(Option<Vec<String>>))
                    .with_in_request(false),
            )
    }

    fn resolver() -> DtoShapeResolver<ModelRegistry> {
        DtoShapeResolver::new(ModelRegistry::new(), parse_quote!(::uuid::Uuid))
    }

    fn parse(tokens: TokenStream) -> syn::File {
        syn::parse2(tokens).unwrap()
    }

    fn struct_fields(file: &syn::File) -> Vec<String> {
        let syn::Item::Struct(item) = &file.items[0] else {
            panic!("expected struct");
        };
        item.fields
            .iter()
            .filter_map(|field| field.ident.as_ref().map(ToString::to_string))
            .collect()
    }

    #[test]
    fn test_request_dto_has_public_id_fields() {
        let file = parse(generate_request_dto(&author(), &resolver()).unwrap());
        assert_eq!(struct_fields(&file), ["id", "name", "post_ids"]);
        let rendered = quote!(#file).to_string();
        assert!(rendered.contains("pub post_ids : Vec < :: uuid :: Uuid >"), "{rendered}");
        assert!(rendered.contains("Validation: `length(min = 1)`"), "{rendered}");
    }

    #[test]
    fn test_response_dto_collects_collections_in_new() {
        let file = parse(generate_response_dto(&author(), &resolver(), None).unwrap());
        assert_eq!(struct_fields(&file), ["id", "name", "posts", "nicknames"]);
        let rendered = quote!(#file).to_string();
        assert!(
            rendered.contains("posts : impl IntoIterator < Item = crate :: models :: dto :: response :: PostRef >"),
            "{rendered}"
        );
        assert!(rendered.contains("posts : posts . into_iter () . collect ()"), "{rendered}");
        assert!(
            rendered.contains("nicknames : Option < impl IntoIterator < Item = String > >"),
            "{rendered}"
        );
        assert!(rendered.contains("pub fn name (& self) -> & String"), "{rendered}");
    }

    #[test]
    fn test_named_variant_only_keeps_its_fields() {
        let model = author();
        assert_eq!(response_variants(&model).into_iter().collect::<Vec<_>>(), ["summary"]);
        let file = parse(generate_response_dto(&model, &resolver(), Some("summary")).unwrap());
        let syn::Item::Struct(item) = &file.items[0] else {
            panic!("expected struct");
        };
        assert_eq!(item.ident, "AuthorSummaryResponse");
        assert_eq!(struct_fields(&file), ["name", "posts"]);
    }

    #[test]
    fn test_ref_dto_requires_identity() {
        let file = parse(generate_ref_dto(&author(), &resolver()).unwrap());
        assert_eq!(struct_fields(&file), ["id", "name"]);

        let anonymous = ModelDescriptor::new("Address", "crate::geo")
            .with_field(FieldDescriptor::new("street", parse_quote!(String)));
        let err = generate_ref_dto(&anonymous, &resolver()).unwrap_err();
        assert!(matches!(err, CodegenError::MissingIdentity { .. }));
    }
}
