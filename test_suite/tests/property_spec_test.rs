/// Property specs and type mapping
///
/// Tests that merged operator sets produce one field group per family, that
/// value types go through the type mapper (including custom mappings), and
/// that mapping is idempotent for arbitrarily nested wrappers.
mod common;

use common::blog;
use crudcraft::SearchOperator;
use crudcraft_codegen::search::SearchRequestBuilder;
use crudcraft_codegen::{
    FieldDescriptor, ModelDescriptor, ModelRegistry, PropertySpec, SearchFieldCollector,
    TypeMapper,
};
use proptest::prelude::*;
use quote::quote;
use rstest::rstest;
use syn::parse_quote;

fn spec_with(field: FieldDescriptor, mapper: &TypeMapper) -> PropertySpec {
    let model = ModelDescriptor::new("Listing", "crate").with_field(field);
    let fields = SearchFieldCollector::new(ModelRegistry::new()).collect(&model, 1);
    let mut specs = PropertySpec::from_search_fields(&fields, mapper);
    assert_eq!(specs.len(), 1);
    specs.remove(0)
}

fn member_names(spec: &PropertySpec) -> Vec<String> {
    let mut builder = SearchRequestBuilder::new("Listing", parse_quote!(::crudcraft));
    spec.add_members(&mut builder);
    let file: syn::File = syn::parse2(builder.build()).unwrap();
    let syn::Item::Struct(item) = &file.items[0] else {
        panic!("expected the request struct first");
    };
    item.fields
        .iter()
        .skip(1)
        .filter_map(|field| field.ident.as_ref().map(ToString::to_string))
        .collect()
}

#[rstest]
#[case::values(&[SearchOperator::Equals, SearchOperator::Contains], &["price", "price_op"])]
#[case::range(&[SearchOperator::Gt, SearchOperator::Between], &["price_start", "price_end", "price_op"])]
#[case::size(&[SearchOperator::SizeGt], &["price_size", "price_size_op"])]
#[case::values_and_range(&[SearchOperator::In, SearchOperator::Lte], &["price", "price_start", "price_end", "price_op"])]
#[case::emptiness_only(&[SearchOperator::NotEmpty], &["price_op"])]
fn test_one_field_group_per_family(
    #[case] operators: &[SearchOperator],
    #[case] expected: &[&str],
) {
    let spec = spec_with(
        FieldDescriptor::new("price", parse_quote!(i64))
            .searchable()
            .with_operators(operators.iter().copied()),
        &TypeMapper::default(),
    );
    assert_eq!(member_names(&spec), expected);
    assert_eq!(spec.default_operator(), operators[0]);
}

#[test]
fn test_flattened_properties_merge_per_name() {
    let registry = blog();
    let fields = SearchFieldCollector::new(&registry)
        .collect_named("BlogPost", 2)
        .unwrap();
    let specs = PropertySpec::from_search_fields(&fields, &TypeMapper::default());
    let names: Vec<&str> = specs.iter().map(PropertySpec::name).collect();
    assert_eq!(names, ["title", "author_name", "author_email"]);
    assert!(specs.iter().all(|spec| spec.search_fields().len() == 1));
}

#[test]
fn test_value_type_is_mapped() {
    let spec = spec_with(
        FieldDescriptor::new("opened_at", parse_quote!(Option<DateTime<Utc>>))
            .searchable()
            .with_operators([SearchOperator::Before]),
        &TypeMapper::default(),
    );
    let ty = spec.value_type();
    assert_eq!(
        quote!(#ty).to_string(),
        ":: chrono :: DateTime < :: chrono :: Utc >"
    );
}

#[test]
fn test_custom_mapping_reaches_generated_fields() {
    let mapper = TypeMapper::builder()
        .with_mapping(|ty: &syn::Type| {
            let name = quote!(#ty).to_string();
            (name == "Money").then(|| syn::parse_str::<syn::Type>("::rust_decimal::Decimal").unwrap())
        })
        .build();
    let spec = spec_with(
        FieldDescriptor::new("budget", parse_quote!(Money))
            .searchable()
            .with_operators([SearchOperator::Gte]),
        &mapper,
    );
    let mut builder = SearchRequestBuilder::new("Listing", parse_quote!(::crudcraft));
    spec.add_members(&mut builder);
    let rendered = builder.build().to_string();
    assert!(
        rendered.contains("budget_start : Option < :: rust_decimal :: Decimal >"),
        "{rendered}"
    );
}

#[test]
fn test_container_accessors_never_expose_the_vec() {
    let spec = spec_with(
        FieldDescriptor::new("labels", parse_quote!(Vec<String>))
            .searchable()
            .with_operators([SearchOperator::In]),
        &TypeMapper::default(),
    );
    let mut builder = SearchRequestBuilder::new("Listing", parse_quote!(::crudcraft));
    spec.add_members(&mut builder);
    let rendered = builder.build().to_string();
    assert!(rendered.contains("pub fn labels (& self) -> Option < & [String] >"), "{rendered}");
    assert!(rendered.contains("I : IntoIterator < Item = String >"), "{rendered}");
    assert!(!rendered.contains("& mut Vec"), "{rendered}");
}

/// Wrapper names from the outside in (`Option<Vec<T>>` gives `["Option", "Vec"]`).
fn wrappers(ty: &syn::Type) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = ty;
    while let syn::Type::Path(path) = current
        && let Some(segment) = path.path.segments.last()
        && ["Vec", "Option", "HashSet", "BTreeSet", "VecDeque"]
            .iter()
            .any(|wrapper| segment.ident == wrapper)
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
    {
        names.push(segment.ident.to_string());
        current = inner;
    }
    names
}

fn nested_type() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("String".to_string()),
        Just("i64".to_string()),
        Just("Uuid".to_string()),
        Just("uuid::Uuid".to_string()),
        Just("NaiveDate".to_string()),
        Just("DateTime<Utc>".to_string()),
        Just("DateTime<FixedOffset>".to_string()),
        Just("Decimal".to_string()),
        Just("OffsetDateTime".to_string()),
        Just("crate::models::Tag".to_string()),
    ];
    leaf.prop_recursive(4, 16, 1, |inner| {
        (
            prop_oneof![
                Just("Vec"),
                Just("Option"),
                Just("HashSet"),
                Just("BTreeSet"),
                Just("VecDeque"),
            ],
            inner,
        )
            .prop_map(|(wrapper, inner)| format!("{wrapper}<{inner}>"))
    })
}

proptest! {
    #[test]
    fn prop_mapping_is_idempotent(source in nested_type()) {
        let mapper = TypeMapper::default();
        let ty: syn::Type = syn::parse_str(&source).unwrap();
        let once = mapper.map(Some(&ty));
        let twice = mapper.map(Some(&once));
        prop_assert_eq!(quote!(#once).to_string(), quote!(#twice).to_string());
    }

    #[test]
    fn prop_mapping_keeps_wrapper_shape(source in nested_type()) {
        let ty: syn::Type = syn::parse_str(&source).unwrap();
        let mapped = TypeMapper::default().map(Some(&ty));
        prop_assert_eq!(wrappers(&ty), wrappers(&mapped));
    }
}
