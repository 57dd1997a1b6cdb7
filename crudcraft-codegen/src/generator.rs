//! One-call generation of everything a model needs.

use crate::config::GeneratorConfig;
use crate::dto::{self, DtoShapeResolver};
use crate::error::{CodegenError, Result};
use crate::model::{ModelDescriptor, ModelReader};
use crate::render::render_tokens;
use crate::search::{
    PredicateGeneratorRegistry, PropertySpec, SearchField, SearchFieldCollector,
    generate_search_request,
};
use crate::types::TypeMapper;
use proc_macro2::TokenStream;
use quote::quote;

/// Generated items of one model, grouped by the module they belong in.
#[derive(Debug, Clone)]
pub struct GeneratedModel {
    name: String,
    search_fields: Vec<SearchField>,
    search_request: TokenStream,
    request: TokenStream,
    response: TokenStream,
}

/// [`GeneratedModel`] formatted as source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModel {
    /// `{Model}SearchRequest`
    pub search_request: String,
    /// `{Model}Request`, for `dto::request`
    pub request: String,
    /// `{Model}Response`, its variants and `{Model}Ref`, for `dto::response`
    pub response: String,
}

impl GeneratedModel {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The flattened fields the search request was built from.
    #[must_use]
    pub fn search_fields(&self) -> &[SearchField] {
        &self.search_fields
    }

    #[must_use]
    pub const fn search_request(&self) -> &TokenStream {
        &self.search_request
    }

    #[must_use]
    pub const fn request(&self) -> &TokenStream {
        &self.request
    }

    #[must_use]
    pub const fn response(&self) -> &TokenStream {
        &self.response
    }

    /// Every generated item in one stream.
    #[must_use]
    pub fn to_tokens(&self) -> TokenStream {
        let Self {
            search_request,
            request,
            response,
            ..
        } = self;
        quote! {
            #search_request
            #request
            #response
        }
    }

    pub fn render(&self) -> Result<RenderedModel> {
        Ok(RenderedModel {
            search_request: render_tokens(&self.name, &self.search_request)?,
            request: render_tokens(&self.name, &self.request)?,
            response: render_tokens(&self.name, &self.response)?,
        })
    }
}

/// Generates search requests and DTOs for models resolved through `R`.
pub struct Generator<R> {
    reader: R,
    config: GeneratorConfig,
    mapper: TypeMapper,
    predicates: PredicateGeneratorRegistry,
    runtime: syn::Path,
    id_type: syn::Type,
}

impl<R: ModelReader> Generator<R> {
    /// Fails when the configured type paths do not parse.
    pub fn new(reader: R, config: GeneratorConfig) -> Result<Self> {
        let runtime = config.runtime_crate()?;
        let id_type = config.id_type()?;
        Ok(Self {
            reader,
            config,
            mapper: TypeMapper::default(),
            predicates: PredicateGeneratorRegistry::standard(),
            runtime,
            id_type,
        })
    }

    #[must_use]
    pub fn with_type_mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    #[must_use]
    pub fn with_predicates(mut self, predicates: PredicateGeneratorRegistry) -> Self {
        self.predicates = predicates;
        self
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Search fields of `model`, seeded with its own depth or the configured one.
    pub fn collect_search_fields(&self, model: &ModelDescriptor) -> Vec<SearchField> {
        let depth = model.search_depth().unwrap_or(self.config.search.depth);
        SearchFieldCollector::from_config(&self.reader, &self.config.search).collect(model, depth)
    }

    /// Generate the search request and DTOs of `model_name`.
    ///
    /// Abstract models produce nothing and yield `None`.
    pub fn generate(&self, model_name: &str) -> Result<Option<GeneratedModel>> {
        let model = self
            .reader
            .resolve(model_name)
            .ok_or_else(|| CodegenError::UnknownModel {
                name: model_name.to_string(),
            })?;
        if model.is_abstract() {
            tracing::debug!(model = model.name(), "skipping abstract model");
            return Ok(None);
        }
        self.generate_model(&model).map(Some)
    }

    /// Generate every named model, skipping abstract ones.
    pub fn generate_all<'a>(
        &self,
        model_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<GeneratedModel>> {
        let mut generated = Vec::new();
        let mut skipped = 0_usize;
        for name in model_names {
            match self.generate(name)? {
                Some(model) => generated.push(model),
                None => skipped += 1,
            }
        }
        tracing::info!(generated = generated.len(), skipped, "generation finished");
        Ok(generated)
    }

    fn generate_model(&self, model: &ModelDescriptor) -> Result<GeneratedModel> {
        model.validate()?;
        let search_fields = self.collect_search_fields(model);
        let properties = PropertySpec::from_search_fields(&search_fields, &self.mapper);
        let search_request =
            generate_search_request(model, &properties, &self.predicates, &self.runtime)?;

        let resolver = DtoShapeResolver::new(&self.reader, self.id_type.clone());
        let request = dto::generate_request_dto(model, &resolver)?;
        let mut response = vec![dto::generate_response_dto(model, &resolver, None)?];
        for variant in dto::response_variants(model) {
            response.push(dto::generate_response_dto(model, &resolver, Some(&variant))?);
        }
        if model.id_field().is_some() {
            response.push(dto::generate_ref_dto(model, &resolver)?);
        } else {
            tracing::debug!(model = model.name(), "no id field, skipping Ref DTO");
        }

        tracing::debug!(
            model = model.name(),
            search_fields = search_fields.len(),
            properties = properties.len(),
            "generated model"
        );
        Ok(GeneratedModel {
            name: model.name().to_string(),
            search_fields,
            search_request,
            request,
            response: quote!(#(#response)*),
        })
    }
}
