//! Generator configuration.
//!
//! Read from a `crudcraft.toml`:
//!
//! ```toml
//! [search]
//! depth = 2           # crudcraft.search.depth
//! max_path_depth = 2
//!
//! [dto]
//! id_type = "::uuid::Uuid"
//!
//! [output]
//! runtime_crate = "::crudcraft"
//! ```
//!
//! Every key is optional. `CRUDCRAFT_SEARCH_DEPTH` overrides `search.depth`.

use crate::error::{CodegenError, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable overriding [`SearchConfig::depth`].
pub const SEARCH_DEPTH_ENV: &str = "CRUDCRAFT_SEARCH_DEPTH";

pub const DEFAULT_SEARCH_DEPTH: u32 = 2;
pub const DEFAULT_MAX_PATH_DEPTH: usize = 2;
pub const DEFAULT_ID_TYPE: &str = "::uuid::Uuid";
pub const DEFAULT_RUNTIME_CRATE: &str = "::crudcraft";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub search: SearchConfig,
    pub dto: DtoConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Relationship hops the collector may take from a model that sets no depth itself
    pub depth: u32,
    /// Segments allowed in one flattened property path (`author.name` has two),
    /// whatever the depth budget says
    pub max_path_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DtoConfig {
    /// Identifier type used when a relationship target cannot be resolved
    pub id_type: String,
}

impl Default for DtoConfig {
    fn default() -> Self {
        Self {
            id_type: DEFAULT_ID_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Path generated code uses to reach the `crudcraft` runtime
    pub runtime_crate: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CodegenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply `CRUDCRAFT_SEARCH_DEPTH` when set.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(raw) = lookup(SEARCH_DEPTH_ENV) {
            self.search.depth = raw.trim().parse().map_err(|_| {
                CodegenError::Config(format!(
                    "{SEARCH_DEPTH_ENV} must be a non-negative integer, got '{raw}'"
                ))
            })?;
            tracing::debug!(depth = self.search.depth, "search depth overridden from environment");
        }
        Ok(self)
    }

    /// Check that the configured type paths parse.
    pub fn validate(&self) -> Result<()> {
        self.id_type()?;
        self.runtime_crate()?;
        Ok(())
    }

    pub fn id_type(&self) -> Result<syn::Type> {
        syn::parse_str(&self.dto.id_type)
            .map_err(|error| CodegenError::invalid_type(&self.dto.id_type, &error))
    }

    pub fn runtime_crate(&self) -> Result<syn::Path> {
        syn::parse_str(&self.output.runtime_crate)
            .map_err(|error| CodegenError::invalid_type(&self.output.runtime_crate, &error))
    }
}
