//! Generates the models in `models/article.toml` with the settings in
//! `crudcraft.toml` into `OUT_DIR` so the
//! `generated_code` tests compile real generator output.

use crudcraft_codegen::config::SEARCH_DEPTH_ENV;
use crudcraft_codegen::{Generator, GeneratorConfig, ModelRegistry};
use std::path::PathBuf;

const MANIFEST: &str = "models/article.toml";
const CONFIG: &str = "crudcraft.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={MANIFEST}");
    println!("cargo:rerun-if-changed={CONFIG}");
    println!("cargo:rerun-if-env-changed={SEARCH_DEPTH_ENV}");

    let registry = ModelRegistry::from_manifest_file(MANIFEST)?;
    let config = GeneratorConfig::from_file(CONFIG)?.with_env_overrides()?;
    let generator = Generator::new(registry, config)?;
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    for model in generator.generate_all(["Article"])? {
        let rendered = model.render()?;
        let source = [rendered.search_request, rendered.request, rendered.response].join("\n");
        let file_name = format!("{}.rs", model.name().to_lowercase());
        std::fs::write(out_dir.join(file_name), source)?;
    }
    Ok(())
}
