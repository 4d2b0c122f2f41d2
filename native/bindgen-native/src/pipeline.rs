//! End-to-end generation: header text in, model and artifacts out.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::cache::IncrementalCache;
use crate::config::BindgenOptions;
use crate::emit::{BindingArtifacts, BindingEmitter};
use crate::error::{BindgenError, Result};
use crate::metadata::{BindingModel, ModelBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBindings {
    pub model: BindingModel,
    pub artifacts: BindingArtifacts,
}

/// Parse `header` and render both artifacts.
///
/// Malformed declarations are reported in `model.diagnostics`; an empty
/// model is not an error here, see `generate_bindings_strict`.
pub fn generate_bindings(header: &str, options: &BindgenOptions) -> Result<GeneratedBindings> {
    let model = ModelBuilder::new(options)?.build(header);
    Ok(render(model, options))
}

/// Like `generate_bindings`, but zero recognised functions is an error.
pub fn generate_bindings_strict(header: &str, options: &BindgenOptions) -> Result<GeneratedBindings> {
    let generated = generate_bindings(header, options)?;
    if generated.model.is_empty() {
        return Err(BindgenError::NoFunctions);
    }
    Ok(generated)
}

/// Reuse a cached model for `header_path` when header and options are unchanged.
pub fn generate_bindings_cached(
    cache: &IncrementalCache,
    header_path: &str,
    header: &str,
    options: &BindgenOptions,
) -> Result<GeneratedBindings> {
    let model = match cache.get(header_path, header, options) {
        Some(model) => model,
        None => {
            let model = ModelBuilder::new(options)?.build(header);
            if let Err(e) = cache.set(header_path, header, options, &model) {
                warn!("Failed to write cache entry for {}: {}", header_path, e);
            }
            model
        }
    };
    Ok(render(model, options))
}

fn render(model: BindingModel, options: &BindgenOptions) -> GeneratedBindings {
    let artifacts = BindingEmitter::new(options.clone()).emit(&model.functions);
    GeneratedBindings { model, artifacts }
}
