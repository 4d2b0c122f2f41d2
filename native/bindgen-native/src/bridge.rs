//! Node bindings for the JavaScript build script.

use napi_derive::napi;

use crate::config::BindgenOptions;
use crate::metadata::Diagnostic;
use crate::pipeline::generate_bindings;
use crate::types::map_type;

#[napi(object)]
pub struct DiagnosticJs {
    pub code: String,
    pub message: String,
    pub preview: String,
}

impl From<Diagnostic> for DiagnosticJs {
    fn from(d: Diagnostic) -> Self {
        Self {
            code: d.code,
            message: d.message,
            preview: d.preview,
        }
    }
}

#[napi(object)]
pub struct BindingOutput {
    pub export_symbols: Vec<String>,
    pub exported_functions_flag: String,
    pub exported_runtime_methods_flag: String,
    pub declaration_document: String,
    pub function_count: u32,
    pub diagnostics: Vec<DiagnosticJs>,
}

#[napi]
pub fn generate_bindings_native(
    header: String,
    options_json: Option<String>,
) -> napi::Result<BindingOutput> {
    let options = match options_json {
        Some(json) => BindgenOptions::from_json(&json)
            .map_err(|e| napi::Error::from_reason(e.to_string()))?,
        None => BindgenOptions::default(),
    };

    let generated = generate_bindings(&header, &options)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    Ok(BindingOutput {
        exported_functions_flag: generated.artifacts.exported_functions_flag(),
        exported_runtime_methods_flag: generated.artifacts.exported_runtime_methods_flag(),
        function_count: generated.model.functions.len() as u32,
        export_symbols: generated.artifacts.export_symbols,
        declaration_document: generated.artifacts.declaration_document,
        diagnostics: generated
            .model
            .diagnostics
            .into_iter()
            .map(DiagnosticJs::from)
            .collect(),
    })
}

/// Declaration-document type for a C type, e.g. `("double", true)` -> `"number"`.
#[napi]
pub fn map_c_type_native(c_type: String, is_pointer: bool) -> String {
    map_type(&c_type, is_pointer).ts_name().to_string()
}
