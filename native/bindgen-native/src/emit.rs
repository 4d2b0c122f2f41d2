//! Binding emitter.
//!
//! Renders the canonical descriptor list into the export-symbol list handed
//! to the compiler and the TypeScript declaration document. Both renderings
//! keep the order of the list they are given.

use serde::{Deserialize, Serialize};

use crate::config::BindgenOptions;
use crate::error::{BindgenError, Result};
use crate::signature::FunctionDescriptor;

pub const DECLARATIONS_PLACEHOLDER: &str = "###OTHER_CODE###";

const DEFAULT_TEMPLATE: &str = r#"/// <reference types="emscripten" />

/**
 * TypeScript bindings for the Swisseph Emscripten-generated WebAssembly module.
 * Extends the EmscriptenModule with custom wrapped native functions.
 */
export interface SwissephModule extends EmscriptenModule {
    // --- Standard Emscripten Runtime Methods ---
    /** Sets a value in the WebAssembly heap memory. */
    setValue: typeof setValue;

    /** Retrieves a value from the WebAssembly heap memory. */
    getValue: typeof getValue;

    /** Converts a JavaScript string to a UTF-8 encoded string in the WebAssembly memory. */
    stringToUTF8: typeof stringToUTF8;

    /** Converts a UTF-8 encoded string from the WebAssembly memory to a JavaScript string. */
    UTF8ToString: typeof UTF8ToString;

    /** Returns the number of bytes required to encode a JavaScript string as UTF-8. */
    lengthBytesUTF8: typeof lengthBytesUTF8;

    /** Provides access to the Emscripten virtual file system. */
    FS: typeof FS;

    /**
     * Frees allocated memory in the WebAssembly heap.
     *
     * Equivalent to `free(void* ptr)` in C.
     * @param ptr Pointer to the memory location to free.
     */
    _free(ptr: number): void;

    /**
     * Allocates memory in the WebAssembly heap.
     *
     * Equivalent to `malloc(size_t size)` in C.
     * @param size Number of bytes to allocate.
     * @returns A pointer to the beginning of the allocated memory block.
     */
    _malloc(size: number): number;

    // --- Exported Swisseph C Functions ---
###OTHER_CODE###
}

/**
 * Initializes and returns the Swisseph WebAssembly module.
 *
 * @param moduleArg - Optional configuration object for the Emscripten module.
 * @returns A Promise that resolves to the initialized Swisseph instance.
 */
export default function Module(moduleArg?: Partial<EmscriptenModule>): Promise<SwissephModule>;
"#;

// ═══════════════════════════════════════════════════════════════════════════════
// TEMPLATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Declaration document skeleton with exactly one placeholder.
#[derive(Debug, Clone)]
pub struct DeclarationTemplate {
    text: String,
}

impl DeclarationTemplate {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let occurrences = text.matches(DECLARATIONS_PLACEHOLDER).count();
        if occurrences != 1 {
            return Err(BindgenError::InvalidTemplate { occurrences });
        }
        Ok(Self { text })
    }

    pub fn render(&self, declarations: &str) -> String {
        self.text.replace(DECLARATIONS_PLACEHOLDER, declarations)
    }
}

impl Default for DeclarationTemplate {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ARTIFACTS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingArtifacts {
    pub export_symbols: Vec<String>,
    pub runtime_methods: Vec<String>,
    pub declaration_document: String,
}

impl BindingArtifacts {
    /// `-sEXPORTED_FUNCTIONS=[...]` value for emcc.
    pub fn exported_functions_flag(&self) -> String {
        format!("-sEXPORTED_FUNCTIONS=[{}]", self.export_symbols.join(","))
    }

    /// `-sEXPORTED_RUNTIME_METHODS=[...]` value for emcc.
    pub fn exported_runtime_methods_flag(&self) -> String {
        format!(
            "-sEXPORTED_RUNTIME_METHODS=[{}]",
            self.runtime_methods.join(",")
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EMITTER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct BindingEmitter {
    options: BindgenOptions,
    template: DeclarationTemplate,
}

impl BindingEmitter {
    pub fn new(options: BindgenOptions) -> Self {
        Self::with_template(options, DeclarationTemplate::default())
    }

    pub fn with_template(options: BindgenOptions, template: DeclarationTemplate) -> Self {
        Self { options, template }
    }

    pub fn emit(&self, functions: &[FunctionDescriptor]) -> BindingArtifacts {
        BindingArtifacts {
            export_symbols: self.export_symbols(functions),
            runtime_methods: self.options.runtime_methods.clone(),
            declaration_document: self.declaration_document(functions),
        }
    }

    /// Runtime allocator symbols followed by one prefixed symbol per function.
    pub fn export_symbols(&self, functions: &[FunctionDescriptor]) -> Vec<String> {
        self.options
            .runtime_symbols
            .iter()
            .cloned()
            .chain(functions.iter().map(|f| self.options.symbol_for(&f.name)))
            .collect()
    }

    pub fn declaration_document(&self, functions: &[FunctionDescriptor]) -> String {
        let blocks: Vec<String> = functions
            .iter()
            .map(|f| self.render_function(f))
            .collect();
        self.template.render(&blocks.join("\n\n"))
    }

    /// JSDoc block plus the callable signature, indented for the interface body.
    pub fn render_function(&self, function: &FunctionDescriptor) -> String {
        let mut lines = vec!["    /**".to_string()];
        for param in &function.parameters {
            lines.push(format!(
                "     * @param {{{}}} {} - C Type: `{}`",
                param.mapped_type,
                param.name,
                param.display_c_type()
            ));
        }
        lines.push(format!(
            "     * @returns {{{}}} - C Type: `{}`",
            function.return_mapped_type,
            function.display_return_c_type()
        ));
        lines.push("     */".to_string());

        let args = function
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.mapped_type))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "    {}({}): {};",
            self.options.symbol_for(&function.name),
            args,
            function.return_mapped_type
        ));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::SignatureParser;

    fn descriptor(candidate: &str) -> FunctionDescriptor {
        SignatureParser::new("ext_def").unwrap().parse(candidate).unwrap()
    }

    #[test]
    fn test_export_symbols() {
        let emitter = BindingEmitter::new(BindgenOptions::default());
        let functions = vec![
            descriptor("ext_def(void) swe_close(void);"),
            descriptor("ext_def(double) swe_deg_midp(double x1, double x0);"),
        ];
        let artifacts = emitter.emit(&functions);
        assert_eq!(
            artifacts.export_symbols,
            vec!["_free", "_malloc", "_swe_close", "_swe_deg_midp"]
        );
        assert_eq!(
            artifacts.exported_functions_flag(),
            "-sEXPORTED_FUNCTIONS=[_free,_malloc,_swe_close,_swe_deg_midp]"
        );
        assert_eq!(
            artifacts.exported_runtime_methods_flag(),
            "-sEXPORTED_RUNTIME_METHODS=[setValue,getValue,stringToUTF8,UTF8ToString,lengthBytesUTF8,FS]"
        );
    }

    #[test]
    fn test_render_function_block() {
        let emitter = BindingEmitter::new(BindgenOptions::default());
        let block = emitter.render_function(&descriptor(
            "ext_def(char *) swe_get_planet_name(int ipl, char *spname);",
        ));
        let expected = [
            "    /**",
            "     * @param {number} ipl - C Type: `int`",
            "     * @param {number} spname - C Type: `char*`",
            "     * @returns {number} - C Type: `char*`",
            "     */",
            "    _swe_get_planet_name(ipl: number, spname: number): number;",
        ]
        .join("\n");
        assert_eq!(block, expected);
    }

    #[test]
    fn test_unknown_and_void_rendering() {
        let emitter = BindingEmitter::new(BindgenOptions::default());
        let block = emitter.render_function(&descriptor("ext_def(void) swe_set(HANDLE h);"));
        assert!(block.contains("@param {unknown} h - C Type: `HANDLE`"));
        assert!(block.ends_with("_swe_set(h: unknown): void;"));
    }

    #[test]
    fn test_document_substitution() {
        let emitter = BindingEmitter::new(BindgenOptions::default());
        let doc = emitter.declaration_document(&[
            descriptor("ext_def(void) swe_close(void);"),
            descriptor("ext_def(double) swe_deg_midp(double x1, double x0);"),
        ]);
        assert!(!doc.contains(DECLARATIONS_PLACEHOLDER));
        assert!(doc.contains("export interface SwissephModule extends EmscriptenModule {"));
        assert!(doc.contains("    _swe_close(): void;\n\n    /**"));
        assert!(doc.contains("    _swe_deg_midp(x1: number, x0: number): number;\n}"));
        let close = doc.find("_swe_close(").unwrap();
        let midp = doc.find("_swe_deg_midp(").unwrap();
        assert!(close < midp);
    }

    #[test]
    fn test_custom_template() {
        let template = DeclarationTemplate::new("declare module 'x' {\n###OTHER_CODE###\n}").unwrap();
        let options = BindgenOptions {
            symbol_prefix: String::new(),
            ..BindgenOptions::default()
        };
        let emitter = BindingEmitter::with_template(options, template);
        let doc = emitter.declaration_document(&[descriptor("ext_def(int) f(void);")]);
        assert!(doc.starts_with("declare module 'x' {\n    /**"));
        assert!(doc.contains("    f(): number;\n}"));
    }

    #[test]
    fn test_template_placeholder_count() {
        assert!(matches!(
            DeclarationTemplate::new("no placeholder"),
            Err(BindgenError::InvalidTemplate { occurrences: 0 })
        ));
        assert!(matches!(
            DeclarationTemplate::new("###OTHER_CODE### ###OTHER_CODE###"),
            Err(BindgenError::InvalidTemplate { occurrences: 2 })
        ));
        assert_eq!(
            DEFAULT_TEMPLATE.matches(DECLARATIONS_PLACEHOLDER).count(),
            1
        );
    }
}
