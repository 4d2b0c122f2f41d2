//! # Swiss Ephemeris Binding Generator
//!
//! Reads the macro-annotated public header of the Swiss Ephemeris
//! (`ext_def(ret) name(args);` declarations) and produces what the wasm build
//! needs from it:
//!
//! 1. **Export symbols**: `_free`, `_malloc`, then `_name` for every parsed
//!    function, ready for `-sEXPORTED_FUNCTIONS`.
//! 2. **Declaration document**: a `.d.ts` interface with one JSDoc-annotated
//!    signature per function.
//!
//! ## Pipeline
//!
//! header text -> `preprocess` -> `tokenize` (candidates) -> `signature`
//! (descriptors, typed by `types`) -> `metadata` (sorted model plus skip
//! diagnostics) -> `emit` (artifacts).
//!
//! ## Ordering
//!
//! Functions appear in artifacts sorted by name (byte order), never in header
//! order, so regenerated files diff cleanly.

#[cfg(feature = "napi")]
mod bridge;

pub mod cache;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod preprocess;
pub mod signature;
pub mod tokenize;
pub mod types;


#[cfg(feature = "napi")]
pub use bridge::{generate_bindings_native, map_c_type_native};

pub use cache::IncrementalCache;
pub use config::BindgenOptions;
pub use discovery::{generate_from_dir, locate_header};
pub use emit::{BindingArtifacts, BindingEmitter, DeclarationTemplate};
pub use error::{BindgenError, MalformedSignature};
pub use metadata::{BindingModel, Diagnostic, ModelBuilder};
pub use pipeline::{
    generate_bindings, generate_bindings_cached, generate_bindings_strict, GeneratedBindings,
};
pub use preprocess::{PreprocessPolicy, RewriteRule};
pub use signature::{FunctionDescriptor, ParameterDescriptor, SignatureParser};
pub use tokenize::Tokenizer;
pub use types::{map_c_type, map_type, MappedType};
