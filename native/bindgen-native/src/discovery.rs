//! Header discovery in a staged source tree.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::BindgenOptions;
use crate::error::{BindgenError, Result};
use crate::pipeline::{generate_bindings, GeneratedBindings};

/// First file named `file_name` under `root`, in sorted path order.
pub fn locate_header(root: &Path, file_name: &str) -> Result<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
        .ok_or_else(|| BindgenError::HeaderNotFound {
            root: root.to_path_buf(),
            file: file_name.to_string(),
        })
}

/// Locate `options.header_file` under `root` and generate bindings from it.
pub fn generate_from_dir(root: &Path, options: &BindgenOptions) -> Result<GeneratedBindings> {
    let header_path = locate_header(root, &options.header_file)?;
    let header = fs::read_to_string(&header_path)?;
    generate_bindings(&header, options)
}
