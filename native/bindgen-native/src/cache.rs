use crate::config::BindgenOptions;
use crate::error::Result;
use crate::metadata::BindingModel;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Bumped whenever parsing or the default rules change, so older entries miss.
pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
pub struct CacheEntry {
    pub hash: String,
    pub model: BindingModel,
}

/// Parsed models on disk, keyed by header contents and the options used to parse them.
pub struct IncrementalCache {
    cache_dir: PathBuf,
}

impl IncrementalCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        if !cache_dir.exists() {
            if let Err(e) = fs::create_dir_all(&cache_dir) {
                warn!("Failed to create cache directory {}: {}", cache_dir.display(), e);
            }
        }
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn compute_hash(header: &str, options: &BindgenOptions) -> String {
        let mut hasher = Sha256::new();
        hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
        hasher.update(CACHE_FORMAT_VERSION.to_le_bytes());
        hasher.update(header.as_bytes());
        // Options change the parse result, so they are part of the key.
        if let Ok(options_json) = serde_json::to_string(options) {
            hasher.update(options_json.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    fn get_cache_path(&self, header_path: &str) -> PathBuf {
        let safe_name = header_path
            .replace("/", "_")
            .replace("\\", "_")
            .replace(":", "_");
        self.cache_dir.join(format!("{}.json", safe_name))
    }

    pub fn get(&self, header_path: &str, header: &str, options: &BindgenOptions) -> Option<BindingModel> {
        let cache_path = self.get_cache_path(header_path);
        if !cache_path.exists() {
            return None;
        }

        let data = match fs::read_to_string(&cache_path) {
            Ok(d) => d,
            Err(_) => return None,
        };

        let entry: CacheEntry = match serde_json::from_str(&data) {
            Ok(e) => e,
            Err(e) => {
                debug!("Cache deserialization failed for {}: {}", header_path, e);
                // Invalidate corrupt cache file
                fs::remove_file(cache_path).ok();
                return None;
            }
        };

        if entry.hash == Self::compute_hash(header, options) {
            debug!("Cache hit for {}", header_path);
            Some(entry.model)
        } else {
            debug!("Cache stale for {}", header_path);
            None
        }
    }

    pub fn set(
        &self,
        header_path: &str,
        header: &str,
        options: &BindgenOptions,
        model: &BindingModel,
    ) -> Result<()> {
        let cache_path = self.get_cache_path(header_path);
        let hash = Self::compute_hash(header, options);
        let entry = CacheEntry {
            hash,
            model: model.clone(),
        };

        let data = serde_json::to_string(&entry)?;
        fs::write(cache_path, data)?;
        Ok(())
    }
}
