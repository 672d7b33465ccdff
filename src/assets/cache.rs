use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::host::AssetSource;

use super::model::AssetError;

/// JSON assets keyed by file stem (`podcast.json` -> `"podcast"`).
#[derive(Debug, Default)]
pub struct AssetCache {
    root: PathBuf,
    json: HashMap<String, Value>,
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn read_json(path: &Path) -> Result<Value, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AssetError::Malformed {
        key: path.display().to_string(),
        source,
    })
}

impl AssetCache {
    /// Load every `*.json` file directly under `dir`. Unreadable files are
    /// skipped with a warning; a missing directory gives an empty cache.
    pub fn load_dir(dir: &Path) -> Self {
        let mut cache = Self {
            root: dir.to_path_buf(),
            json: HashMap::new(),
        };

        if !dir.is_dir() {
            warn!(dir = %dir.display(), "assets directory not found");
            return cache;
        }

        for entry in WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !path.is_file() || !is_json_file(path) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match read_json(path) {
                Ok(value) => {
                    debug!(key, path = %path.display(), "asset loaded");
                    cache.json.insert(key.to_string(), value);
                }
                Err(e) => warn!(error = %e, "skipping asset"),
            }
        }

        cache
    }

    pub fn with_json(mut self, key: &str, value: Value) -> Self {
        self.json.insert(key.to_string(), value);
        self
    }

    /// Directory the assets were loaded from; audio urls resolve against it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.json.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl AssetSource for AssetCache {
    fn json(&self, key: &str) -> Option<&Value> {
        self.json.get(key)
    }
}
