use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::host::AssetSource;

pub const FILES_ASSET: &str = "files";
pub const PODCAST_ASSET: &str = "podcast";
pub const APPS_ASSET: &str = "apps";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset `{0}` is not loaded")]
    Missing(String),
    #[error("asset `{key}` is malformed: {source}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    #[error("asset `{key}` is invalid: {reason}")]
    Invalid { key: String, reason: String },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A podcast episode.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Track {
    /// Unique audio key; also names the artwork image.
    pub key: String,
    pub name: String,
    pub artist: String,
    /// Audio file, relative to the assets directory.
    #[serde(default)]
    pub url: Option<PathBuf>,
    #[serde(default)]
    pub volume: Option<f32>,
}

/// A picture in the gallery.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// An entry on the home screen.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AppDescriptor {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub background: Option<String>,
}

pub fn load_tracks(src: &dyn AssetSource) -> Result<Vec<Track>, AssetError> {
    let tracks: Vec<Track> = load_records(src, PODCAST_ASSET)?;
    ensure_unique(PODCAST_ASSET, tracks.iter().map(|t| t.key.as_str()))?;
    Ok(tracks)
}

pub fn load_media(src: &dyn AssetSource) -> Result<Vec<MediaItem>, AssetError> {
    let media: Vec<MediaItem> = load_records(src, FILES_ASSET)?;
    ensure_unique(FILES_ASSET, media.iter().map(|m| m.id.as_str()))?;
    Ok(media)
}

pub fn load_app_descriptors(src: &dyn AssetSource) -> Result<Vec<AppDescriptor>, AssetError> {
    let apps: Vec<AppDescriptor> = load_records(src, APPS_ASSET)?;
    ensure_unique(APPS_ASSET, apps.iter().map(|a| a.key.as_str()))?;
    Ok(apps)
}

/// Background image configured for the app registered under `app_key`.
pub fn app_background(src: &dyn AssetSource, app_key: &str) -> Option<String> {
    load_app_descriptors(src)
        .ok()?
        .into_iter()
        .find(|a| a.key == app_key)
        .and_then(|a| a.background)
}

fn load_records<T: DeserializeOwned>(src: &dyn AssetSource, key: &str) -> Result<Vec<T>, AssetError> {
    let value = src
        .json(key)
        .ok_or_else(|| AssetError::Missing(key.to_string()))?;
    serde_json::from_value(value.clone()).map_err(|source| AssetError::Malformed {
        key: key.to_string(),
        source,
    })
}

fn ensure_unique<'a>(key: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), AssetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(AssetError::Invalid {
                key: key.to_string(),
                reason: "empty identifier".to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(AssetError::Invalid {
                key: key.to_string(),
                reason: format!("duplicate identifier `{id}`"),
            });
        }
    }
    Ok(())
}
