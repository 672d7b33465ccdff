use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/pocketos/config.toml` or `~/.config/pocketos/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `POCKETOS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub assets: AssetSettings,
    pub ui: UiSettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
    pub mpris: MprisSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory holding `apps.json`, `files.json`, `podcast.json` and the
    /// audio files they reference.
    pub dir: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Frame interval of the event loop (milliseconds).
    pub tick_ms: u64,
    /// Fraction of a progress bar moved per `h` / `l` press.
    pub scrub_step: f32,
    /// Rows of the podcast list that fit on one screen.
    pub podcast_rows: usize,
    /// Columns of the gallery grid.
    pub grid_columns: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " pocketos ".to_string(),
            tick_ms: 100,
            scrub_step: 0.05,
            podcast_rows: 4,
            grid_columns: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/pocketos/pocketos.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MprisSettings {
    pub enabled: bool,
}

impl Default for MprisSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}
