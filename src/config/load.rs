use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `POCKETOS__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("POCKETOS")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject values the event loop and the apps cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.ui.tick_ms == 0 {
            return Err("ui.tick_ms must be >= 1".to_string());
        }
        if self.ui.podcast_rows == 0 {
            return Err("ui.podcast_rows must be >= 1".to_string());
        }
        if self.ui.grid_columns == 0 {
            return Err("ui.grid_columns must be >= 1".to_string());
        }
        if self.ui.scrub_step.is_nan() || self.ui.scrub_step <= 0.0 {
            return Err("ui.scrub_step must be > 0".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `POCKETOS_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("POCKETOS_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/pocketos/config.toml`, or `~/.config/pocketos/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("pocketos").join("config.toml"))
}

/// `$XDG_STATE_HOME/pocketos/pocketos.log`, or `~/.local/state/pocketos/pocketos.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("pocketos").join("pocketos.log"))
}
