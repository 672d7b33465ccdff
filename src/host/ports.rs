use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::assets::Track;

use super::bus::EventBus;

/// Read-only cache of JSON assets keyed by logical name (`"podcast"`, `"files"`, ...).
pub trait AssetSource {
    fn json(&self, key: &str) -> Option<&Value>;
}

/// The playback state of a sound, as the UI and MPRIS see it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Snapshot of one registered sound. Times are in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SoundState {
    pub playing: bool,
    pub paused: bool,
    pub seek: f64,
    pub duration: f64,
}

impl SoundState {
    pub fn playback(&self) -> PlaybackState {
        if self.playing {
            PlaybackState::Playing
        } else if self.paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Stopped
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayOptions {
    /// Start position inside the sound.
    pub seek: Duration,
}

impl PlayOptions {
    pub fn at(seek: Duration) -> Self {
        Self { seek }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no sound registered under `{0}`")]
    UnknownSound(String),
    #[error("audio thread is not running")]
    Disconnected,
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// The audio subsystem. Every call returns immediately; decoding and output
/// happen elsewhere.
pub trait AudioPort {
    /// Register `track` under its key. Registering a key twice is a no-op.
    fn add(&mut self, track: &Track) -> Result<(), AudioError>;
    fn sound(&self, key: &str) -> Option<SoundState>;
    fn play(&mut self, key: &str, opts: PlayOptions) -> Result<(), AudioError>;
    fn pause(&mut self, key: &str) -> Result<(), AudioError>;
    fn resume(&mut self, key: &str) -> Result<(), AudioError>;
    /// Stop every sound, whichever track it belongs to.
    fn stop_all(&mut self);
    /// Release the output device, fading out over `fade_out`.
    fn shutdown(&mut self, _fade_out: Duration) {}
}

/// Mutable host ports lent to an app for a single call.
pub struct Host<'a> {
    pub audio: &'a mut dyn AudioPort,
    pub bus: &'a mut EventBus,
}
