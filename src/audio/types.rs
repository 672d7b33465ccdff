//! Commands sent to the audio thread and the per-sound playback record
//! shared with it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::host::SoundState;

#[derive(Debug)]
pub enum AudioCmd {
    /// Register the file behind `key`. Sounds without a file play silently.
    Load {
        key: String,
        path: Option<PathBuf>,
        volume: f32,
    },
    /// Start `key` from `seek`. `generation` tags the sink so a late
    /// end-of-stream does not stop a newer start of the same sound.
    Play {
        key: String,
        seek: Duration,
        generation: u64,
    },
    Pause(String),
    Resume(String),
    StopAll,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Playback record of one sound, kept by the caller and read without a
/// round trip to the audio thread.
#[derive(Debug, Clone, Default)]
pub struct SoundInfo {
    pub duration: Duration,
    pub playing: bool,
    pub paused: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
    pub generation: u64,
}

impl SoundInfo {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Elapsed position, capped at the duration when it is known.
    pub fn position(&self, now: Instant) -> Duration {
        let running = self
            .started_at
            .map_or(Duration::ZERO, |st| now.saturating_duration_since(st));
        let pos = self.accumulated + running;
        if self.duration.is_zero() {
            pos
        } else {
            pos.min(self.duration)
        }
    }

    pub fn state(&self, now: Instant) -> SoundState {
        SoundState {
            playing: self.playing,
            paused: self.paused,
            seek: self.position(now).as_secs_f64(),
            duration: self.duration.as_secs_f64(),
        }
    }

    /// Start from `seek`. Returns the new generation.
    pub fn start(&mut self, seek: Duration, now: Instant) -> u64 {
        self.playing = true;
        self.paused = false;
        self.accumulated = seek;
        self.started_at = Some(now);
        self.generation += 1;
        self.generation
    }

    /// Returns false when the sound was not playing.
    pub fn pause(&mut self, now: Instant) -> bool {
        if !self.playing {
            return false;
        }
        self.accumulated = self.position(now);
        self.started_at = None;
        self.playing = false;
        self.paused = true;
        true
    }

    /// Returns false when the sound was not paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        if !self.paused {
            return false;
        }
        self.started_at = Some(now);
        self.playing = true;
        self.paused = false;
        true
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.paused = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }
}

pub type SoundTable = Arc<Mutex<HashMap<String, SoundInfo>>>;
