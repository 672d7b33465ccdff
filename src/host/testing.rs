//! In-memory `AudioPort` that records every call, for app logic tests.

use std::collections::HashMap;
use std::time::Duration;

use crate::assets::Track;

use super::ports::{AudioError, AudioPort, PlayOptions, SoundState};

#[derive(Clone, Debug, PartialEq)]
pub enum AudioCall {
    Add(String),
    Play { key: String, seek: Duration },
    Pause(String),
    Resume(String),
    StopAll,
}

#[derive(Default)]
pub struct FakeAudio {
    pub calls: Vec<AudioCall>,
    sounds: HashMap<String, SoundState>,
    durations: HashMap<String, f64>,
}

impl FakeAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration reported for `key` once it is added.
    pub fn with_duration(mut self, key: &str, secs: f64) -> Self {
        self.durations.insert(key.to_string(), secs);
        self
    }

    pub fn set_seek(&mut self, key: &str, secs: f64) {
        if let Some(s) = self.sounds.get_mut(key) {
            s.seek = secs;
        }
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

pub fn track(key: &str) -> Track {
    Track {
        key: key.to_string(),
        name: format!("{key} name"),
        artist: format!("{key} artist"),
        url: None,
        volume: None,
    }
}

impl AudioPort for FakeAudio {
    fn add(&mut self, track: &Track) -> Result<(), AudioError> {
        self.calls.push(AudioCall::Add(track.key.clone()));
        let duration = self.durations.get(&track.key).copied().unwrap_or(0.0);
        self.sounds.entry(track.key.clone()).or_insert(SoundState {
            duration,
            ..SoundState::default()
        });
        Ok(())
    }

    fn sound(&self, key: &str) -> Option<SoundState> {
        self.sounds.get(key).copied()
    }

    fn play(&mut self, key: &str, opts: PlayOptions) -> Result<(), AudioError> {
        let s = self
            .sounds
            .get_mut(key)
            .ok_or_else(|| AudioError::UnknownSound(key.to_string()))?;
        s.playing = true;
        s.paused = false;
        s.seek = opts.seek.as_secs_f64();
        self.calls.push(AudioCall::Play {
            key: key.to_string(),
            seek: opts.seek,
        });
        Ok(())
    }

    fn pause(&mut self, key: &str) -> Result<(), AudioError> {
        let s = self
            .sounds
            .get_mut(key)
            .ok_or_else(|| AudioError::UnknownSound(key.to_string()))?;
        if s.playing {
            s.playing = false;
            s.paused = true;
        }
        self.calls.push(AudioCall::Pause(key.to_string()));
        Ok(())
    }

    fn resume(&mut self, key: &str) -> Result<(), AudioError> {
        let s = self
            .sounds
            .get_mut(key)
            .ok_or_else(|| AudioError::UnknownSound(key.to_string()))?;
        if s.paused {
            s.paused = false;
            s.playing = true;
        }
        self.calls.push(AudioCall::Resume(key.to_string()));
        Ok(())
    }

    fn stop_all(&mut self) {
        for s in self.sounds.values_mut() {
            s.playing = false;
            s.paused = false;
            s.seek = 0.0;
        }
        self.calls.push(AudioCall::StopAll);
    }
}
