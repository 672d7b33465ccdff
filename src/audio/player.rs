use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::assets::Track;
use crate::host::{AudioError, AudioPort, PlayOptions, SoundState};

use super::probe::probe_duration;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, SoundInfo, SoundTable};

/// `AudioPort` backed by rodio on a dedicated thread.
///
/// Playback state lives in a table shared with that thread, so every call
/// updates it and returns before any decoding happens.
pub struct RodioAudio {
    tx: Sender<AudioCmd>,
    sounds: SoundTable,
    /// Directory track urls are resolved against.
    root: PathBuf,
    join: Option<JoinHandle<()>>,
}

impl RodioAudio {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let sounds: SoundTable = Arc::new(Mutex::new(HashMap::new()));
        let join = spawn_audio_thread(rx, sounds.clone());

        Self {
            tx,
            sounds,
            root: root.into(),
            join: Some(join),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), AudioError> {
        self.tx.send(cmd).map_err(|_| AudioError::Disconnected)
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, SoundInfo>> {
        self.sounds.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Update the record of `key` with `f`, then tell the audio thread what
    /// `f` returned, if anything.
    fn update(
        &self,
        key: &str,
        f: impl FnOnce(&mut SoundInfo, Instant) -> Option<AudioCmd>,
    ) -> Result<(), AudioError> {
        let cmd = {
            let mut table = self.table();
            let info = table
                .get_mut(key)
                .ok_or_else(|| AudioError::UnknownSound(key.to_string()))?;
            f(info, Instant::now())
        };
        match cmd {
            Some(cmd) => self.send(cmd),
            None => Ok(()),
        }
    }

    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl AudioPort for RodioAudio {
    fn add(&mut self, track: &Track) -> Result<(), AudioError> {
        if self.table().contains_key(&track.key) {
            return Ok(());
        }

        let path = track.url.as_ref().map(|url| self.root.join(url));
        let duration = match path.as_deref().map(probe_duration) {
            Some(Ok(d)) => d,
            Some(Err(e)) => {
                warn!(track = %track.key, error = %e, "duration unknown");
                Duration::ZERO
            }
            None => Duration::ZERO,
        };
        debug!(track = %track.key, ?path, ?duration, "sound registered");

        self.table()
            .insert(track.key.clone(), SoundInfo::new(duration));
        self.send(AudioCmd::Load {
            key: track.key.clone(),
            path,
            volume: track.volume.unwrap_or(1.0),
        })
    }

    fn sound(&self, key: &str) -> Option<SoundState> {
        let now = Instant::now();
        self.table().get(key).map(|info| info.state(now))
    }

    fn play(&mut self, key: &str, opts: PlayOptions) -> Result<(), AudioError> {
        self.update(key, |info, now| {
            let generation = info.start(opts.seek, now);
            Some(AudioCmd::Play {
                key: key.to_string(),
                seek: opts.seek,
                generation,
            })
        })
    }

    fn pause(&mut self, key: &str) -> Result<(), AudioError> {
        self.update(key, |info, now| {
            info.pause(now).then(|| AudioCmd::Pause(key.to_string()))
        })
    }

    fn resume(&mut self, key: &str) -> Result<(), AudioError> {
        self.update(key, |info, now| {
            info.resume(now).then(|| AudioCmd::Resume(key.to_string()))
        })
    }

    fn stop_all(&mut self) {
        for info in self.table().values_mut() {
            info.stop();
        }
        if let Err(e) = self.send(AudioCmd::StopAll) {
            debug!(error = %e, "stop-all not delivered");
        }
    }

    fn shutdown(&mut self, fade_out: Duration) {
        self.quit_softly(fade_out);
    }
}
