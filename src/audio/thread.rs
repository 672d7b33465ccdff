use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::PoisonError;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use super::sink::create_sink_at;
use super::types::{AudioCmd, SoundTable};

const REAP_INTERVAL: Duration = Duration::from_millis(200);
const FADE_STEPS: u64 = 20;

struct Loaded {
    path: Option<PathBuf>,
    volume: f32,
}

struct Active {
    sink: Sink,
    generation: u64,
}

pub(super) fn spawn_audio_thread(rx: Receiver<AudioCmd>, sounds: SoundTable) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's
                // useful in debugging, but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                warn!(error = %e, "no audio output device, playing silently");
                None
            }
        };

        let mut loaded: HashMap<String, Loaded> = HashMap::new();
        let mut active: HashMap<String, Active> = HashMap::new();

        loop {
            match rx.recv_timeout(REAP_INTERVAL) {
                Ok(AudioCmd::Load { key, path, volume }) => {
                    loaded.insert(key, Loaded { path, volume });
                }
                Ok(AudioCmd::Play {
                    key,
                    seek,
                    generation,
                }) => {
                    if let Some(old) = active.remove(&key) {
                        old.sink.stop();
                    }
                    let Some(stream) = stream.as_ref() else {
                        continue;
                    };
                    match start_sink(stream, loaded.get(&key), seek) {
                        Ok(Some(sink)) => {
                            debug!(sound = %key, ?seek, "sink started");
                            active.insert(key, Active { sink, generation });
                        }
                        Ok(None) => debug!(sound = %key, "no file, playing silently"),
                        Err(e) => {
                            warn!(sound = %key, error = %e, "playback failed");
                            mark_ended(&sounds, &key, generation);
                        }
                    }
                }
                Ok(AudioCmd::Pause(key)) => {
                    if let Some(a) = active.get(&key) {
                        a.sink.pause();
                    }
                }
                Ok(AudioCmd::Resume(key)) => {
                    if let Some(a) = active.get(&key) {
                        a.sink.play();
                    }
                }
                Ok(AudioCmd::StopAll) => {
                    for (_, a) in active.drain() {
                        a.sink.stop();
                    }
                }
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    fade_out_sinks(active.values().map(|a| &a.sink), fade_out_ms);
                    for (_, a) in active.drain() {
                        a.sink.stop();
                    }
                    info!("audio thread stopped");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Sinks that ran dry have reached the end of their file.
                    let ended: Vec<String> = active
                        .iter()
                        .filter(|(_, a)| a.sink.empty())
                        .map(|(k, _)| k.clone())
                        .collect();
                    for key in ended {
                        if let Some(a) = active.remove(&key) {
                            debug!(sound = %key, "sound ended");
                            mark_ended(&sounds, &key, a.generation);
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn start_sink(
    stream: &OutputStream,
    loaded: Option<&Loaded>,
    seek: Duration,
) -> Result<Option<Sink>, crate::host::AudioError> {
    let Some(Loaded {
        path: Some(path),
        volume,
    }) = loaded
    else {
        return Ok(None);
    };
    let sink = create_sink_at(stream, path, seek)?;
    sink.set_volume(*volume);
    sink.play();
    Ok(Some(sink))
}

/// Stop the shared record, unless the sound was started again since.
fn mark_ended(sounds: &SoundTable, key: &str, generation: u64) {
    let mut table = sounds.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(info) = table.get_mut(key) {
        if info.generation == generation {
            info.stop();
        }
    }
}

fn fade_out_sinks<'a>(sinks: impl Iterator<Item = &'a Sink> + Clone, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sinks.for_each(|s| s.set_volume(0.0));
        return;
    }
    let start: Vec<f32> = sinks.clone().map(|s| s.volume()).collect();
    let step_ms = (fade_out_ms / FADE_STEPS).max(1);
    for step in 1..=FADE_STEPS {
        let t = step as f32 / FADE_STEPS as f32;
        for (sink, v) in sinks.clone().zip(&start) {
            sink.set_volume(v * (1.0 - t));
        }
        thread::sleep(Duration::from_millis(step_ms));
    }
}
