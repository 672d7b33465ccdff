//! Audio playback on a dedicated rodio thread.
//!
//! `RodioAudio` is the production `AudioPort`. It keeps a playback record per
//! registered sound and forwards start/pause/resume/stop to the audio thread,
//! which owns the output stream and one sink per playing sound.

mod player;
mod probe;
mod sink;
mod thread;
mod types;

pub use player::RodioAudio;
