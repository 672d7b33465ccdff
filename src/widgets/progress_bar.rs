use crate::host::PhoneEvent;
use crate::scene::{Pointer, clamp_unit};

/// Horizontal playback progress bar for one track. A pointer-up asks the
/// app to play the track from that point.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackProgressBar {
    pub track: String,
    pub width: f32,
    cursor: f32,
}

impl TrackProgressBar {
    pub fn new(track: impl Into<String>, width: f32) -> Self {
        Self {
            track: track.into(),
            width,
            cursor: 0.0,
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn update_cursor(&mut self, fraction: f32) {
        self.cursor = clamp_unit(fraction);
    }

    pub fn pointer_up(&self, pointer: Pointer) -> PhoneEvent {
        PhoneEvent::TrackPlayAt {
            track: self.track.clone(),
            fraction: clamp_unit(pointer.x),
        }
    }
}
