use crate::host::PhoneEvent;
use crate::scene::{Pointer, clamp_unit};

const BUTTON_WIDTH: f32 = 7.0;
const BUTTON_HEIGHT: f32 = 3.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportButton {
    Previous,
    PlayPause,
    Stop,
    Next,
}

impl TransportButton {
    /// Left to right.
    pub const ALL: [Self; 4] = [Self::Previous, Self::PlayPause, Self::Stop, Self::Next];

    pub fn label(self) -> &'static str {
        match self {
            Self::Previous => "|<<",
            Self::PlayPause => ">||",
            Self::Stop => "[]",
            Self::Next => ">>|",
        }
    }

    pub fn event(self, track: &str) -> PhoneEvent {
        let track = track.to_string();
        match self {
            Self::Previous => PhoneEvent::TrackPrevious { track },
            Self::PlayPause => PhoneEvent::TrackPlaying { track },
            Self::Stop => PhoneEvent::TrackStopped { track },
            Self::Next => PhoneEvent::TrackNext { track },
        }
    }
}

/// Row of transport buttons for one track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackButtons {
    pub track: String,
}

impl TrackButtons {
    pub fn new(track: impl Into<String>) -> Self {
        Self {
            track: track.into(),
        }
    }

    pub fn size(&self) -> (f32, f32) {
        (
            BUTTON_WIDTH * TransportButton::ALL.len() as f32,
            BUTTON_HEIGHT,
        )
    }

    pub fn button_at(&self, x: f32) -> TransportButton {
        let n = TransportButton::ALL.len();
        let idx = ((clamp_unit(x) * n as f32) as usize).min(n - 1);
        TransportButton::ALL[idx]
    }

    /// Pointer position at the center of `button`.
    pub fn pointer_for(button: TransportButton) -> Pointer {
        let n = TransportButton::ALL.len() as f32;
        let idx = TransportButton::ALL
            .iter()
            .position(|b| *b == button)
            .unwrap_or(0) as f32;
        Pointer::new((idx + 0.5) / n, 0.5)
    }

    pub fn hit_targets(&self) -> Vec<Pointer> {
        TransportButton::ALL
            .iter()
            .map(|b| Self::pointer_for(*b))
            .collect()
    }

    pub fn pointer_up(&self, pointer: Pointer) -> PhoneEvent {
        self.button_at(pointer.x).event(&self.track)
    }
}
