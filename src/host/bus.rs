//! Subscribe/dispatch contract for the five transport events.
//!
//! Widgets `emit` events into a queue; the phone shell drains the queue once
//! per tick and hands every event to the apps subscribed to its kind.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhoneEventKind {
    TrackPlaying,
    TrackStopped,
    TrackPrevious,
    TrackNext,
    TrackPlayAt,
}

impl PhoneEventKind {
    /// Every transport event, in button order.
    pub const TRANSPORT: [Self; 5] = [
        Self::TrackPlaying,
        Self::TrackStopped,
        Self::TrackPrevious,
        Self::TrackNext,
        Self::TrackPlayAt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TrackPlaying => "track-playing",
            Self::TrackStopped => "track-stopped",
            Self::TrackPrevious => "track-previous",
            Self::TrackNext => "track-next",
            Self::TrackPlayAt => "track-play-at",
        }
    }
}

/// A transport event. Every variant names the track it applies to.
#[derive(Clone, Debug, PartialEq)]
pub enum PhoneEvent {
    /// Play/pause toggle.
    TrackPlaying { track: String },
    TrackStopped { track: String },
    TrackPrevious { track: String },
    TrackNext { track: String },
    /// Seek to `fraction` of the track, expected in `[0, 1]`.
    TrackPlayAt { track: String, fraction: f32 },
}

impl PhoneEvent {
    pub fn kind(&self) -> PhoneEventKind {
        match self {
            Self::TrackPlaying { .. } => PhoneEventKind::TrackPlaying,
            Self::TrackStopped { .. } => PhoneEventKind::TrackStopped,
            Self::TrackPrevious { .. } => PhoneEventKind::TrackPrevious,
            Self::TrackNext { .. } => PhoneEventKind::TrackNext,
            Self::TrackPlayAt { .. } => PhoneEventKind::TrackPlayAt,
        }
    }

    pub fn track(&self) -> &str {
        match self {
            Self::TrackPlaying { track }
            | Self::TrackStopped { track }
            | Self::TrackPrevious { track }
            | Self::TrackNext { track }
            | Self::TrackPlayAt { track, .. } => track,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    listeners: BTreeMap<PhoneEventKind, BTreeSet<&'static str>>,
    queue: VecDeque<PhoneEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `app` to `kinds`. Subscribing twice to the same kind keeps a
    /// single listener. Returns how many listeners were newly added.
    pub fn subscribe(&mut self, app: &'static str, kinds: &[PhoneEventKind]) -> usize {
        kinds
            .iter()
            .filter(|kind| self.listeners.entry(**kind).or_default().insert(app))
            .count()
    }

    pub fn unsubscribe_all(&mut self, app: &str) {
        for set in self.listeners.values_mut() {
            set.remove(app);
        }
        self.listeners.retain(|_, set| !set.is_empty());
    }

    pub fn subscribers(&self, kind: PhoneEventKind) -> Vec<&'static str> {
        self.listeners
            .get(&kind)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn emit(&mut self, event: PhoneEvent) {
        tracing::trace!(kind = event.kind().name(), track = event.track(), "event queued");
        self.queue.push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<PhoneEvent> {
        self.queue.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
