//! Podcast app: the track list, a detail view per track and the transport
//! controls.
//!
//! Only one track is "current" at a time: the one whose detail view is open.
//! The per-frame update refreshes that track's progress bar and elapsed time
//! and does nothing while no track is current.

use std::time::Duration;

use tracing::{debug, warn};

use crate::assets::{Track, app_background, load_tracks};
use crate::host::{AssetSource, Host, PhoneEvent, PhoneEventKind, PlayOptions};
use crate::scene::{Area, ElementId, Pointer, Widget, clamp_unit};
use crate::widgets::{Image, Text, TrackButtons, TrackPreview, TrackProgressBar};

use super::base::{App, AppBase};

/// The open track and the widgets updated for it on every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentTrack {
    pub key: String,
    pub progress_bar: ElementId,
    pub seek_time: ElementId,
}

/// Euclidean modulo: the result is in `[0, m)` for `m > 0`.
pub fn modulo(n: i64, m: i64) -> i64 {
    debug_assert!(m > 0);
    n.rem_euclid(m)
}

/// Format seconds as `m:ss`.
pub fn format_clock(secs: f64) -> String {
    let secs = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub struct PodcastApp {
    base: AppBase,
    tracks: Vec<Track>,
    background: Option<String>,
    current: Option<CurrentTrack>,
    rows: Vec<(ElementId, usize)>,
}

impl PodcastApp {
    pub const KEY: &'static str = "PodcastApp";

    pub fn new(assets: &dyn AssetSource, area: Area, rows: usize) -> Self {
        let tracks = load_tracks(assets).unwrap_or_else(|e| {
            warn!(error = %e, "podcast list starts empty");
            Vec::new()
        });
        Self {
            base: AppBase::new(area, rows),
            tracks,
            background: app_background(assets, Self::KEY),
            current: None,
            rows: Vec::new(),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current(&self) -> Option<&CurrentTrack> {
        self.current.as_ref()
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.key == key)
    }

    /// Lay out the detail view of track `index` in the active layer.
    pub fn open_track(&mut self, index: usize, host: &mut Host<'_>) {
        let Some(track) = self.tracks.get(index).cloned() else {
            warn!(index, "no track at this index");
            return;
        };

        let area = self.base.area();
        let cx = area.width * 0.5;
        let bar_width = area.width * 0.6;
        let bar_y = area.height * 0.7;
        let duration = host.audio.sound(&track.key).map_or(0.0, |s| s.duration);

        let art_width = (area.width * 0.4).max(1.0);
        let art_height = (area.height * 0.3).max(1.0);
        self.base.add_element(
            cx,
            area.height * 0.3,
            (0.5, 0.5),
            Widget::Image(Image::new(track.key.clone(), art_width, art_height)),
        );
        self.base.add_element(
            cx,
            area.height * 0.6,
            (0.5, 0.0),
            Widget::Text(Text::new(track.name.clone())),
        );
        self.base.add_element(
            cx,
            area.height * 0.6 + 1.0,
            (0.5, 0.0),
            Widget::Text(Text::new(track.artist.clone())),
        );
        let progress_bar = self.base.add_element(
            cx,
            bar_y,
            (0.5, 0.0),
            Widget::ProgressBar(TrackProgressBar::new(track.key.clone(), bar_width)),
        );
        self.base.add_element(
            cx,
            area.height * 0.8,
            (0.5, 0.0),
            Widget::Buttons(TrackButtons::new(track.key.clone())),
        );
        let seek_time = self.base.add_element(
            cx - bar_width * 0.5,
            bar_y + 1.0,
            (0.0, 0.0),
            Widget::Text(Text::new(format_clock(0.0))),
        );
        self.base.add_element(
            cx + bar_width * 0.5,
            bar_y + 1.0,
            (1.0, 0.0),
            Widget::Text(Text::new(format_clock(duration))),
        );

        debug!(track = %track.key, duration, "track opened");
        self.current = Some(CurrentTrack {
            key: track.key,
            progress_bar,
            seek_time,
        });
    }

    fn toggle(&mut self, key: &str, host: &mut Host<'_>) {
        let Some(state) = host.audio.sound(key) else {
            warn!(track = key, "play/pause on an unknown track");
            return;
        };
        let result = if state.playing {
            host.audio.pause(key)
        } else if state.paused {
            host.audio.resume(key)
        } else {
            host.audio.stop_all();
            host.audio.play(key, PlayOptions::default())
        };
        if let Err(e) = result {
            warn!(track = key, error = %e, "play/pause failed");
        }
    }

    /// Open the track `offset` places away from `key`, wrapping at both ends.
    /// Only applies while `key` is the open detail view.
    fn step(&mut self, key: &str, offset: i64, host: &mut Host<'_>) {
        let Some(index) = self.index_of(key) else {
            warn!(track = key, "previous/next on an unknown track");
            return;
        };
        if self.current.as_ref().is_none_or(|c| c.key != key) {
            debug!(track = key, "previous/next for a track that is no longer open");
            return;
        }
        let target = modulo(index as i64 + offset, self.tracks.len() as i64) as usize;
        let was_playing = host.audio.sound(key).is_some_and(|s| s.playing);

        self.base.clear_current_layer();
        self.open_track(target, host);

        if was_playing {
            host.audio.stop_all();
            let next = &self.tracks[target].key;
            if let Err(e) = host.audio.play(next, PlayOptions::default()) {
                warn!(track = %next, error = %e, "failed to continue playback");
            }
        }
    }

    fn play_at(&mut self, key: &str, fraction: f32, host: &mut Host<'_>) {
        let Some(state) = host.audio.sound(key) else {
            warn!(track = key, "seek on an unknown track");
            return;
        };
        let secs = (f64::from(clamp_unit(fraction)) * state.duration).floor() as u64;
        host.audio.stop_all();
        if let Err(e) = host.audio.play(key, PlayOptions::at(Duration::from_secs(secs))) {
            warn!(track = key, error = %e, "seek failed");
        }
    }
}

impl App for PodcastApp {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn base(&self) -> &AppBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AppBase {
        &mut self.base
    }

    fn render(&mut self, host: &mut Host<'_>) {
        self.base.clear_current_layer();
        self.base.set_background(self.background.clone());
        self.current = None;
        self.rows.clear();

        let width = self.base.area().width;
        let height = self.base.row_height();
        for (i, track) in self.tracks.iter().enumerate() {
            if let Err(e) = host.audio.add(track) {
                warn!(track = %track.key, error = %e, "failed to register track audio");
            }
            let preview = TrackPreview::new(track.clone(), width, height);
            let id = self.base.add_row(Widget::TrackPreview(preview));
            self.rows.push((id, i));
        }

        let added = host.bus.subscribe(Self::KEY, &PhoneEventKind::TRANSPORT);
        debug!(tracks = self.tracks.len(), new_listeners = added, "podcast list rendered");
    }

    fn update(&mut self, _delta: Duration, _time: Duration, host: &mut Host<'_>) {
        let Some(current) = &self.current else {
            return;
        };
        let Some(state) = host.audio.sound(&current.key) else {
            return;
        };
        let (progress_bar, seek_time) = (current.progress_bar, current.seek_time);

        let seek = state.seek.floor();
        let cursor = if state.duration > 0.0 {
            seek / state.duration
        } else {
            0.0
        };
        if let Some(Widget::ProgressBar(bar)) = self.base.widget_mut(progress_bar) {
            bar.update_cursor(cursor as f32);
        }
        if let Some(Widget::Text(label)) = self.base.widget_mut(seek_time) {
            label.set_text(format_clock(seek));
        }
    }

    fn on_event(&mut self, event: &PhoneEvent, host: &mut Host<'_>) {
        match event {
            PhoneEvent::TrackPlaying { track } => self.toggle(track, host),
            PhoneEvent::TrackStopped { .. } => host.audio.stop_all(),
            PhoneEvent::TrackPrevious { track } => self.step(track, -1, host),
            PhoneEvent::TrackNext { track } => self.step(track, 1, host),
            PhoneEvent::TrackPlayAt { track, fraction } => self.play_at(track, *fraction, host),
        }
    }

    fn pointer_up(&mut self, target: ElementId, pointer: Pointer, host: &mut Host<'_>) {
        let row = self.rows.iter().find(|(id, _)| *id == target).map(|(_, i)| *i);
        match row {
            Some(index) if self.base.layer_depth() == 1 => {
                self.base.add_layer();
                self.open_track(index, host);
            }
            _ => self.base.forward_pointer(target, pointer, host.bus),
        }
    }

    fn back(&mut self) -> bool {
        if !self.base.pop_layer() {
            return false;
        }
        self.current = None;
        true
    }

    fn close(&mut self) {
        self.base.reset_layers();
        self.current = None;
        self.rows.clear();
    }

    fn current_track(&self) -> Option<(usize, &Track)> {
        let key = &self.current.as_ref()?.key;
        let index = self.index_of(key)?;
        Some((index, &self.tracks[index]))
    }
}

#[cfg(test)]
mod tests;
