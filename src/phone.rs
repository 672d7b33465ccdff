//! The phone shell: home screen, the open app, and the per-tick event
//! dispatch between them.
//!
//! The shell owns the audio port and the event bus and lends both to an app
//! through a `Host` for the duration of a single call.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::{App, FilesApp, PodcastApp};
use crate::assets::{AppDescriptor, Track, load_app_descriptors};
use crate::config::UiSettings;
use crate::host::{AssetSource, AudioPort, EventBus, Host, PhoneEvent, PlaybackState};
use crate::scene::{Area, HitTarget};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    /// Index into the home screen entries.
    App(usize),
}

/// Media-key style commands, from the keyboard or MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportCmd {
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Previous,
}

/// The open app's current track and what the audio port says about it.
#[derive(Clone, Debug, PartialEq)]
pub struct NowPlaying {
    pub index: usize,
    pub track: Track,
    pub state: PlaybackState,
    /// Seconds.
    pub duration: f64,
}

struct Entry {
    descriptor: AppDescriptor,
    app: Box<dyn App>,
}

pub struct Phone {
    entries: Vec<Entry>,
    audio: Box<dyn AudioPort>,
    bus: EventBus,
    screen: Screen,
    home_selected: usize,
}

fn builtin_descriptors() -> Vec<AppDescriptor> {
    [(FilesApp::KEY, "Files"), (PodcastApp::KEY, "Podcast")]
        .into_iter()
        .map(|(key, name)| AppDescriptor {
            key: key.to_string(),
            name: name.to_string(),
            background: None,
        })
        .collect()
}

impl Phone {
    /// Build every app listed in `apps.json` that the shell knows about.
    pub fn boot(
        assets: &dyn AssetSource,
        audio: Box<dyn AudioPort>,
        area: Area,
        ui: &UiSettings,
    ) -> Self {
        let descriptors = load_app_descriptors(assets).unwrap_or_else(|e| {
            warn!(error = %e, "using the built-in app list");
            builtin_descriptors()
        });

        let mut entries = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let app: Box<dyn App> = match descriptor.key.as_str() {
                FilesApp::KEY => Box::new(FilesApp::new(assets, area, ui.grid_columns)),
                PodcastApp::KEY => Box::new(PodcastApp::new(assets, area, ui.podcast_rows)),
                other => {
                    warn!(app = other, "skipping unknown app");
                    continue;
                }
            };
            entries.push(Entry { descriptor, app });
        }
        info!(apps = entries.len(), "phone booted");

        Self {
            entries,
            audio,
            bus: EventBus::new(),
            screen: Screen::Home,
            home_selected: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn home_entries(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    pub fn home_selected(&self) -> usize {
        self.home_selected
    }

    /// The open app with its home screen entry.
    pub fn open(&self) -> Option<(&AppDescriptor, &dyn App)> {
        let Screen::App(i) = self.screen else {
            return None;
        };
        let entry = self.entries.get(i)?;
        Some((&entry.descriptor, entry.app.as_ref()))
    }

    pub fn audio(&self) -> &dyn AudioPort {
        self.audio.as_ref()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.descriptor.key == key)
    }

    /// Switch the screen to app `index`, closing whatever was open. Reopening
    /// the open app starts it from scratch.
    fn select(&mut self, index: usize) {
        self.go_home();
        self.screen = Screen::App(index);
        self.home_selected = index;
    }

    pub fn open_app(&mut self, key: &str) -> bool {
        let Some(index) = self.index_of(key) else {
            warn!(app = key, "no such app");
            return false;
        };
        self.select(index);
        let app = &mut self.entries[index].app;
        app.render(&mut Host {
            audio: self.audio.as_mut(),
            bus: &mut self.bus,
        });
        info!(app = key, "app opened");
        true
    }

    /// Open `key` and jump straight to the item `id`.
    pub fn deep_link(&mut self, key: &str, id: &str) -> bool {
        let Some(index) = self.index_of(key) else {
            warn!(app = key, id, "deep link into an unknown app");
            return false;
        };
        self.select(index);
        let app = &mut self.entries[index].app;
        app.go_to_id(
            id,
            true,
            &mut Host {
                audio: self.audio.as_mut(),
                bus: &mut self.bus,
            },
        );
        info!(app = key, id, "deep link opened");
        true
    }

    /// Close the open app. Audio keeps playing.
    pub fn go_home(&mut self) {
        let Screen::App(i) = self.screen else {
            return;
        };
        if let Some(entry) = self.entries.get_mut(i) {
            entry.app.close();
            self.bus.unsubscribe_all(entry.app.key());
        }
        self.screen = Screen::Home;
        debug!("home screen");
    }

    /// Pop the open app's top layer; from its root layer, go home.
    pub fn back(&mut self) {
        let Some(app) = self.open_app_mut() else {
            return;
        };
        if !app.back() {
            self.go_home();
        }
    }

    pub fn home_next(&mut self) {
        self.move_home_selection(1);
    }

    pub fn home_prev(&mut self) {
        self.move_home_selection(-1);
    }

    fn move_home_selection(&mut self, step: i64) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as i64;
        self.home_selected = (self.home_selected as i64 + step).rem_euclid(len) as usize;
    }

    pub fn open_selected(&mut self) {
        let Some(key) = self
            .entries
            .get(self.home_selected)
            .map(|e| e.descriptor.key.clone())
        else {
            return;
        };
        self.open_app(&key);
    }

    fn open_app_mut(&mut self) -> Option<&mut Box<dyn App>> {
        let Screen::App(i) = self.screen else {
            return None;
        };
        self.entries.get_mut(i).map(|e| &mut e.app)
    }

    pub fn focus_next(&mut self) {
        if let Some(app) = self.open_app_mut() {
            app.base_mut().focus_next();
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(app) = self.open_app_mut() {
            app.base_mut().focus_prev();
        }
    }

    pub fn scrub(&mut self, delta: f32) {
        if let Some(app) = self.open_app_mut() {
            app.base_mut().scrub(delta);
        }
    }

    pub fn focused_target(&self) -> Option<HitTarget> {
        self.open()?.1.base().focused()
    }

    /// Pointer-up at the focused target of the open app.
    pub fn activate(&mut self) {
        let Screen::App(i) = self.screen else {
            return;
        };
        let Some(entry) = self.entries.get_mut(i) else {
            return;
        };
        let Some(target) = entry.app.base().focused() else {
            return;
        };
        entry.app.pointer_up(
            target.element,
            target.pointer,
            &mut Host {
                audio: self.audio.as_mut(),
                bus: &mut self.bus,
            },
        );
    }

    /// Resize every app. The open app is rendered again from its root
    /// layer, so a detail view or opened picture closes.
    pub fn resize(&mut self, area: Area) {
        for entry in &mut self.entries {
            entry.app.base_mut().set_area(area);
        }
        let Screen::App(i) = self.screen else {
            return;
        };
        let Some(entry) = self.entries.get_mut(i) else {
            return;
        };
        entry.app.re_render(&mut Host {
            audio: self.audio.as_mut(),
            bus: &mut self.bus,
        });
    }

    /// Turn a media-key command into a bus event for the current track.
    pub fn transport(&mut self, cmd: TransportCmd) {
        let Some(now) = self.now_playing() else {
            debug!(?cmd, "no current track");
            return;
        };
        let track = now.track.key;
        let event = match cmd {
            TransportCmd::PlayPause => PhoneEvent::TrackPlaying { track },
            TransportCmd::Play if now.state != PlaybackState::Playing => {
                PhoneEvent::TrackPlaying { track }
            }
            TransportCmd::Pause if now.state == PlaybackState::Playing => {
                PhoneEvent::TrackPlaying { track }
            }
            TransportCmd::Play | TransportCmd::Pause => return,
            TransportCmd::Stop => PhoneEvent::TrackStopped { track },
            TransportCmd::Next => PhoneEvent::TrackNext { track },
            TransportCmd::Previous => PhoneEvent::TrackPrevious { track },
        };
        self.bus.emit(event);
    }

    /// Dispatch every queued event to its subscribers, then update the open
    /// app.
    pub fn tick(&mut self, delta: Duration, time: Duration) {
        for event in self.bus.drain() {
            let subscribers = self.bus.subscribers(event.kind());
            if subscribers.is_empty() {
                debug!(kind = event.kind().name(), "event without subscribers");
            }
            for key in subscribers {
                let Some(entry) = self.entries.iter_mut().find(|e| e.app.key() == key) else {
                    continue;
                };
                entry.app.on_event(
                    &event,
                    &mut Host {
                        audio: self.audio.as_mut(),
                        bus: &mut self.bus,
                    },
                );
            }
        }

        let Screen::App(i) = self.screen else {
            return;
        };
        if let Some(entry) = self.entries.get_mut(i) {
            entry.app.update(
                delta,
                time,
                &mut Host {
                    audio: self.audio.as_mut(),
                    bus: &mut self.bus,
                },
            );
        }
    }

    pub fn now_playing(&self) -> Option<NowPlaying> {
        let (_, app) = self.open()?;
        let (index, track) = app.current_track()?;
        let sound = self.audio.sound(&track.key).unwrap_or_default();
        Some(NowPlaying {
            index,
            track: track.clone(),
            state: sound.playback(),
            duration: sound.duration,
        })
    }

    pub fn shutdown(&mut self, fade_out: Duration) {
        self.audio.shutdown(fade_out);
    }
}
