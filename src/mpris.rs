//! MPRIS D-Bus service so desktop media keys and `playerctl` drive the
//! podcast transport.
//!
//! Method calls are turned into `ControlCmd`s for the event loop. Properties
//! are served from a snapshot the loop refreshes whenever the current track
//! or its playback state changes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use tracing::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::host::PlaybackState;
use crate::phone::NowPlaying;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.pocketos";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    artist: Vec<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<ObjectPath<'static>>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Publish `now` as the current track, or clear the metadata.
    pub fn set_track_metadata(&self, now: Option<&NowPlaying>) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        let Some(now) = now else {
            s.title = None;
            s.artist.clear();
            s.url = None;
            s.length_micros = None;
            s.track_id = None;
            return;
        };
        s.title = Some(now.track.name.clone());
        s.artist = vec![now.track.artist.clone()];
        s.url = now
            .track
            .url
            .as_ref()
            .map(|p| format!("file://{}", p.display()));
        s.length_micros = (now.duration > 0.0).then(|| (now.duration * 1_000_000.0).round() as i64);
        s.track_id = ObjectPath::try_from(format!("{OBJECT_PATH}/track/{}", now.index)).ok();
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "pocketos"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

fn insert_value(map: &mut HashMap<String, OwnedValue>, key: &str, value: Value<'_>) {
    if let Ok(v) = OwnedValue::try_from(value) {
        map.insert(key.to_string(), v);
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(id) = &s.track_id {
            insert_value(&mut map, "mpris:trackid", Value::from(id.clone()));
        }
        insert_value(
            &mut map,
            "xesam:title",
            Value::from(s.title.clone().unwrap_or_default()),
        );
        if !s.artist.is_empty() {
            insert_value(&mut map, "xesam:artist", Value::from(s.artist.clone()));
        }
        if let Some(url) = &s.url {
            insert_value(&mut map, "xesam:url", Value::from(url.clone()));
        }
        if let Some(len) = s.length_micros {
            insert_value(&mut map, "mpris:length", Value::from(len));
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!(error = %e, "MPRIS: failed to connect to session bus");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                warn!(error = %e, "MPRIS: failed to acquire name");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                warn!(error = %e, "MPRIS: failed to register root iface");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!(error = %e, "MPRIS: failed to register player iface");
                return;
            }
            info!(name = BUS_NAME, "MPRIS service registered");

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
