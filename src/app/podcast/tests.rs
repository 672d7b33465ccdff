use std::time::Duration;

use serde_json::json;

use super::*;
use crate::assets::AssetCache;
use crate::host::testing::{AudioCall, FakeAudio};
use crate::host::{AudioPort, EventBus, Host, PhoneEvent, PhoneEventKind};
use crate::scene::{Area, Pointer, Widget};

fn assets(keys: &[&str]) -> AssetCache {
    let tracks: Vec<_> = keys
        .iter()
        .map(|k| json!({"key": k, "name": format!("{k} name"), "artist": "Someone"}))
        .collect();
    AssetCache::default()
        .with_json("podcast", json!(tracks))
        .with_json(
            "apps",
            json!([{"key": "PodcastApp", "name": "Podcast", "background": "waves"}]),
        )
}

struct Rig {
    app: PodcastApp,
    audio: FakeAudio,
    bus: EventBus,
}

impl Rig {
    fn new(keys: &[&str], audio: FakeAudio) -> Self {
        let app = PodcastApp::new(&assets(keys), Area::new(40.0, 30.0), 6);
        let mut rig = Self {
            app,
            audio,
            bus: EventBus::new(),
        };
        rig.with_host(|app, host| app.render(host));
        rig
    }

    fn with_host<R>(&mut self, f: impl FnOnce(&mut PodcastApp, &mut Host<'_>) -> R) -> R {
        let mut host = Host {
            audio: &mut self.audio,
            bus: &mut self.bus,
        };
        f(&mut self.app, &mut host)
    }

    fn tap_row(&mut self, index: usize) {
        let target = self.app.base().hit_targets()[index];
        self.with_host(|app, host| app.pointer_up(target.element, target.pointer, host));
    }

    fn fire(&mut self, event: PhoneEvent) {
        self.with_host(|app, host| app.on_event(&event, host));
    }

    fn tick(&mut self) {
        self.with_host(|app, host| app.update(Duration::from_millis(16), Duration::ZERO, host));
    }

    fn current_key(&self) -> Option<&str> {
        self.app.current().map(|c| c.key.as_str())
    }

    fn text(&self, id: ElementId) -> String {
        match self.app.base().active_layer().get(id).map(|e| &e.widget) {
            Some(Widget::Text(t)) => t.content().to_string(),
            other => panic!("expected text, got {other:?}"),
        }
    }

    fn cursor(&self) -> f32 {
        let id = self.app.current().unwrap().progress_bar;
        match self.app.base().active_layer().get(id).map(|e| &e.widget) {
            Some(Widget::ProgressBar(b)) => b.cursor(),
            other => panic!("expected progress bar, got {other:?}"),
        }
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn next(track: &str) -> PhoneEvent {
    PhoneEvent::TrackNext {
        track: track.into(),
    }
}

fn previous(track: &str) -> PhoneEvent {
    PhoneEvent::TrackPrevious {
        track: track.into(),
    }
}

fn toggle(track: &str) -> PhoneEvent {
    PhoneEvent::TrackPlaying {
        track: track.into(),
    }
}

#[test]
fn modulo_is_never_negative() {
    assert_eq!(modulo(-1, 5), 4);
    assert_eq!(modulo(5, 5), 0);
    assert_eq!(modulo(-6, 5), 4);
    for n in -20..20 {
        let r = modulo(n, 3);
        assert!((0..3).contains(&r), "modulo({n}, 3) = {r}");
    }
}

#[test]
fn format_clock_pads_seconds() {
    assert_eq!(format_clock(65.0), "1:05");
    assert_eq!(format_clock(5.0), "0:05");
    assert_eq!(format_clock(0.0), "0:00");
    assert_eq!(format_clock(59.9), "0:59");
    assert_eq!(format_clock(600.0), "10:00");
    assert_eq!(format_clock(-3.0), "0:00");
    assert_eq!(format_clock(f64::NAN), "0:00");
}

#[test]
fn render_registers_audio_rows_and_background() {
    let rig = Rig::new(&["a", "b", "c"], FakeAudio::new());

    assert_eq!(
        rig.audio.calls,
        vec![
            AudioCall::Add("a".into()),
            AudioCall::Add("b".into()),
            AudioCall::Add("c".into())
        ]
    );
    assert_eq!(rig.app.base().active_layer().row_count(), 3);
    assert_eq!(rig.app.base().background(), Some("waves"));
    assert!(rig.app.current().is_none());

    // rows stack down by one row height (30 / 6)
    let ys: Vec<f32> = rig
        .app
        .base()
        .active_layer()
        .elements()
        .iter()
        .map(|e| e.y)
        .collect();
    assert_eq!(ys, vec![0.0, 5.0, 10.0]);
}

#[test]
fn rerender_does_not_stack_listeners() {
    let mut rig = Rig::new(&["a"], FakeAudio::new());
    rig.with_host(|app, host| app.re_render(host));
    rig.with_host(|app, host| app.render(host));
    for kind in PhoneEventKind::TRANSPORT {
        assert_eq!(rig.bus.subscribers(kind), vec!["PodcastApp"]);
    }
    assert_eq!(rig.app.base().active_layer().row_count(), 1);
}

#[test]
fn tapping_a_row_opens_detail_in_a_new_layer() {
    let mut rig = Rig::new(&["a", "b", "c"], FakeAudio::new().with_duration("b", 125.0));
    rig.tap_row(1);

    assert_eq!(rig.app.base().layer_depth(), 2);
    assert_eq!(rig.current_key(), Some("b"));

    let current = rig.app.current().unwrap().clone();
    assert_eq!(rig.text(current.seek_time), "0:00");
    let total = rig
        .app
        .base()
        .active_layer()
        .elements()
        .iter()
        .filter_map(|e| match &e.widget {
            Widget::Text(t) => Some(t.content().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(total, vec!["b name", "Someone", "0:00", "2:05"]);
    assert_eq!(rig.app.current_track().map(|(i, t)| (i, t.key.as_str())), Some((1, "b")));
}

#[test]
fn detail_layout_uses_fixed_fractions_of_the_area() {
    let mut rig = Rig::new(&["a"], FakeAudio::new());
    rig.tap_row(0);

    let layer = rig.app.base().active_layer();
    let ys: Vec<f32> = layer.elements().iter().map(|e| e.y).collect();
    // artwork, title, artist, bar, buttons, elapsed, total
    let expected = [9.0, 18.0, 19.0, 21.0, 24.0, 22.0, 22.0];
    assert_eq!(ys.len(), expected.len());
    for (y, want) in ys.iter().zip(expected) {
        assert!(approx(*y, want), "{ys:?}");
    }

    let bar = layer.get(rig.app.current().unwrap().progress_bar).unwrap();
    let b = bar.bounds();
    assert!(approx(b.x, 8.0) && approx(b.width, 24.0), "{b:?}");
    let elapsed = layer.get(rig.app.current().unwrap().seek_time).unwrap();
    assert!(approx(elapsed.bounds().x, 8.0));
}

#[test]
fn next_and_previous_wrap_at_both_ends() {
    let mut rig = Rig::new(&["a", "b", "c"], FakeAudio::new());
    rig.tap_row(1);
    assert_eq!(rig.current_key(), Some("b"));

    rig.fire(next("b"));
    assert_eq!(rig.current_key(), Some("c"));
    rig.fire(next("c"));
    assert_eq!(rig.current_key(), Some("a"));
    rig.fire(previous("a"));
    assert_eq!(rig.current_key(), Some("c"));
    rig.fire(previous("c"));
    assert_eq!(rig.current_key(), Some("b"));

    // detail is replaced in place, never stacked
    assert_eq!(rig.app.base().layer_depth(), 2);
    assert_eq!(rig.app.base().active_layer().len(), 7);
}

#[test]
fn opening_another_track_replaces_the_current_one() {
    let mut rig = Rig::new(&["a", "b"], FakeAudio::new());
    rig.tap_row(0);
    let first = rig.app.current().unwrap().clone();
    rig.fire(next("a"));
    let second = rig.app.current().unwrap().clone();

    assert_eq!(second.key, "b");
    assert_ne!(first.progress_bar, second.progress_bar);
    assert!(rig.app.base().active_layer().get(first.progress_bar).is_none());
}

#[test]
fn next_keeps_playing_only_if_the_old_track_was_playing() {
    let mut rig = Rig::new(&["a", "b", "c"], FakeAudio::new());
    rig.tap_row(0);
    rig.audio.clear_calls();

    rig.fire(next("a"));
    assert!(rig.audio.calls.is_empty());

    rig.fire(toggle("b"));
    rig.audio.clear_calls();
    rig.fire(next("b"));
    assert_eq!(
        rig.audio.calls,
        vec![
            AudioCall::StopAll,
            AudioCall::Play {
                key: "c".into(),
                seek: Duration::ZERO
            }
        ]
    );
    assert!(rig.audio.sound("c").unwrap().playing);
}

#[test]
fn play_pause_cycles_through_three_states() {
    let mut rig = Rig::new(&["a", "b"], FakeAudio::new());
    rig.tap_row(0);
    rig.audio.clear_calls();

    rig.fire(toggle("a"));
    rig.fire(toggle("a"));
    assert_eq!(
        rig.audio.calls,
        vec![
            AudioCall::StopAll,
            AudioCall::Play {
                key: "a".into(),
                seek: Duration::ZERO
            },
            AudioCall::Pause("a".into()),
        ]
    );

    rig.fire(toggle("a"));
    assert_eq!(rig.audio.calls.last(), Some(&AudioCall::Resume("a".into())));
    assert!(rig.audio.sound("a").unwrap().playing);
}

#[test]
fn stop_stops_everything() {
    let mut rig = Rig::new(&["a"], FakeAudio::new());
    rig.fire(toggle("a"));
    rig.audio.clear_calls();
    rig.fire(PhoneEvent::TrackStopped { track: "a".into() });
    assert_eq!(rig.audio.calls, vec![AudioCall::StopAll]);
    assert!(!rig.audio.sound("a").unwrap().playing);
}

#[test]
fn seek_plays_from_the_floored_fraction_of_duration() {
    let mut rig = Rig::new(&["a", "b"], FakeAudio::new().with_duration("b", 120.0));
    rig.audio.clear_calls();
    rig.fire(PhoneEvent::TrackPlayAt {
        track: "b".into(),
        fraction: 0.5,
    });
    assert_eq!(
        rig.audio.calls,
        vec![
            AudioCall::StopAll,
            AudioCall::Play {
                key: "b".into(),
                seek: Duration::from_secs(60)
            }
        ]
    );

    rig.audio.clear_calls();
    rig.fire(PhoneEvent::TrackPlayAt {
        track: "b".into(),
        fraction: 0.999,
    });
    assert_eq!(
        rig.audio.calls[1],
        AudioCall::Play {
            key: "b".into(),
            seek: Duration::from_secs(119)
        }
    );
}

#[test]
fn progress_bar_pointer_goes_through_the_bus() {
    let mut rig = Rig::new(&["a"], FakeAudio::new().with_duration("a", 100.0));
    rig.tap_row(0);
    let bar = rig.app.current().unwrap().progress_bar;
    rig.with_host(|app, host| app.pointer_up(bar, Pointer::new(0.25, 0.5), host));

    let events = rig.bus.drain();
    assert_eq!(
        events,
        vec![PhoneEvent::TrackPlayAt {
            track: "a".into(),
            fraction: 0.25
        }]
    );
}

#[test]
fn update_refreshes_progress_and_elapsed_label() {
    let mut rig = Rig::new(&["a"], FakeAudio::new().with_duration("a", 120.0));
    rig.tap_row(0);
    rig.fire(toggle("a"));
    rig.audio.set_seek("a", 65.7);
    rig.tick();

    let seek_time = rig.app.current().unwrap().seek_time;
    assert_eq!(rig.text(seek_time), "1:05");
    assert!((rig.cursor() - 65.0 / 120.0).abs() < 1e-6);
}

#[test]
fn update_is_a_noop_without_a_current_track() {
    let mut rig = Rig::new(&["a"], FakeAudio::new());
    let before = rig.app.base().active_layer().len();
    rig.tick();
    assert!(rig.app.current().is_none());
    assert_eq!(rig.app.base().active_layer().len(), before);
    assert_eq!(rig.audio.calls.len(), 1);
}

#[test]
fn zero_duration_keeps_cursor_at_start() {
    let mut rig = Rig::new(&["a"], FakeAudio::new());
    rig.tap_row(0);
    rig.audio.set_seek("a", 3.0);
    rig.tick();
    assert_eq!(rig.cursor(), 0.0);
}

#[test]
fn back_from_detail_clears_current_track() {
    let mut rig = Rig::new(&["a"], FakeAudio::new());
    rig.tap_row(0);
    assert!(rig.app.back());
    assert!(rig.app.current().is_none());
    assert_eq!(rig.app.base().layer_depth(), 1);
    assert!(!rig.app.back());
}

#[test]
fn unknown_tracks_are_ignored() {
    let mut rig = Rig::new(&["a"], FakeAudio::new());
    rig.tap_row(0);
    rig.audio.clear_calls();

    rig.fire(next("ghost"));
    rig.fire(toggle("ghost"));
    rig.fire(PhoneEvent::TrackPlayAt {
        track: "ghost".into(),
        fraction: 0.5,
    });
    assert!(rig.audio.calls.is_empty());
    assert_eq!(rig.current_key(), Some("a"));
}

#[test]
fn next_after_leaving_detail_keeps_the_list() {
    let mut rig = Rig::new(&["a", "b", "c"], FakeAudio::new());
    rig.tap_row(0);
    assert!(rig.app.back());

    rig.fire(next("a"));
    assert!(rig.app.current().is_none());
    assert_eq!(rig.app.base().layer_depth(), 1);
    assert_eq!(rig.app.base().active_layer().len(), 3);
}

#[test]
fn missing_podcast_asset_gives_an_empty_list() {
    let mut audio = FakeAudio::new();
    let mut bus = EventBus::new();
    let mut app = PodcastApp::new(&AssetCache::default(), Area::new(40.0, 30.0), 6);
    app.render(&mut Host {
        audio: &mut audio,
        bus: &mut bus,
    });
    assert!(app.tracks().is_empty());
    assert!(app.base().active_layer().is_empty());
    assert_eq!(app.base().background(), None);
}

#[test]
fn three_track_scenario_tap_then_next_twice_wraps() {
    let mut rig = Rig::new(&["A", "B", "C"], FakeAudio::new());
    rig.tap_row(1);
    assert_eq!(rig.current_key(), Some("B"));
    rig.fire(next("B"));
    assert_eq!(rig.current_key(), Some("C"));
    rig.fire(next("C"));
    assert_eq!(rig.current_key(), Some("A"));
}
