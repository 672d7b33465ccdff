use crossterm::event::KeyCode;
use serde_json::json;

use super::event_loop::{KeyAction, apply_key_action, handle_control_cmd, key_action};
use super::logging::init_logging;
use super::mpris_sync::MprisSnapshot;
use super::startup::{LaunchTarget, apply_launch_target, parse_launch_target};
use crate::assets::AssetCache;
use crate::config::{LoggingSettings, UiSettings};
use crate::host::testing::FakeAudio;
use crate::mpris::ControlCmd;
use crate::phone::{Phone, Screen, TransportCmd};
use crate::scene::Area;

fn booted() -> Phone {
    let assets = AssetCache::default()
        .with_json("podcast", json!([{"key": "a", "name": "Alpha", "artist": "Ann"}]))
        .with_json("files", json!([{"id": "beach", "title": "Beach", "image": "beach.png"}]));
    Phone::boot(
        &assets,
        Box::new(FakeAudio::new()),
        Area::new(40.0, 20.0),
        &UiSettings::default(),
    )
}

#[test]
fn launch_target_parses_app_and_optional_id() {
    assert_eq!(
        parse_launch_target("FilesApp#beach"),
        Some(LaunchTarget {
            app: "FilesApp".to_string(),
            id: Some("beach".to_string()),
        })
    );
    assert_eq!(
        parse_launch_target("PodcastApp"),
        Some(LaunchTarget {
            app: "PodcastApp".to_string(),
            id: None,
        })
    );
    assert_eq!(parse_launch_target("PodcastApp#").unwrap().id, None);
    assert_eq!(parse_launch_target("#beach"), None);
    assert_eq!(parse_launch_target(""), None);
}

#[test]
fn launch_target_opens_or_deep_links() {
    let mut phone = booted();
    assert!(apply_launch_target(&mut phone, &parse_launch_target("FilesApp#beach").unwrap()));
    assert_eq!(phone.screen(), Screen::App(0));

    let mut phone = booted();
    assert!(!apply_launch_target(&mut phone, &parse_launch_target("CameraApp").unwrap()));
    assert_eq!(phone.screen(), Screen::Home);
}

#[test]
fn keys_resolve_per_screen() {
    let home = Screen::Home;
    let app = Screen::App(0);

    assert_eq!(key_action(KeyCode::Char('j'), home, 0.1), Some(KeyAction::HomeNext));
    assert_eq!(key_action(KeyCode::Char('j'), app, 0.1), Some(KeyAction::FocusNext));
    assert_eq!(key_action(KeyCode::Enter, home, 0.1), Some(KeyAction::OpenSelected));
    assert_eq!(key_action(KeyCode::Enter, app, 0.1), Some(KeyAction::Activate));
    assert_eq!(key_action(KeyCode::Char('h'), app, 0.1), Some(KeyAction::Scrub(-0.1)));
    assert_eq!(key_action(KeyCode::Char('h'), home, 0.1), None);
    assert_eq!(key_action(KeyCode::Esc, app, 0.1), Some(KeyAction::Back));
    assert_eq!(
        key_action(KeyCode::Char(' '), home, 0.1),
        Some(KeyAction::Transport(TransportCmd::PlayPause))
    );
    assert_eq!(key_action(KeyCode::Char('q'), app, 0.1), Some(KeyAction::Quit));
}

#[test]
fn key_actions_drive_the_phone() {
    let mut phone = booted();
    assert!(!apply_key_action(KeyAction::HomeNext, &mut phone));
    assert!(!apply_key_action(KeyAction::OpenSelected, &mut phone));
    assert_eq!(phone.screen(), Screen::App(1));

    apply_key_action(KeyAction::Activate, &mut phone);
    assert!(phone.now_playing().is_some());

    apply_key_action(KeyAction::GoHome, &mut phone);
    assert_eq!(phone.screen(), Screen::Home);
    assert!(apply_key_action(KeyAction::Quit, &mut phone));
}

#[test]
fn control_commands_become_transport_events() {
    let mut phone = booted();
    phone.open_app("PodcastApp");
    phone.activate();

    assert!(!handle_control_cmd(ControlCmd::PlayPause, &mut phone));
    assert_eq!(phone.bus().pending(), 1);
    assert!(handle_control_cmd(ControlCmd::Quit, &mut phone));
}

#[test]
fn mpris_snapshot_changes_with_playback() {
    let mut phone = booted();
    let home = MprisSnapshot::of(&phone);
    assert_eq!(home, MprisSnapshot::default());

    phone.open_app("PodcastApp");
    phone.activate();
    let opened = MprisSnapshot::of(&phone);
    assert_ne!(opened, home);

    phone.transport(TransportCmd::PlayPause);
    phone.tick(std::time::Duration::ZERO, std::time::Duration::ZERO);
    assert_ne!(MprisSnapshot::of(&phone), opened);
}

#[test]
fn logging_writes_to_the_configured_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let settings = LoggingSettings {
        level: "debug".to_string(),
        file: Some(dir.path().join("logs").join("pocketos.log")),
    };

    let path = init_logging(&settings).unwrap();
    assert!(path.exists());
    tracing::info!("hello from the test");

    // only one global subscriber
    assert!(init_logging(&settings).is_err());
}
