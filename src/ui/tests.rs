use super::*;
use crate::assets::AssetCache;
use crate::host::testing::FakeAudio;
use ratatui::{Terminal, backend::TestBackend};
use serde_json::json;

fn phone(term: Rect) -> Phone {
    let assets = AssetCache::default()
        .with_json("podcast", json!([{"key": "a", "name": "Alpha", "artist": "Ann"}]))
        .with_json("files", json!([{"id": "beach", "title": "Beach", "image": "beach.png"}]));
    Phone::boot(
        &assets,
        Box::new(FakeAudio::new().with_duration("a", 75.0)),
        app_area(term),
        &UiSettings::default(),
    )
}

fn render(phone: &Phone, term: Rect) -> String {
    let mut terminal = Terminal::new(TestBackend::new(term.width, term.height)).unwrap();
    terminal
        .draw(|f| draw(f, phone, &UiSettings::default()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn app_area_is_the_body_inside_its_border() {
    let area = app_area(Rect::new(0, 0, 80, 30));
    // 3 header + 3 status + 4 footer rows, plus the body border
    assert_eq!(area, Area::new(78.0, 18.0));
}

#[test]
fn controls_text_depends_on_the_screen() {
    let home = controls_text(Screen::Home, 0.05);
    assert!(home.contains("[j/k] move"));
    assert!(!home.contains("scrub"));

    let app = controls_text(Screen::App(0), 0.05);
    assert!(app.contains("[h/l] scrub -/+5%"));
    assert!(app.contains("[esc] back"));
}

#[test]
fn home_screen_lists_the_apps() {
    let term = Rect::new(0, 0, 80, 30);
    let out = render(&phone(term), term);
    assert!(out.contains("Files"));
    assert!(out.contains("Podcast"));
    assert!(out.contains("Nothing selected"));
}

#[test]
fn podcast_detail_shows_track_and_times() {
    let term = Rect::new(0, 0, 80, 30);
    let mut phone = phone(term);
    phone.open_app("PodcastApp");
    phone.activate();

    let out = render(&phone, term);
    assert!(out.contains("Alpha"));
    assert!(out.contains("Ann"));
    assert!(out.contains("1:15"));
    assert!(out.contains("Stopped: Alpha - Ann [0:00 / 1:15]"));
}

#[test]
fn elements_outside_the_body_are_clipped() {
    let inner = Rect::new(1, 1, 10, 5);
    let element = Element {
        id: crate::scene::ElementId(0),
        x: 8.0,
        y: 4.0,
        origin: (0.0, 0.0),
        widget: Widget::Image(crate::widgets::Image::new("k", 6.0, 3.0)),
    };
    assert_eq!(element_rect(&element, inner), Rect::new(9, 5, 2, 1));

    let far = Element { x: 40.0, ..element };
    assert!(element_rect(&far, inner).is_empty());
}
