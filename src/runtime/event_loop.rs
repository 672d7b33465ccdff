use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::phone::{Phone, Screen, TransportCmd};
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::ui;

/// What a key press does, resolved against the current screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KeyAction {
    Quit,
    HomeNext,
    HomePrev,
    OpenSelected,
    FocusNext,
    FocusPrev,
    Scrub(f32),
    Activate,
    Back,
    GoHome,
    Transport(TransportCmd),
}

pub fn key_action(code: KeyCode, screen: Screen, scrub_step: f32) -> Option<KeyAction> {
    let shared = match code {
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            Some(KeyAction::Transport(TransportCmd::PlayPause))
        }
        KeyCode::Char('x') => Some(KeyAction::Transport(TransportCmd::Stop)),
        KeyCode::Char('n') => Some(KeyAction::Transport(TransportCmd::Next)),
        KeyCode::Char('b') => Some(KeyAction::Transport(TransportCmd::Previous)),
        _ => None,
    };
    if shared.is_some() {
        return shared;
    }

    match screen {
        Screen::Home => match code {
            KeyCode::Char('j') | KeyCode::Down => Some(KeyAction::HomeNext),
            KeyCode::Char('k') | KeyCode::Up => Some(KeyAction::HomePrev),
            KeyCode::Enter | KeyCode::Char('l') => Some(KeyAction::OpenSelected),
            _ => None,
        },
        Screen::App(_) => match code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(KeyAction::FocusNext),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(KeyAction::FocusPrev),
            KeyCode::Char('h') | KeyCode::Left => Some(KeyAction::Scrub(-scrub_step)),
            KeyCode::Char('l') | KeyCode::Right => Some(KeyAction::Scrub(scrub_step)),
            KeyCode::Enter => Some(KeyAction::Activate),
            KeyCode::Esc | KeyCode::Backspace => Some(KeyAction::Back),
            KeyCode::Char('H') => Some(KeyAction::GoHome),
            _ => None,
        },
    }
}

/// Apply `action`. Returns true when the loop should stop.
pub fn apply_key_action(action: KeyAction, phone: &mut Phone) -> bool {
    match action {
        KeyAction::Quit => return true,
        KeyAction::HomeNext => phone.home_next(),
        KeyAction::HomePrev => phone.home_prev(),
        KeyAction::OpenSelected => phone.open_selected(),
        KeyAction::FocusNext => phone.focus_next(),
        KeyAction::FocusPrev => phone.focus_prev(),
        KeyAction::Scrub(delta) => phone.scrub(delta),
        KeyAction::Activate => phone.activate(),
        KeyAction::Back => phone.back(),
        KeyAction::GoHome => phone.go_home(),
        KeyAction::Transport(cmd) => phone.transport(cmd),
    }
    false
}

/// Apply a command from MPRIS. Returns true when the loop should stop.
pub fn handle_control_cmd(cmd: ControlCmd, phone: &mut Phone) -> bool {
    let transport = match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => TransportCmd::Play,
        ControlCmd::Pause => TransportCmd::Pause,
        ControlCmd::PlayPause => TransportCmd::PlayPause,
        ControlCmd::Stop => TransportCmd::Stop,
        ControlCmd::Next => TransportCmd::Next,
        ControlCmd::Prev => TransportCmd::Previous,
    };
    phone.transport(transport);
    false
}

/// Main terminal event loop: ticks the phone, keeps MPRIS in sync, draws
/// and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    phone: &mut Phone,
    mpris: Option<&MprisHandle>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.ui.tick_ms);
    let started = Instant::now();
    let mut last_tick = started;
    let mut last_mpris: Option<MprisSnapshot> = None;

    loop {
        // Events queued by the previous round of input are dispatched here,
        // before the open app's frame update.
        let now = Instant::now();
        phone.tick(now - last_tick, now - started);
        last_tick = now;

        // Keep MPRIS in sync even when a track ends on its own.
        if let Some(mpris) = mpris {
            let snapshot = MprisSnapshot::of(phone);
            if last_mpris.as_ref() != Some(&snapshot) {
                update_mpris(mpris, phone);
                last_mpris = Some(snapshot);
            }
        }

        terminal.draw(|f| ui::draw(f, phone, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, phone) {
                return Ok(());
            }
        }

        if !event::poll(tick)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(action) = key_action(key.code, phone.screen(), settings.ui.scrub_step)
                else {
                    continue;
                };
                if apply_key_action(action, phone) {
                    return Ok(());
                }
            }
            Event::Resize(width, height) => {
                phone.resize(ui::app_area(Rect::new(0, 0, width, height)));
            }
            _ => {}
        }
    }
}
