use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};

use crate::assets::AssetCache;
use crate::audio::RodioAudio;
use crate::mpris::ControlCmd;
use crate::phone::Phone;
use crate::ui;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    match logging::init_logging(&settings.logging) {
        Ok(path) => info!(log = %path.display(), "pocketos starting"),
        Err(e) => eprintln!("pocketos: logging disabled: {e}"),
    }
    if let Some(msg) = config_problem {
        warn!("{msg}");
    }

    let target = env::args().nth(1).and_then(|arg| startup::parse_launch_target(&arg));

    let assets = AssetCache::load_dir(&settings.assets.dir);
    let audio = RodioAudio::new(assets.root());
    let (width, height) = terminal::size().unwrap_or((80, 24));
    let mut phone = Phone::boot(
        &assets,
        Box::new(audio),
        ui::app_area(Rect::new(0, 0, width, height)),
        &settings.ui,
    );
    if let Some(target) = &target {
        startup::apply_launch_target(&mut phone, target);
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = settings
        .mpris
        .enabled
        .then(|| crate::mpris::spawn_mpris(control_tx));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut phone,
        mpris.as_ref(),
        &control_rx,
    );

    phone.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));
    info!("pocketos stopped");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

#[cfg(test)]
mod tests;
