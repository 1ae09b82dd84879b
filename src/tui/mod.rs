pub mod app;
pub mod input;
pub mod ui;

use anyhow::Result;
use ratatui::{backend::CrosstermBackend, prelude::*};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crate::{
    config::SensorSettings,
    tui::input::{map_key, Action},
};
use app::{ActivityLevel, App};

const POLL_INTERVAL: Duration = Duration::from_millis(200);
const PORT_RESCAN_INTERVAL: Duration = Duration::from_secs(3);

pub fn start(settings: SensorSettings) -> Result<()> {
    log::info!("[TUI] map-tester TUI starting...");

    let mut app = App::new(settings.sensor_ids.clone());
    match &settings.source {
        Some(path) => app.note(
            ActivityLevel::Info,
            format!(
                "Loaded {} sensor id(s) from {}",
                settings.sensor_ids.len(),
                path.display()
            ),
        ),
        None => app.note(
            ActivityLevel::Warn,
            "No sensor settings file found, sensor list is empty",
        ),
    }
    app.refresh_ports();

    // Setup terminal
    crossterm::terminal::enable_raw_mode()?;
    let mut terminal = restore_on_error(
        || {
            let mut stdout = io::stdout();
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen);
            let _ = crossterm::terminal::disable_raw_mode();
        },
    )?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::terminal::disable_raw_mode()?;

    if let Some(kind) = app.session_mut().disconnect() {
        log::info!("[TUI] closed {kind} on exit");
    }
    log::info!("[TUI] map-tester TUI stopped");
    res
}

/// Run `setup`; if it fails, run `restore` before returning the error.
fn restore_on_error<T>(
    setup: impl FnOnce() -> Result<T>,
    restore: impl FnOnce(),
) -> Result<T> {
    setup().inspect_err(|err| {
        log::error!("[TUI] terminal setup failed: {err:#}");
        restore();
    })
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut last_scan = Instant::now();

    loop {
        terminal.draw(|f| ui::render_ui(f, app))?;

        // Poll for input
        if crossterm::event::poll(POLL_INTERVAL)? {
            match crossterm::event::read() {
                Ok(crossterm::event::Event::Key(key)) => {
                    let action = map_key(key);
                    if action == Action::Quit {
                        break;
                    }
                    app.handle(action);
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("[TUI] input read error: {e}");
                    app.set_error(format!("input read error: {e}"));
                }
            }
        }

        if last_scan.elapsed() >= PORT_RESCAN_INTERVAL {
            app.refresh_ports();
            last_scan = Instant::now();
        }
    }

    terminal.clear()?;
    Ok(())
}
