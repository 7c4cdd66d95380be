//! trifold-tui: Terminal UI for the trifold viewport multiplexer
//!
//! This crate provides the TUI layer for trifold, including:
//! - Keyboard-to-action translation for the viewport
//! - The app controller driving the viewport state machine
//! - Pane/status/footer rendering over the engine's display state
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
mod render;
mod shell;
mod theme;
mod widgets;

pub use app::{App, AppUpdate};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use trifold_engine;

use std::io::{self, stdout};
use std::sync::Arc;

use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use trifold_client::FrameClient;
use trifold_engine::Config;

use crate::theme::{BorderSet, Theme};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = Arc::new(FrameClient::builder().base_url(&config.api_url).build()?);
    let tick_rate_ms = config.tick_rate_ms;
    let ascii = config.ascii_borders;

    let mut app = App::new(config, client);
    app.start();

    let mut events = EventHandler::new(tick_rate_ms);
    let theme = Theme::default();
    let borders = BorderSet::from_env(ascii);

    let result = run_loop(&mut terminal, &mut app, &mut events, &theme, &borders).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    theme: &Theme,
    borders: &BorderSet,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Deferred display recompute runs on the draw tick.
        app.view.on_frame();
        terminal.draw(|frame| shell::render_shell(frame, app, theme, borders))?;

        // Deliver completed fetches before waiting on input.
        app.process_updates();

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = event::key_to_action(key);
                    app.handle_action(action);
                }
                Event::Tick => app.on_tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
