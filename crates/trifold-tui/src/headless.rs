//! Headless mode for the trifold TUI.
//!
//! This module provides a way to run the viewport without a real terminal,
//! enabling E2E testing and automation. Actions and frame contents are sent
//! via channels and screen state is captured after each render.

use std::sync::Arc;
use std::time::Duration;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use trifold_client::FrameClient;
use trifold_engine::{Config, LayoutMode};

use crate::app::App;
use crate::event::Action;
use crate::shell;
use crate::theme::{BorderSet, Theme};

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// Commands the harness can inject into the headless loop.
#[derive(Debug)]
pub enum HeadlessCommand {
    /// A keyboard-equivalent action.
    Action(Action),
    /// Frame markup delivered as if the fetcher returned it.
    DeliverFrame { index: usize, markup: String },
}

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Current layout mode.
    pub layout: LayoutMode,
    /// Focused pane index.
    pub focus: usize,
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Number of script/style activations recorded so far.
    pub activations: usize,
}

/// Handle to control a headless TUI instance.
///
/// Use this to send actions, deliver frames, and observe state changes.
pub struct HeadlessHandle {
    cmd_tx: mpsc::UnboundedSender<HeadlessCommand>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.cmd_tx.send(HeadlessCommand::Action(action)).is_ok()
    }

    /// Deliver frame markup directly, bypassing the fetcher.
    pub fn deliver_frame(&self, index: usize, markup: impl Into<String>) -> bool {
        self.cmd_tx
            .send(HeadlessCommand::DeliverFrame {
                index,
                markup: markup.into(),
            })
            .is_ok()
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            if tokio::time::timeout(remaining, self.state_rx.changed())
                .await
                .is_err()
            {
                return None;
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        let text = text.to_string();
        self.wait_for(|s| s.screen_contents.contains(&text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Whether to fetch frames from the configured server on startup.
    pub fetch_on_start: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50, // Faster tick rate for testing
            fetch_on_start: false,
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the
/// background task.
pub fn run_headless(
    config: Config,
    headless: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(config, headless, cmd_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle { cmd_tx, state_rx };

    (handle, task)
}

async fn run_headless_loop(
    config: Config,
    headless: HeadlessConfig,
    mut cmd_rx: mpsc::UnboundedReceiver<HeadlessCommand>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(headless.width, headless.height);
    let mut terminal = Terminal::new(backend)?;

    let client = Arc::new(FrameClient::builder().base_url(&config.api_url).build()?);
    let mut app = App::new(config, client);
    if headless.fetch_on_start {
        app.start();
    }

    let theme = Theme::default();
    // Plain borders keep captured buffers stable across border styles.
    let borders = BorderSet::new(true);
    let tick_duration = Duration::from_millis(headless.tick_rate_ms);

    loop {
        // Deferred display recompute runs on the draw tick.
        app.view.on_frame();
        terminal.draw(|frame| shell::render_shell(frame, &app, &theme, &borders))?;

        let screen_contents = buffer_to_string(terminal.backend().buffer());
        let _ = state_tx.send(HeadlessState {
            layout: app.view.layout(),
            focus: app.view.focus(),
            screen_contents,
            should_quit: app.should_quit,
            show_help: app.show_help,
            activations: app.view.panes().document().activations().len(),
        });

        if app.should_quit {
            break;
        }

        app.process_updates();

        let cmd = tokio::select! {
            Some(cmd) = cmd_rx.recv() => Some(cmd),
            () = tokio::time::sleep(tick_duration) => None,
        };
        match cmd {
            Some(HeadlessCommand::Action(action)) => app.handle_action(action),
            Some(HeadlessCommand::DeliverFrame { index, markup }) => {
                app.deliver_frame(index, markup);
            }
            None => app.on_tick(),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to a string representation.
fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}
