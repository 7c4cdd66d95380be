//! Event handling for the trifold TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background task.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // Spawn blocking thread for event polling (crossterm uses blocking I/O)
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else {
                    // No event, send tick
                    if tx_clone.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, blocking until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Discrete viewport actions driven by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    FullscreenToggle,
    SelectLayout(usize),
    FocusIndex(usize),
    FocusNext,
    FocusPrev,
    Refresh,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    // Check for Ctrl+C first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('f') | KeyCode::Enter => Action::FullscreenToggle,
        KeyCode::Char('1') => Action::SelectLayout(0),
        KeyCode::Char('2') => Action::SelectLayout(1),
        KeyCode::Char('3') => Action::SelectLayout(2),
        KeyCode::F(n @ 1..=3) => Action::FocusIndex(n as usize - 1),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Action::FocusPrev,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_layout_keys_map_to_variants() {
        assert_eq!(key_to_action(key(KeyCode::Char('1'))), Action::SelectLayout(0));
        assert_eq!(key_to_action(key(KeyCode::Char('2'))), Action::SelectLayout(1));
        assert_eq!(key_to_action(key(KeyCode::Char('3'))), Action::SelectLayout(2));
    }

    #[test]
    fn test_focus_keys() {
        assert_eq!(key_to_action(key(KeyCode::Tab)), Action::FocusNext);
        assert_eq!(key_to_action(key(KeyCode::BackTab)), Action::FocusPrev);
        assert_eq!(key_to_action(key(KeyCode::F(2))), Action::FocusIndex(1));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(key), Action::Quit);
    }

    #[test]
    fn test_unmapped_key_is_none() {
        assert_eq!(key_to_action(key(KeyCode::Char('z'))), Action::None);
    }
}
