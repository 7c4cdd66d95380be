//! Application state and update logic for the trifold TUI.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;
use trifold_client::FrameClient;
use trifold_engine::{Config, Document, PaneSet, ViewState, SLOT_COUNT};

use crate::event::Action;

/// Ticks a notification stays visible.
const NOTIFICATION_TICKS: usize = 12;

/// A completed fetch delivered back to the app.
#[derive(Debug)]
pub enum AppUpdate {
    /// One frame's markup arrived (or failed).
    Frame {
        index: usize,
        result: trifold_client::Result<String>,
    },
    /// The `/frames` listing arrived (or failed).
    FrameList {
        result: trifold_client::Result<Vec<String>>,
    },
}

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// The viewport this app drives.
    pub view: ViewState,

    /// Frame names advertised by the server, once listed.
    pub frame_names: Vec<String>,

    /// Configuration.
    pub config: Config,

    /// Transient status message.
    pub notification: Option<String>,

    /// Latest markup per slot, as delivered by the fetcher.
    contents: Vec<String>,

    client: Arc<FrameClient>,
    update_tx: mpsc::UnboundedSender<AppUpdate>,
    update_rx: mpsc::UnboundedReceiver<AppUpdate>,

    /// Per-slot fetch-in-flight flags (prevents duplicate spawns).
    fetching: [bool; SLOT_COUNT],

    notification_ttl: usize,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: Config, client: Arc<FrameClient>) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            should_quit: false,
            show_help: false,
            view: ViewState::new(PaneSet::new(Document::new())),
            frame_names: Vec::new(),
            config,
            notification: None,
            contents: vec![String::new(); SLOT_COUNT],
            client,
            update_tx,
            update_rx,
            fetching: [false; SLOT_COUNT],
            notification_ttl: 0,
        };
        // Schedule the first display recompute for the first draw tick.
        app.rerender();
        app
    }

    /// Kick off the frame listing and the initially visible frames.
    ///
    /// Must run inside a tokio runtime.
    pub fn start(&mut self) {
        self.request_frame_list();
        self.request_visible_frames();
    }

    /// Latest markup per slot.
    #[must_use]
    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    /// Total frame count advertised by the server, once seen.
    #[must_use]
    pub fn total_frames(&self) -> Option<u64> {
        self.client.total_frames()
    }

    /// Title for the pane at `index`: the advertised frame name when known.
    #[must_use]
    pub fn pane_title(&self, index: usize) -> String {
        self.frame_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Space {index}"))
    }

    /// Handle a keyboard-driven action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::FullscreenToggle => {
                self.view.toggle_fullscreen();
                self.request_visible_frames();
                self.rerender();
            }
            Action::SelectLayout(variant) => match self.view.cycle_layout(variant) {
                Ok(()) => {
                    self.request_visible_frames();
                    self.rerender();
                }
                Err(e) => self.notify(e.to_string()),
            },
            Action::FocusIndex(index) => {
                self.view.set_focus(index);
                self.rerender();
            }
            Action::FocusNext => self.move_focus(1),
            Action::FocusPrev => self.move_focus(-1),
            Action::Refresh => self.refresh_visible_frames(),
            Action::Quit | Action::Help | Action::None => {}
        }
    }

    /// Drain completed fetches; re-renders when pane content changed.
    pub fn process_updates(&mut self) {
        let mut changed = false;
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                AppUpdate::Frame { index, result } => {
                    self.fetching[index] = false;
                    match result {
                        Ok(markup) => {
                            if self.contents[index] != markup {
                                self.contents[index] = markup;
                                changed = true;
                            }
                        }
                        Err(e) => {
                            warn!(frame = index, error = %e, "frame fetch failed");
                            self.notify(format!("frame {index}: {e}"));
                        }
                    }
                }
                AppUpdate::FrameList { result } => match result {
                    Ok(names) => self.frame_names = names,
                    Err(e) => {
                        warn!(error = %e, "frame listing failed");
                        self.notify(format!("frames: {e}"));
                    }
                },
            }
        }
        if changed {
            self.rerender();
        }
    }

    /// Deliver one frame's markup directly, bypassing the fetcher.
    ///
    /// Used by the headless harness; the run loop delivers through
    /// [`process_updates`](Self::process_updates).
    pub fn deliver_frame(&mut self, index: usize, markup: impl Into<String>) {
        if index < SLOT_COUNT {
            self.contents[index] = markup.into();
            self.rerender();
        }
    }

    /// Advance time-based state by one tick.
    pub fn on_tick(&mut self) {
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Show a transient notification.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    fn move_focus(&mut self, delta: isize) {
        let count = self.view.layout().pane_count() as isize;
        let focus = self.view.focus() as isize;
        let next = (focus + delta).rem_euclid(count);
        self.view.set_focus(usize::try_from(next).unwrap_or(0));
        self.rerender();
    }

    fn rerender(&mut self) {
        let contents = self.contents.clone();
        self.view.render(&contents);
    }

    fn request_visible_frames(&mut self) {
        for index in 0..self.view.layout().pane_count() {
            self.request_frame(index);
        }
    }

    fn request_frame(&mut self, index: usize) {
        if self.fetching[index] {
            return;
        }
        self.fetching[index] = true;
        let client = Arc::clone(&self.client);
        let tx = self.update_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_frame(index).await;
            let _ = tx.send(AppUpdate::Frame { index, result });
        });
    }

    fn refresh_visible_frames(&mut self) {
        for index in 0..self.view.layout().pane_count() {
            if self.fetching[index] {
                continue;
            }
            self.fetching[index] = true;
            let client = Arc::clone(&self.client);
            let tx = self.update_tx.clone();
            tokio::spawn(async move {
                client.invalidate_frame(index).await;
                let result = client.fetch_frame(index).await;
                let _ = tx.send(AppUpdate::Frame { index, result });
            });
        }
    }

    fn request_frame_list(&mut self) {
        let client = Arc::clone(&self.client);
        let tx = self.update_tx.clone();
        tokio::spawn(async move {
            let result = client.frames().await;
            let _ = tx.send(AppUpdate::FrameList { result });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trifold_engine::LayoutMode;

    fn test_app() -> App {
        let client = Arc::new(FrameClient::builder().build().unwrap());
        App::new(Config::default(), client)
    }

    #[tokio::test]
    async fn test_layout_keys_drive_the_viewport() {
        let mut app = test_app();
        app.handle_action(Action::SelectLayout(1));
        assert_eq!(app.view.layout(), LayoutMode { variant: 1, rotation: 0 });

        app.handle_action(Action::SelectLayout(1));
        assert_eq!(app.view.layout(), LayoutMode { variant: 1, rotation: 1 });
    }

    #[tokio::test]
    async fn test_fullscreen_toggle_round_trip() {
        let mut app = test_app();
        app.handle_action(Action::SelectLayout(2));
        app.handle_action(Action::FullscreenToggle);
        assert_eq!(app.view.layout(), LayoutMode::default());

        app.handle_action(Action::FullscreenToggle);
        assert_eq!(app.view.layout(), LayoutMode { variant: 2, rotation: 0 });
    }

    #[tokio::test]
    async fn test_focus_cycles_and_wraps() {
        let mut app = test_app();
        app.handle_action(Action::SelectLayout(2));
        app.handle_action(Action::FocusNext);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.view.focus(), 2);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.view.focus(), 0);
        app.handle_action(Action::FocusPrev);
        assert_eq!(app.view.focus(), 2);
    }

    #[tokio::test]
    async fn test_invalid_layout_variant_notifies_without_mutation() {
        let mut app = test_app();
        app.handle_action(Action::SelectLayout(1));
        let layout = app.view.layout();

        app.handle_action(Action::SelectLayout(7));
        assert_eq!(app.view.layout(), layout);
        assert!(app.notification.as_deref().unwrap_or("").contains("variant"));
    }

    #[tokio::test]
    async fn test_delivered_frames_reach_the_slots() {
        let mut app = test_app();
        app.handle_action(Action::SelectLayout(1));
        app.deliver_frame(0, "<p>left</p>");
        app.deliver_frame(1, "<p>right</p>");

        let doc = app.view.panes().document();
        let slot1 = doc.slot(1).unwrap();
        let p = slot1.children()[0].as_element().unwrap();
        assert_eq!(p.text_content(), "right");
    }

    #[tokio::test]
    async fn test_help_closes_before_quit() {
        let mut app = test_app();
        app.handle_action(Action::Help);
        assert!(app.show_help);

        app.handle_action(Action::Quit);
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_any_action_closes_help_first() {
        let mut app = test_app();
        app.handle_action(Action::Help);
        app.handle_action(Action::FocusNext);
        assert!(!app.show_help);
        assert_eq!(app.view.focus(), 0);
    }

    #[tokio::test]
    async fn test_notification_expires_after_ticks() {
        let mut app = test_app();
        app.notify("hello");
        for _ in 0..NOTIFICATION_TICKS {
            app.on_tick();
        }
        assert_eq!(app.notification, None);
    }

    #[tokio::test]
    async fn test_pane_title_falls_back_to_slot_index() {
        let mut app = test_app();
        assert_eq!(app.pane_title(1), "Space 1");
        app.frame_names = vec!["alpha".into(), "beta".into()];
        assert_eq!(app.pane_title(1), "beta");
    }
}
