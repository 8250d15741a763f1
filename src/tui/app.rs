//! Interactive search screen state and event handling.
//!
//! This module implements the main TUI application logic:
//!
//! - **Form state**: register, category and query text, persisted to the
//!   session file on every change
//! - **Search lifecycle**: an explicit [`SearchPhase`] state machine
//!   (Idle → Searching → Success/Error)
//! - **Stale-reply handling**: searches run on a worker thread and report
//!   back over a channel; every submission gets a monotonically increasing
//!   request id and only the reply matching the newest id is applied, so a
//!   re-submitted search always wins over the one it superseded
//! - **Status messages**: transient feedback for validation and clipboard
//!   operations
//!
//! The `App` struct owns all application state and runs the main event loop
//! via `run()`.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::client::{GeminiClient, SearchError, SearchOutcome};
use crate::clipboard::copy_result_to_clipboard;
use crate::models::{DatabaseType, SearchCategory, SearchRequest, SearchResultItem, Source};
use crate::session::{SessionState, save_session};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

/// Maximum query length accepted from the keyboard
const MAX_QUERY_LEN: usize = 256;

/// Lifecycle of the current search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing submitted yet
    Idle,
    /// A request is in flight
    Searching,
    /// The last search completed; results may still be empty
    Success,
    /// The last search failed; the message is shown until the next submit
    Error(String),
}

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// A worker thread's answer, tagged with the request id it belongs to
struct SearchReply {
    request_id: u64,
    outcome: Result<SearchOutcome, SearchError>,
}

pub struct App {
    client: GeminiClient,
    session_dir: Option<PathBuf>,
    // Form state
    database: DatabaseType,
    category: SearchCategory,
    query: String,
    // Search lifecycle
    phase: SearchPhase,
    results: Vec<SearchResultItem>,
    sources: Vec<Source>,
    selected_idx: usize,
    // Stale-reply protection: only the newest request id may land
    next_request_id: u64,
    current_request_id: Option<u64>,
    reply_tx: Sender<SearchReply>,
    reply_rx: Receiver<SearchReply>,
    // Status message and redraw tracking
    status_message: Option<StatusMessage>,
    should_quit: bool,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(client: GeminiClient, session_dir: Option<PathBuf>, initial: SessionState) -> Self {
        let (reply_tx, reply_rx) = channel();

        Self {
            client,
            session_dir,
            database: initial.database,
            category: initial.category,
            query: initial.query,
            phase: SearchPhase::Idle,
            results: Vec::new(),
            sources: Vec::new(),
            selected_idx: 0,
            next_request_id: 0,
            current_request_id: None,
            reply_tx,
            reply_rx,
            status_message: None,
            should_quit: false,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            // Clear expired status messages (marks dirty if cleared)
            let had_status = self.status_message.is_some();
            self.check_and_clear_expired_status();
            if had_status && self.status_message.is_none() {
                self.needs_redraw = true;
            }

            // Apply finished searches
            self.drain_replies();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| {
                    let state = RenderState {
                        database: self.database,
                        category: self.category,
                        query: &self.query,
                        phase: &self.phase,
                        results: &self.results,
                        sources: &self.sources,
                        selected_idx: self.selected_idx,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            // Handle events
            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
        }
    }

    /// Apply any replies the worker threads have delivered
    fn drain_replies(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.apply_reply(reply);
        }
    }

    /// Apply one worker reply, unless a newer request has superseded it
    fn apply_reply(&mut self, reply: SearchReply) {
        if self.current_request_id != Some(reply.request_id) {
            // Stale reply from a superseded search
            return;
        }
        self.current_request_id = None;

        match reply.outcome {
            Ok(outcome) => {
                self.results = outcome.results;
                self.sources = outcome.sources;
                self.selected_idx = 0;
                self.phase = SearchPhase::Success;
            }
            Err(e) => {
                self.results.clear();
                self.sources.clear();
                self.selected_idx = 0;
                self.phase = SearchPhase::Error(e.to_string());
            }
        }
        self.needs_redraw = true;
    }

    /// Validate the form and hand the search to a worker thread
    fn submit_search(&mut self) {
        if self.query.trim().is_empty() {
            // Rejected before any request is built; the phase is untouched
            self.set_status(
                "Please enter a search term.",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
            return;
        }

        let request = SearchRequest::new(&self.query, self.category, self.database);

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.current_request_id = Some(request_id);
        self.phase = SearchPhase::Searching;
        self.needs_redraw = true;

        let client = self.client.clone();
        let tx = self.reply_tx.clone();
        thread::spawn(move || {
            let outcome = client.search(&request);
            // The app may have quit while we were searching
            let _ = tx.send(SearchReply { request_id, outcome });
        });
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearQuery => {
                if self.query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.query.clear();
                    self.persist_session();
                    self.needs_redraw = true;
                }
            }
            Action::Submit => self.submit_search(),
            Action::NextDatabase => {
                self.database = self.database.next();
                self.persist_session();
                self.needs_redraw = true;
            }
            Action::PrevDatabase => {
                self.database = self.database.prev();
                self.persist_session();
                self.needs_redraw = true;
            }
            Action::NextCategory => {
                self.category = self.category.next();
                self.persist_session();
                self.needs_redraw = true;
            }
            Action::PrevCategory => {
                self.category = self.category.prev();
                self.persist_session();
                self.needs_redraw = true;
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::CopySelected => self.copy_selected(),
            Action::InputChar(c) => {
                if self.query.len() < MAX_QUERY_LEN {
                    self.query.push(c);
                    self.persist_session();
                    self.needs_redraw = true;
                }
            }
            Action::DeleteChar => {
                if self.query.pop().is_some() {
                    self.persist_session();
                    self.needs_redraw = true;
                }
            }
            Action::None => {}
        }
    }

    fn copy_selected(&mut self) {
        if self.results.is_empty() {
            self.set_status("✗ No result selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        }

        let Some(item) = self.results.get(self.selected_idx) else {
            self.set_status("✗ Invalid selection", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        match copy_result_to_clipboard(item) {
            Ok(()) => {
                self.set_status(
                    "✓ Copied to clipboard",
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Clipboard error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.results.len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    /// Write the current form state to the session file, ignoring failures
    fn persist_session(&self) {
        if let Some(dir) = &self.session_dir {
            let state = SessionState {
                database: self.database,
                query: self.query.clone(),
                category: self.category,
            };
            let _ = save_session(dir, &state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GeminiConfig;
    use crate::models::{DatabaseType, RegistrationStatus, SearchCategory};

    fn test_app() -> App {
        // Unreachable backend so an accidental real search fails fast
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://127.0.0.1:1".into(),
            api_key: "test-key".into(),
            timeout_secs: 1,
            ..Default::default()
        });
        App::new(client, None, SessionState::default())
    }

    fn test_item(name: &str) -> SearchResultItem {
        SearchResultItem {
            product_name: name.to_string(),
            generic_name: String::new(),
            manufacturer: String::new(),
            country: String::new(),
            representative_or_holder: String::new(),
            registration_number: "TZ/1".to_string(),
            status: RegistrationStatus::Active,
            dosage_form: None,
            strength: None,
            product_link: String::new(),
            manufacturer_link: String::new(),
        }
    }

    fn ok_reply(request_id: u64, names: &[&str]) -> SearchReply {
        SearchReply {
            request_id,
            outcome: Ok(SearchOutcome {
                results: names.iter().map(|n| test_item(n)).collect(),
                sources: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_empty_query_submit_never_starts_a_search() {
        let mut app = test_app();
        app.handle_action(Action::Submit);

        assert_eq!(app.phase, SearchPhase::Idle);
        assert!(app.current_request_id.is_none());
        let status = app.status_message.expect("validation message expected");
        assert_eq!(status.text, "Please enter a search term.");
        assert_eq!(status.message_type, MessageType::Error);
    }

    #[test]
    fn test_whitespace_query_is_rejected_too() {
        let mut app = test_app();
        app.query = "   ".to_string();
        app.handle_action(Action::Submit);

        assert_eq!(app.phase, SearchPhase::Idle);
        assert!(app.current_request_id.is_none());
    }

    #[test]
    fn test_submit_enters_searching_phase() {
        let mut app = test_app();
        app.query = "Panadol".to_string();
        app.handle_action(Action::Submit);

        assert_eq!(app.phase, SearchPhase::Searching);
        assert_eq!(app.current_request_id, Some(1));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let mut app = test_app();
        app.phase = SearchPhase::Searching;
        app.current_request_id = Some(2);

        // Reply for the superseded request 1 must not land
        app.apply_reply(ok_reply(1, &["stale"]));
        assert_eq!(app.phase, SearchPhase::Searching);
        assert!(app.results.is_empty());

        // The newest request's reply wins
        app.apply_reply(ok_reply(2, &["fresh"]));
        assert_eq!(app.phase, SearchPhase::Success);
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].product_name, "fresh");
    }

    #[test]
    fn test_error_reply_clears_results() {
        let mut app = test_app();
        app.results = vec![test_item("old")];
        app.phase = SearchPhase::Searching;
        app.current_request_id = Some(1);

        app.apply_reply(SearchReply {
            request_id: 1,
            outcome: Err(SearchError::Transport { detail: "refused".to_string() }),
        });

        assert!(app.results.is_empty());
        assert!(app.sources.is_empty());
        let SearchPhase::Error(msg) = &app.phase else {
            panic!("expected error phase");
        };
        assert!(msg.contains("could not be reached"));
    }

    #[test]
    fn test_resubmission_bumps_request_id() {
        let mut app = test_app();
        app.query = "Panadol".to_string();
        app.handle_action(Action::Submit);
        app.handle_action(Action::Submit);

        assert_eq!(app.current_request_id, Some(2));
        // A late reply to the first submission is now stale
        app.apply_reply(ok_reply(1, &["stale"]));
        assert_eq!(app.phase, SearchPhase::Searching);
    }

    #[test]
    fn test_register_and_category_cycling() {
        let mut app = test_app();
        app.handle_action(Action::NextDatabase);
        assert_eq!(app.database, DatabaseType::NotifiedDevices);

        app.handle_action(Action::PrevDatabase);
        assert_eq!(app.database, DatabaseType::RegisteredDevices);

        app.handle_action(Action::NextCategory);
        assert_eq!(app.category, SearchCategory::GenericName);
    }

    #[test]
    fn test_escape_with_empty_query_quits() {
        let mut app = test_app();
        app.handle_action(Action::ClearQuery);
        assert!(app.should_quit);
    }

    #[test]
    fn test_escape_with_query_clears_it() {
        let mut app = test_app();
        app.query = "Panadol".to_string();
        app.handle_action(Action::ClearQuery);

        assert!(app.query.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_query_input_is_capped() {
        let mut app = test_app();
        for _ in 0..(MAX_QUERY_LEN + 50) {
            app.handle_action(Action::InputChar('a'));
        }
        assert_eq!(app.query.len(), MAX_QUERY_LEN);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = test_app();
        app.results = vec![test_item("a"), test_item("b")];

        app.handle_action(Action::MoveUp);
        assert_eq!(app.selected_idx, 0);

        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.selected_idx, 1);
    }

    #[test]
    fn test_copy_with_no_results_sets_error_status() {
        let mut app = test_app();
        app.handle_action(Action::CopySelected);

        let status = app.status_message.expect("status expected");
        assert_eq!(status.message_type, MessageType::Error);
    }
}
