//! Persistence of the last-used search inputs.
//!
//! A small versioned JSON file in the platform config directory remembers
//! the register, query text and category between runs:
//! - macOS: `~/Library/Application Support/tmda-search/session.json`
//! - Linux: `~/.config/tmda-search/session.json`
//! - Windows: `%APPDATA%\tmda-search\session.json`
//!
//! Reads fall back to defaults on any failure and writes are best-effort;
//! this layer never produces a user-visible error.

pub mod persistence;
pub mod state;

pub use persistence::{get_session_dir, load_session, save_session, session_file_path};
pub use state::{SESSION_VERSION, SessionState, StoredSession};
