//! Session file load/save with atomic writes

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::state::{SESSION_VERSION, SessionState, StoredSession};

const SESSION_FILENAME: &str = "session.json";

/// Directory holding the session file.
///
/// `TMDA_SEARCH_CONFIG_DIR` overrides the platform config directory
/// (`~/.config/tmda-search` on Linux).
pub fn get_session_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("TMDA_SEARCH_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::config_dir().context("Failed to resolve platform config directory")?;
    Ok(base.join("tmda-search"))
}

/// Path of the session file inside a session directory
pub fn session_file_path(session_dir: &Path) -> PathBuf {
    session_dir.join(SESSION_FILENAME)
}

/// Load the persisted session for a directory.
///
/// Every failure mode (missing file, unreadable JSON, version mismatch)
/// falls back to defaults. Persistence problems are never surfaced to the
/// user.
pub fn load_session(session_dir: &Path) -> SessionState {
    let path = session_file_path(session_dir);

    let Ok(contents) = fs::read_to_string(&path) else {
        return SessionState::default();
    };
    let Ok(stored) = serde_json::from_str::<StoredSession>(&contents) else {
        return SessionState::default();
    };
    if stored.version != SESSION_VERSION {
        return SessionState::default();
    }

    stored.into_state()
}

/// Save the session atomically (temp file + rename).
///
/// Callers are expected to ignore the result; a session that fails to save
/// costs the user a prefilled form on the next run, nothing more.
pub fn save_session(session_dir: &Path, state: &SessionState) -> Result<()> {
    fs::create_dir_all(session_dir).context("Failed to create session directory")?;

    let path = session_file_path(session_dir);
    let temp = session_dir.join(format!("{SESSION_FILENAME}.tmp"));
    let json = serde_json::to_string_pretty(&StoredSession::from_state(state))
        .context("Failed to serialize session")?;

    fs::write(&temp, json).context("Failed to write session temp file")?;
    fs::rename(&temp, &path).context("Failed to rename session temp file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::{DatabaseType, SearchCategory};

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let state = SessionState {
            database: DatabaseType::RegisteredMedicines,
            query: "Panadol".to_string(),
            category: SearchCategory::GenericName,
        };

        save_session(dir.path(), &state).unwrap();
        assert_eq!(load_session(dir.path()), state);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_session(dir.path()), SessionState::default());
    }

    #[test]
    fn test_load_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(session_file_path(dir.path()), "{not json at all").unwrap();

        assert_eq!(load_session(dir.path()), SessionState::default());
    }

    #[test]
    fn test_load_version_mismatch_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let json = format!(
            r#"{{"version": {}, "saved_at": "2026-01-01T00:00:00Z",
                "database_type": "registered-medicines", "search_query": "old",
                "search_category": "manufacturer"}}"#,
            SESSION_VERSION + 1
        );
        fs::write(session_file_path(dir.path()), json).unwrap();

        assert_eq!(load_session(dir.path()), SessionState::default());
    }

    #[test]
    fn test_restart_restores_exact_inputs() {
        // Previously stored {NotifiedDevices, "X", Manufacturer}: a fresh
        // load must produce exactly those values
        let dir = TempDir::new().unwrap();
        let state = SessionState {
            database: DatabaseType::NotifiedDevices,
            query: "X".to_string(),
            category: SearchCategory::Manufacturer,
        };
        save_session(dir.path(), &state).unwrap();

        let restored = load_session(dir.path());
        assert_eq!(restored.database, DatabaseType::NotifiedDevices);
        assert_eq!(restored.query, "X");
        assert_eq!(restored.category, SearchCategory::Manufacturer);
    }

    #[test]
    fn test_save_overwrites_previous_session() {
        let dir = TempDir::new().unwrap();
        let first = SessionState {
            database: DatabaseType::RegisteredDevices,
            query: "first".to_string(),
            category: SearchCategory::ProductName,
        };
        let second = SessionState {
            database: DatabaseType::RegisteredMedicines,
            query: "second".to_string(),
            category: SearchCategory::ManufacturingCountry,
        };

        save_session(dir.path(), &first).unwrap();
        save_session(dir.path(), &second).unwrap();
        assert_eq!(load_session(dir.path()), second);
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        save_session(dir.path(), &SessionState::default()).unwrap();

        let leftover: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftover.is_empty());
    }
}
