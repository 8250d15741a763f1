//! Last-used search inputs, restored at startup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseType, SearchCategory};

/// Session schema version for invalidation on format changes
pub const SESSION_VERSION: u32 = 1;

/// The three inputs remembered across runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub database: DatabaseType,
    pub query: String,
    pub category: SearchCategory,
}

/// On-disk form of [`SessionState`].
///
/// The enums are stored as stable string tokens so a stale or hand-edited
/// file degrades field by field to defaults instead of failing the whole
/// load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub database_type: String,
    pub search_query: String,
    pub search_category: String,
}

impl StoredSession {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            database_type: state.database.encode().to_string(),
            search_query: state.query.clone(),
            search_category: state.category.encode().to_string(),
        }
    }

    pub fn into_state(self) -> SessionState {
        SessionState {
            database: DatabaseType::decode(&self.database_type),
            query: self.search_query,
            category: SearchCategory::decode(&self.search_category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_roundtrip_through_stored_form() {
        let state = SessionState {
            database: DatabaseType::NotifiedDevices,
            query: "glucometer".to_string(),
            category: SearchCategory::Manufacturer,
        };

        let restored = StoredSession::from_state(&state).into_state();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_unknown_tokens_degrade_per_field() {
        let stored = StoredSession {
            version: SESSION_VERSION,
            saved_at: Utc::now(),
            database_type: "no-such-register".to_string(),
            search_query: "kept".to_string(),
            search_category: "manufacturer".to_string(),
        };

        let state = stored.into_state();
        // The bad register token falls back alone; the other fields survive
        assert_eq!(state.database, DatabaseType::RegisteredDevices);
        assert_eq!(state.query, "kept");
        assert_eq!(state.category, SearchCategory::Manufacturer);
    }

    #[test]
    fn test_default_state() {
        let state = SessionState::default();
        assert_eq!(state.database, DatabaseType::RegisteredDevices);
        assert_eq!(state.category, SearchCategory::ProductName);
        assert!(state.query.is_empty());
    }
}
