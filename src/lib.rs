//! TMDA Database Search - AI-grounded search of TMDA public registers
//!
//! This library backs a terminal front-end for searching the Tanzania
//! Medicines and Medical Devices Authority registers (registered medical
//! devices, notified medical devices, registered medicines). The lookup
//! itself is delegated to a generative-AI backend with web-search grounding;
//! this crate supplies:
//!
//! - Prompt construction pinning down the reply schema per register
//! - A Gemini REST client issuing one grounded call per search
//! - Tolerant normalization of the free-form reply into typed records
//! - Session persistence of the last-used search inputs
//! - CLI and interactive TUI front-ends
//!
//! # Example
//!
//! ```no_run
//! use tmda_search::client::{GeminiClient, GeminiConfig};
//! use tmda_search::models::{DatabaseType, SearchCategory, SearchRequest};
//!
//! let client = GeminiClient::new(GeminiConfig::from_env()?);
//! let request = SearchRequest::new(
//!     "Panadol",
//!     SearchCategory::ProductName,
//!     DatabaseType::RegisteredMedicines,
//! );
//! let outcome = client.search(&request)?;
//! println!("{} result(s)", outcome.results.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod models;
pub mod parsers;
pub mod prompt;
pub mod session;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use client::{GeminiClient, GeminiConfig, SearchError, SearchOutcome};
pub use models::{DatabaseType, SearchCategory, SearchRequest, SearchResultItem, Source};
pub use parsers::normalize_response;
pub use prompt::build_search_prompt;
pub use session::{SessionState, load_session, save_session};
