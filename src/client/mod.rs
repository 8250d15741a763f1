//! Outbound search calls to the generative-AI backend.

pub mod gemini;

use thiserror::Error;

pub use gemini::{GeminiClient, GeminiConfig, SearchOutcome};

/// Errors from a search call.
///
/// The `Display` text of every variant is written to be shown to the user
/// as-is; transport and parser internals are kept in the `detail` fields and
/// never rendered.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The HTTP call itself failed (network error or non-2xx status)
    #[error("The search service could not be reached. Please try again.")]
    Transport { detail: String },

    /// The backend replied without any usable text content
    #[error("The search service returned no results content. Please try again.")]
    NoContent,

    /// The reply carried a payload that could not be decoded
    #[error("The search results could not be processed. Please try again.")]
    Malformed { detail: String },
}
