//! Gemini REST client with Google Search grounding.
//!
//! One search maps to exactly one `generateContent` call with the
//! `google_search` tool enabled, so the model can back its answer with web
//! citations. No retries are attempted here; the configured timeout is the
//! only bound on a slow backend.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};

use super::SearchError;
use crate::models::{SearchRequest, SearchResultItem, Source};
use crate::parsers::normalize_response;
use crate::prompt::build_search_prompt;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL of the API endpoint
    pub base_url: String,
    /// Model name to use
    pub model: String,
    /// API key sent with every request
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: String::new(),
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    /// Build a config from the environment.
    ///
    /// `GEMINI_API_KEY` is required. `TMDA_SEARCH_API_URL` and
    /// `TMDA_SEARCH_MODEL` override the endpoint and model.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable not set")?;

        let mut config = Self { api_key, ..Default::default() };
        if let Ok(url) = std::env::var("TMDA_SEARCH_API_URL") {
            config.base_url = url;
        }
        if let Ok(model) = std::env::var("TMDA_SEARCH_MODEL") {
            config.model = model;
        }
        Ok(config)
    }
}

/// Result set and citations of one completed search. Replaced wholesale by
/// the caller on every new search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchResultItem>,
    pub sources: Vec<Source>,
}

/// Client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    /// Issue exactly one grounded search call and normalize the reply.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let prompt = build_search_prompt(request);
        let reply = self.generate(&prompt)?;

        let text = reply.text.ok_or(SearchError::NoContent)?;
        let results = normalize_response(&text, request.database())
            .map_err(|e| SearchError::Malformed { detail: e.to_string() })?;

        Ok(SearchOutcome { results, sources: reply.sources })
    }

    /// Perform the outbound `generateContent` call.
    fn generate(&self, prompt: &str) -> Result<GenerateReply, SearchError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build();

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "tools": [{ "google_search": {} }],
        });
        let body_str = serde_json::to_string(&body)
            .map_err(|e| SearchError::Transport { detail: format!("serialize error: {e}") })?;

        let resp = agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", &self.config.api_key)
            .send_string(&body_str)
            .map_err(|e: ureq::Error| SearchError::Transport { detail: transport_detail(e) })?;

        let resp_str = resp
            .into_string()
            .map_err(|e| SearchError::Transport { detail: e.to_string() })?;
        let value: Value = serde_json::from_str(&resp_str)
            .map_err(|e| SearchError::Malformed { detail: e.to_string() })?;

        Ok(parse_generate_reply(&value))
    }
}

fn transport_detail(error: ureq::Error) -> String {
    match error {
        ureq::Error::Status(code, _) => format!("service returned status {code}"),
        ureq::Error::Transport(t) => t.to_string(),
    }
}

/// The parts of a `generateContent` response this application consumes
struct GenerateReply {
    text: Option<String>,
    sources: Vec<Source>,
}

/// Pull the reply text and grounding citations out of a response body.
///
/// Multi-part candidates are joined into one text; a candidate with no text
/// parts (blocked prompt, empty candidates list) comes back as `None`.
fn parse_generate_reply(value: &Value) -> GenerateReply {
    let candidate = &value["candidates"][0];

    let text = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|text| !text.trim().is_empty());

    let sources = collect_sources(&candidate["groundingMetadata"]["groundingChunks"]);

    GenerateReply { text, sources }
}

/// Build the citation list from grounding chunks.
///
/// Chunks without a URI are dropped; duplicate URIs collapse to the first
/// title seen; a chunk without a title falls back to its URI.
fn collect_sources(chunks: &Value) -> Vec<Source> {
    let mut sources: Vec<Source> = Vec::new();

    if let Some(chunks) = chunks.as_array() {
        for chunk in chunks {
            let web = &chunk["web"];
            let Some(uri) = web["uri"].as_str().map(str::trim).filter(|u| !u.is_empty()) else {
                continue;
            };
            if sources.iter().any(|s| s.uri == uri) {
                continue;
            }

            let title = web["title"]
                .as_str()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(uri);
            sources.push(Source { uri: uri.to_string(), title: title.to_string() });
        }
    }

    sources
}
