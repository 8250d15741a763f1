//! Locates the structured payload inside the backend's free-form reply.
//!
//! The backend is instructed to wrap its JSON array in a fenced ```json
//! block, but real replies routinely surround the block with commentary or
//! skip the fence entirely. Extraction is a separate step from decoding so
//! "no payload present" (a plain-prose reply) can be told apart from "payload
//! present but garbled".

/// Outcome of scanning a reply for its payload block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A candidate block was found; its contents still need decoding
    Found(String),
    /// The reply contains no recognizable payload block
    Missing,
}

/// Scan a raw reply for the structured payload.
///
/// A fenced code block wins; otherwise the outermost `[` .. `]` slice is
/// taken as the candidate. Surrounding commentary is ignored in both cases.
pub fn extract_payload(raw: &str) -> Payload {
    if let Some(block) = extract_fenced_block(raw) {
        return Payload::Found(block);
    }

    if let Some(start) = raw.find('[')
        && let Some(end) = raw.rfind(']')
        && end > start
    {
        return Payload::Found(raw[start..=end].to_string());
    }

    Payload::Missing
}

/// Extract the body of the first fenced code block, tolerating an info
/// string such as `json` after the opening fence
fn extract_fenced_block(raw: &str) -> Option<String> {
    let fence_start = raw.find("```")?;
    let after_fence = &raw[fence_start + 3..];

    // The info string runs to the end of the opening line
    let body_start = after_fence.find('\n')?;
    let body = &after_fence[body_start + 1..];

    let fence_end = body.find("```")?;
    Some(body[..fence_end].trim().to_string())
}
