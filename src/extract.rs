//! Lenient JSON extraction from model output
//!
//! Generative text is not guaranteed well-formed: the model may wrap its
//! JSON in a markdown fence, lead with prose, or trail with commentary.
//! This module recovers a structured value with an ordered chain of
//! parsing strategies, first success wins:
//!
//! 1. Parse the whole input as JSON.
//! 2. Parse the interior of a fenced ``` block (optionally tagged `json`).
//! 3. Parse the span from the first `{` to the last `}` (falling back to
//!    the first `[` / last `]` when no brace span exists, for responses
//!    that are bare lists).
//!
//! Each strategy's parse failure falls through silently. Total failure
//! carries the original text for diagnostics.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Fenced code block, optionally tagged `json`. `(?s)` so the body may
/// span lines.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fence regex is valid")
});

/// No strategy recovered a JSON value from the text
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not parse JSON from model output: {raw:?}")]
    NoJson { raw: String },
}

impl ExtractError {
    /// The original model text, for user-facing diagnostics
    pub fn raw_text(&self) -> &str {
        match self {
            ExtractError::NoJson { raw } => raw,
        }
    }
}

/// Recover a JSON value from text that nominally contains JSON
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    debug!(text_len = text.len(), "extract_json: called");

    // Strategy 1: the whole input is JSON
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        debug!("extract_json: whole input parsed");
        return Ok(value);
    }

    // Strategy 2: fenced code block
    if let Some(caps) = FENCE_RE.captures(text)
        && let Some(inner) = caps.get(1)
        && let Ok(value) = serde_json::from_str::<Value>(inner.as_str())
    {
        debug!("extract_json: fenced block parsed");
        return Ok(value);
    }

    // Strategy 3: first-{ to last-} span, then first-[ to last-] for
    // bare-list responses
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let Some(value) = parse_span(text, open, close) {
            debug!(%open, "extract_json: delimiter span parsed");
            return Ok(value);
        }
    }

    debug!("extract_json: all strategies failed");
    Err(ExtractError::NoJson { raw: text.to_string() })
}

/// Parse the inclusive span between the first `open` and last `close`
fn parse_span(text: &str, open: char, close: char) -> Option<Value> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
