//! Pulls reply text out of a generation response whose nesting is not stable.
//!
//! Known shapes are tried in order; the first one that resolves to a string
//! wins. When none match, the whole response is pretty-printed so the caller
//! still gets something to look at. [`extract_text`] therefore never fails.

use serde_json::Value;
use tracing::{debug, warn};

/// JSON pointers into the known response shapes, highest priority first.
pub const TEXT_PATHS: [&str; 4] = [
    "/response/candidate/0/content/part/0/text",
    "/candidate/0/content/parts/0/text",
    "/response/candidates/0/content/text",
    "/candidates/0/content/parts/0/text",
];

pub fn extract_text(raw: &Value) -> String {
    for path in TEXT_PATHS {
        if let Some(text) = raw.pointer(path).and_then(Value::as_str) {
            debug!(path, "reply text found");
            return text.to_string();
        }
    }

    warn!("no known text path in generation response, returning raw JSON");
    stringify(raw)
}

fn stringify(raw: &Value) -> String {
    serde_json::to_string_pretty(raw).unwrap_or_else(|e| {
        warn!(error = %e, "pretty-printing response failed");
        raw.to_string()
    })
}
