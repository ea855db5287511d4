use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

fn leading_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)```json\s*").expect("static regex"))
}

/// Remove fence markers: the first "```json" (any case, plus trailing
/// whitespace), then every remaining "```", then surrounding whitespace.
pub fn strip_fences(raw: &str) -> String {
    let without_tag = leading_fence().replace(raw, "");
    without_tag.replace("```", "").trim().to_string()
}

/// Parse a model reply into JSON. Only syntax is checked; shape is the
/// caller's concern. Never fails loudly: bad input yields `None`.
pub fn extract_json(raw: &str) -> Option<Value> {
    let cleaned = strip_fences(raw);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "model reply is not valid JSON");
            None
        }
    }
}
