//! Splits a completion payload into separate chat messages.
//!
//! The scenario marks each message as `<br>text</br>`. The opening tag may be written `<br/>`,
//! tags are case-insensitive and a message may span several lines.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Returned as the only message when the payload object carries none of the known text fields.
pub const EMPTY_REPLY_FALLBACK: &str = "Извините, не удалось получить ответ от сервера.";

/// Tried in order when `result` is missing or empty.
const ALTERNATIVE_FIELDS: [&str; 3] = ["response", "content", "message"];

static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<br\s*/?>\s*(.*?)\s*</br>").expect("valid segment regex"));
static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid open tag regex"));
static CLOSE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</br>").expect("valid close tag regex"));

/// Extracts the ordered list of messages from one completion payload.
///
/// Field precedence: non-empty `result`, then the first present of `response`, `content`,
/// `message`, else [`EMPTY_REPLY_FALLBACK`]. A payload that is not an object is returned
/// as its string form.
pub fn parse_reply(payload: &Value) -> Vec<String> {
    let Some(object) = payload.as_object() else {
        return vec![value_text(payload)];
    };

    let raw = match object.get("result").filter(|v| is_truthy(v)) {
        Some(result) => value_text(result),
        None => match ALTERNATIVE_FIELDS.iter().find_map(|field| object.get(*field)) {
            Some(value) => value_text(value),
            None => return vec![EMPTY_REPLY_FALLBACK.to_string()],
        },
    };

    split_segments(&raw)
}

/// Splits on paired `<br>...</br>` tags; without any pair, strips stray tags and returns the whole text.
fn split_segments(raw: &str) -> Vec<String> {
    let segments: Vec<String> = SEGMENT
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect();

    if segments.is_empty() {
        let text = OPEN_TAG.replace_all(raw, "\n");
        let text = CLOSE_TAG.replace_all(&text, "");
        let text = text.trim();
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
    }

    segments.into_iter().filter(|s| !s.is_empty()).collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
