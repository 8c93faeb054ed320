use std::sync::OnceLock;

use regex::Regex;

use super::StreamIdentifier;

static ID_AUTH_PATTERN: OnceLock<Regex> = OnceLock::new();
static STREAM_KEY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn id_auth_pattern() -> &'static Regex {
    ID_AUTH_PATTERN.get_or_init(|| {
        Regex::new(r"R(\d+_\d+)\?auth_key=([\w-]+)").expect("valid id/auth regex")
    })
}

fn stream_key_pattern() -> &'static Regex {
    STREAM_KEY_PATTERN
        .get_or_init(|| Regex::new(r"[rs]\d+_\d+_[a-f0-9]+\S*").expect("valid stream key regex"))
}

/// Find an `R<id>?auth_key=<key>` reference anywhere in the text.
pub fn extract_id_auth(text: &str) -> Option<StreamIdentifier> {
    let caps = id_auth_pattern().captures(text)?;
    Some(StreamIdentifier::IdAuth {
        stream_id: caps[1].to_string(),
        auth_key: caps[2].to_string(),
    })
}

/// Find the first raw stream key token, running up to the next whitespace.
pub fn extract_stream_key(text: &str) -> Option<String> {
    stream_key_pattern()
        .find(text)
        .map(|m| m.as_str().to_string())
}

/// Recognise a stream reference. Id/auth pairs win over stream keys.
pub fn extract(text: &str) -> Option<StreamIdentifier> {
    extract_id_auth(text).or_else(|| extract_stream_key(text).map(StreamIdentifier::StreamKey))
}
