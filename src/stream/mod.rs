pub mod extract;
pub mod resolve;

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

pub use extract::extract;
pub use resolve::resolve;

static AUTH_KEY_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Mask `auth_key=` values so messages and URLs can be logged.
pub fn redact_secrets(text: &str) -> Cow<'_, str> {
    AUTH_KEY_PATTERN
        .get_or_init(|| Regex::new(r"(auth_key=)[\w-]+").expect("valid auth key regex"))
        .replace_all(text, "${1}***")
}

/// A stream reference recognised in a user's message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamIdentifier {
    /// Raw stream key such as `r501_99_deadbeef`, prefix included
    StreamKey(String),
    /// Stream id (`501_99`) with the auth key that unlocks it
    IdAuth { stream_id: String, auth_key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_auth_key_in_url() {
        assert_eq!(
            redact_secrets("rtmp://jk1.pull.flve.cc/dream/501_99?auth_key=abc-123"),
            "rtmp://jk1.pull.flve.cc/dream/501_99?auth_key=***"
        );
    }

    #[test]
    fn test_redact_every_occurrence_in_message() {
        assert_eq!(
            redact_secrets("a R1_2?auth_key=k1 b R3_4?auth_key=k_2-x c"),
            "a R1_2?auth_key=*** b R3_4?auth_key=*** c"
        );
    }

    #[test]
    fn test_text_without_secret_untouched() {
        let url = "rtmp://bcdn5.livcdn.com/live/501_99_deadbeef_extra";
        assert!(matches!(redact_secrets(url), Cow::Borrowed(u) if u == url));
    }
}
