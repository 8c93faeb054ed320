use super::StreamIdentifier;

/// Pull endpoint for streams addressed by id and auth key
pub const AUTH_BASE_URL: &str = "rtmp://jk1.pull.flve.cc/dream/";

/// Mirrors serving raw stream keys, in probe order
pub const STREAM_KEY_HOSTS: [&str; 2] = [
    "rtmp://bcdn5.livcdn.com/live/",
    "rtmp://pull.cdnsi.com/live/",
];

/// Candidate RTMP URLs for an identifier, highest priority first.
pub fn resolve(identifier: &StreamIdentifier) -> Vec<String> {
    match identifier {
        StreamIdentifier::IdAuth {
            stream_id,
            auth_key,
        } => vec![format!("{}{}?auth_key={}", AUTH_BASE_URL, stream_id, auth_key)],
        StreamIdentifier::StreamKey(key) => stream_key_candidates(key),
    }
}

/// Strip the `r`/`s` prefix and build one URL per mirror.
/// Keys with any other prefix yield no candidates.
pub fn stream_key_candidates(key: &str) -> Vec<String> {
    let Some(cleaned) = key.strip_prefix(['r', 's']) else {
        return Vec::new();
    };
    STREAM_KEY_HOSTS
        .iter()
        .map(|host| format!("{}{}", host, cleaned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_auth_single_url() {
        let id = StreamIdentifier::IdAuth {
            stream_id: "501_99".to_string(),
            auth_key: "abc-123".to_string(),
        };
        assert_eq!(
            resolve(&id),
            vec!["rtmp://jk1.pull.flve.cc/dream/501_99?auth_key=abc-123".to_string()]
        );
    }

    #[test]
    fn test_stream_key_two_mirrors_in_order() {
        let id = StreamIdentifier::StreamKey("r501_99_deadbeef_extra".to_string());
        assert_eq!(
            resolve(&id),
            vec![
                "rtmp://bcdn5.livcdn.com/live/501_99_deadbeef_extra".to_string(),
                "rtmp://pull.cdnsi.com/live/501_99_deadbeef_extra".to_string(),
            ]
        );
    }

    #[test]
    fn test_only_first_char_stripped() {
        let urls = stream_key_candidates("ss1_2_ab");
        assert_eq!(urls[0], "rtmp://bcdn5.livcdn.com/live/s1_2_ab");
        assert_eq!(urls[1], "rtmp://pull.cdnsi.com/live/s1_2_ab");
    }

    #[test]
    fn test_unknown_prefix_yields_nothing() {
        assert!(stream_key_candidates("x1_2_ab").is_empty());
        assert!(stream_key_candidates("").is_empty());
        assert!(stream_key_candidates("R1_2_ab").is_empty());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let id = StreamIdentifier::StreamKey("s7_8_0af".to_string());
        assert_eq!(resolve(&id), resolve(&id));
    }
}
