/// Characters Telegram MarkdownV2 requires to be escaped outside entities.
const ESCAPE_CHARS: &str = r"\_*[]()~`>#+-=|{}.!";

/// Escape text for Telegram's MarkdownV2 parse mode.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPE_CHARS.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_markdown_v2("abc 123 XYZ"), "abc 123 XYZ");
        assert_eq!(escape_markdown_v2("✅ Aktif"), "✅ Aktif");
    }

    #[test]
    fn test_every_special_char_escaped_once() {
        for c in ESCAPE_CHARS.chars() {
            let out = escape_markdown_v2(&c.to_string());
            assert_eq!(out, format!("\\{}", c), "char {:?}", c);
        }
    }

    #[test]
    fn test_rtmp_url() {
        assert_eq!(
            escape_markdown_v2("rtmp://jk1.pull.flve.cc/dream/501_99?auth_key=abc-123"),
            r"rtmp://jk1\.pull\.flve\.cc/dream/501\_99?auth\_key\=abc\-123"
        );
    }

    #[test]
    fn test_backslash_is_escaped() {
        assert_eq!(escape_markdown_v2(r"a\b"), r"a\\b");
    }
}
