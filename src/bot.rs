use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info};

use crate::markdown::escape_markdown_v2;
use crate::platform::{EventHandler, Reply};
use crate::probe::LivenessChecker;
use crate::stream;

pub const WELCOME_TEXT: &str = "👋 Selamat datang!\n\n\
    Kirim kode stream dari Canary (stream key atau auth_key) untuk mendapatkan link RTMP dan statusnya.";
pub const PROMPT_TEXT: &str =
    "📥 Kirimkan kode stream seperti r501_... atau Rxxx_xxx?auth_key=...";
pub const NOT_RECOGNIZED_TEXT: &str =
    "❌ Format tidak dikenali. Kirim kode stream Canary atau stream key seperti r501_...";
pub const UNKNOWN_COMMAND_TEXT: &str = "❌ Perintah tidak dikenal.";

pub const CHECK_BUTTON_LABEL: &str = "🔍 Cek Stream";
pub const CHECK_BUTTON_DATA: &str = "start_check";

const STATUS_ACTIVE: &str = "✅ Aktif";
const STATUS_INACTIVE: &str = "❌ Tidak Aktif";

/// Answers stream lookups: recognise, resolve, probe, report.
pub struct StreamBot<C> {
    checker: C,
}

impl<C: LivenessChecker> StreamBot<C> {
    pub fn new(checker: C) -> Self {
        Self { checker }
    }

    /// Build the reply for a free-text message.
    pub async fn handle_text(&self, text: &str) -> Reply {
        let text = text.trim();

        // Id/auth pairs resolve to exactly one URL; stream keys to both mirrors
        if let Some(identifier) = stream::extract(text) {
            let candidates = stream::resolve(&identifier);
            debug!(
                "Recognised stream reference in {:?}, {} candidate(s)",
                stream::redact_secrets(text),
                candidates.len()
            );
            if let Some((url, active)) = self.pick(&candidates).await {
                return format_stream_info(url, active);
            }
        }

        Reply::plain(NOT_RECOGNIZED_TEXT)
    }

    /// Probe all candidates and choose the first live one, else the first one.
    async fn pick<'a>(&self, candidates: &'a [String]) -> Option<(&'a str, bool)> {
        let first = candidates.first()?;
        let results = join_all(candidates.iter().map(|url| self.checker.is_active(url))).await;

        let chosen = candidates
            .iter()
            .zip(results)
            .find(|(_, active)| *active)
            .map(|(url, _)| (url.as_str(), true))
            .unwrap_or((first.as_str(), false));

        info!(
            "Selected {} ({}) from {} candidate(s)",
            stream::redact_secrets(chosen.0),
            if chosen.1 { "active" } else { "inactive" },
            candidates.len()
        );
        Some(chosen)
    }
}

/// Render the MarkdownV2 status message for a chosen URL.
pub fn format_stream_info(url: &str, active: bool) -> Reply {
    let status = if active { STATUS_ACTIVE } else { STATUS_INACTIVE };
    Reply::markdown(format!(
        "*Stream Info :*\n\
         • *RTMP URL:*\n```{}```\n\n\
         • *Status* {}",
        escape_markdown_v2(url),
        status
    ))
}

#[async_trait]
impl<C: LivenessChecker> EventHandler for StreamBot<C> {
    async fn on_command(&self, command: &str) -> Reply {
        match command {
            "start" | "help" => {
                Reply::plain(WELCOME_TEXT).with_button(CHECK_BUTTON_LABEL, CHECK_BUTTON_DATA)
            }
            _ => Reply::plain(UNKNOWN_COMMAND_TEXT),
        }
    }

    async fn on_text(&self, text: &str) -> Reply {
        self.handle_text(text).await
    }

    async fn on_button(&self, data: &str) -> Option<Reply> {
        (data == CHECK_BUTTON_DATA).then(|| Reply::plain(PROMPT_TEXT))
    }
}
