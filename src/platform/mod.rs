pub mod telegram;

use async_trait::async_trait;

/// How the reply text should be rendered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Plain,
    MarkdownV2,
}

/// An inline button attached to a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Opaque payload handed back to `EventHandler::on_button`
    pub data: String,
}

/// A platform-neutral reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: ReplyFormat,
    pub buttons: Vec<Button>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
            buttons: Vec::new(),
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::MarkdownV2,
            buttons: Vec::new(),
        }
    }

    pub fn with_button(mut self, label: impl Into<String>, data: impl Into<String>) -> Self {
        self.buttons.push(Button {
            label: label.into(),
            data: data.into(),
        });
        self
    }
}

/// Events a chat platform delivers to the bot
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// `command` is the bare name, e.g. `start` for `/start@my_bot`
    async fn on_command(&self, command: &str) -> Reply;

    async fn on_text(&self, text: &str) -> Reply;

    /// `None` when the button payload is not recognised
    async fn on_button(&self, data: &str) -> Option<Reply>;
}

/// Extract the command name from text like `/start`, `/start@bot arg`.
///
/// Mirrors Telegram's `bot_command` entity: the text must begin with `/`
/// followed by 1 to 64 of `[A-Za-z0-9_]`. Anything else is ordinary text.
pub fn parse_command(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('/')?;
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..end];
    (1..=64).contains(&name.len()).then_some(name)
}
