use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{
    BotCommand, ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode,
    ReplyParameters,
};
use tracing::{info, warn};

use crate::platform::{parse_command, Button, EventHandler, Reply, ReplyFormat};
use crate::stream::redact_secrets;

/// Commands advertised in Telegram's command menu
fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Mulai dan kirim kode stream"),
        BotCommand::new("help", "Cara memakai bot"),
    ]
}

fn is_allowed(allowed_user_ids: &[u64], user_id: u64) -> bool {
    allowed_user_ids.is_empty() || allowed_user_ids.contains(&user_id)
}

/// Messages without a sender only pass an empty allow-list.
fn admits_sender(allowed_user_ids: &[u64], sender: Option<u64>) -> bool {
    match sender {
        Some(user_id) => is_allowed(allowed_user_ids, user_id),
        None => allowed_user_ids.is_empty(),
    }
}

/// Group replies quote the request so concurrent lookups stay matched;
/// private chats don't need it.
fn quote_request(is_private: bool, request_id: MessageId) -> Option<ReplyParameters> {
    (!is_private).then(|| ReplyParameters::new(request_id))
}

/// One button per row, in reply order
fn keyboard(buttons: &[Button]) -> Option<InlineKeyboardMarkup> {
    if buttons.is_empty() {
        return None;
    }
    let rows = buttons
        .iter()
        .map(|b| vec![InlineKeyboardButton::callback(b.label.clone(), b.data.clone())])
        .collect::<Vec<_>>();
    Some(InlineKeyboardMarkup::new(rows))
}

/// Run the Telegram bot platform
pub async fn run(
    bot: Bot,
    handler: Arc<dyn EventHandler>,
    allowed_user_ids: Vec<u64>,
) -> Result<()> {
    info!("Starting Telegram platform...");

    if let Err(e) = bot.set_my_commands(bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    let message_users = allowed_user_ids.clone();
    let callback_users = allowed_user_ids;

    let tree = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_map(move |msg: Message| {
                    let sender = msg.from.as_ref().map(|u| u.id.0);
                    if admits_sender(&message_users, sender) {
                        Some(msg)
                    } else {
                        warn!("Ignoring message from user {:?}", sender);
                        None
                    }
                })
                .endpoint(handle_message),
        )
        .branch(
            Update::filter_callback_query()
                .filter_map(move |q: CallbackQuery| {
                    if is_allowed(&callback_users, q.from.id.0) {
                        Some(q)
                    } else {
                        warn!("Ignoring callback from user {}", q.from.id.0);
                        None
                    }
                })
                .endpoint(handle_callback),
        );

    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![handler])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    reply: Reply,
    quote: Option<ReplyParameters>,
) -> ResponseResult<()> {
    let mut request = bot.send_message(chat_id, reply.text);
    if let Some(quote) = quote {
        request = request.reply_parameters(quote);
    }
    if reply.format == ReplyFormat::MarkdownV2 {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }
    if let Some(markup) = keyboard(&reply.buttons) {
        request = request.reply_markup(markup);
    }
    request.await?;
    Ok(())
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    handler: Arc<dyn EventHandler>,
) -> ResponseResult<()> {
    let text = match msg.text() {
        Some(t) => t.to_string(),
        None => return Ok(()),
    };
    let user_id = msg.from.as_ref().map(|u| u.id.0).unwrap_or_default();

    info!(
        "Telegram message from {}: {}",
        user_id,
        redact_secrets(&text)
    );

    let reply = match parse_command(&text) {
        Some(command) => handler.on_command(command).await,
        None => {
            // Probing can take a while per candidate
            bot.send_chat_action(msg.chat.id, ChatAction::Typing)
                .await
                .ok();
            handler.on_text(&text).await
        }
    };

    let quote = quote_request(msg.chat.is_private(), msg.id);
    send_reply(&bot, msg.chat.id, reply, quote).await
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    handler: Arc<dyn EventHandler>,
) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    info!("Callback from {}: {}", q.from.id.0, data);

    let Some(reply) = handler.on_button(data).await else {
        warn!("Unknown callback data: {}", data);
        return Ok(());
    };

    match q.regular_message() {
        Some(message) => {
            let mut request = bot.edit_message_text(message.chat.id, message.id, reply.text);
            if reply.format == ReplyFormat::MarkdownV2 {
                request = request.parse_mode(ParseMode::MarkdownV2);
            }
            request.await?;
        }
        None => send_reply(&bot, ChatId::from(q.from.id), reply, None).await?,
    }

    Ok(())
}
