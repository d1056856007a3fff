//! Text → Telegraph page handler

use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode, ReplyParameters};
use teloxide::utils::html::escape;
use teloxide::utils::render::RenderMessageTextHelper;

use super::types::{sender_from_message, HandlerDeps, HandlerError};
use crate::publish::PublishError;
use crate::telegram::replies;
use crate::telegram::Bot;

/// Handle an incoming text: publish it and reply with the page URL
pub(super) async fn handle_text(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    // Entities rendered back to HTML so bold/links survive; plain text is escaped
    let Some(content) = msg.html_text().or_else(|| msg.text().map(escape)) else {
        return Ok(());
    };

    let status = bot
        .send_message(msg.chat.id, replies::PROCESSING)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    let sender = sender_from_message(msg);
    let reply = match deps.page_publisher.publish_text(&content, &sender).await {
        Ok(outcome) => escape(&outcome.url),
        Err(e @ PublishError::ContentRejected(_)) => {
            log::warn!("⚠️ Content rejected for chat {}: {}", msg.chat.id, e);
            escape(&e.user_message())
        }
        Err(e) => {
            log::error!("❌ Publishing failed for chat {}: {}", msg.chat.id, e);
            replies::error(&e.user_message())
        }
    };

    bot.edit_message_text(msg.chat.id, status.id, reply)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
