//! Command handlers

use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode, ReplyParameters};

use super::types::HandlerError;
use crate::telegram::replies;
use crate::telegram::Bot;

/// Handle /start and /help
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    log::info!("👋 /start from chat {}", msg.chat.id);

    bot.send_message(msg.chat.id, replies::START)
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}
