//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::handle_start_command;
use super::posts::handle_text;
use super::types::{HandlerDeps, HandlerError};
use super::uploads::handle_photo;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Only private chats are served. Branch order matters: commands are matched before the
/// generic text handler so `/start` never becomes a page.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_photo = deps.clone();
    let deps_text = deps;

    dptree::entry()
        .branch(start_handler())
        .branch(photo_handler(deps_photo))
        .branch(text_handler(deps_text))
}

fn is_private(msg: &Message) -> bool {
    msg.chat.is_private()
}

fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

/// Handler for /start and /help
fn start_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| {
            is_private(&msg)
                && msg
                    .text()
                    .map(|text| text.starts_with("/start") || text.starts_with("/help"))
                    .unwrap_or(false)
        })
        .endpoint(|bot: Bot, msg: Message| async move { handle_start_command(&bot, &msg).await })
}

/// Handler for photos
fn photo_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| is_private(&msg) && msg.photo().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                log::info!("📷 Photo from chat {}", msg.chat.id);
                handle_photo(&bot, &msg, &deps).await
            }
        })
}

/// Handler for plain text (anything that is not a command)
fn text_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| is_private(&msg) && msg.text().map(|text| !is_command(text)).unwrap_or(false))
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                log::info!("📝 Text from chat {}", msg.chat.id);
                handle_text(&bot, &msg, &deps).await
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_command() {
        assert!(is_command("/start"));
        assert!(is_command("/help me"));
        assert!(!is_command("Title: /start"));
        assert!(!is_command("hello"));
    }
}
