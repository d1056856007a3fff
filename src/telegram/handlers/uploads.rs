//! Photo upload handler

use teloxide::prelude::*;
use teloxide::types::{Message, MessageId, ParseMode, PhotoSize, ReplyParameters};

use super::types::{HandlerDeps, HandlerError};
use crate::core::error::AppResult;
use crate::telegram::download::{download_photo, ProgressMessage, TempDownload};
use crate::telegram::replies;
use crate::telegram::Bot;
use crate::upload::UploadOutcome;

/// Handle an incoming photo: download, upload to the image hosts, reply with the link
pub(super) async fn handle_photo(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    // Largest size Telegram offers
    let Some(photo) = msg
        .photo()
        .and_then(|sizes| sizes.iter().max_by_key(|p| u64::from(p.width) * u64::from(p.height)))
    else {
        return Ok(());
    };

    let status = bot
        .send_message(msg.chat.id, replies::PROCESSING)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    let user_id = msg.from.as_ref().map(|u| u.id.0).unwrap_or_default();

    let (text, keyboard) = match upload_photo(bot, msg.chat.id, status.id, user_id, photo, deps).await {
        Ok(Some(outcome)) => replies::upload_success(&outcome),
        Ok(None) => (replies::UPLOAD_FAILED.to_string(), None),
        Err(e) => {
            log::error!("❌ Photo upload failed for user {}: {}", user_id, e);
            (replies::error(&e), None)
        }
    };

    let request = bot
        .edit_message_text(msg.chat.id, status.id, text)
        .parse_mode(ParseMode::Html);
    match keyboard {
        Some(keyboard) => request.reply_markup(keyboard).await?,
        None => request.await?,
    };
    Ok(())
}

/// The temp directory lives exactly as long as this call; error paths rely on the drop guard.
async fn upload_photo(
    bot: &Bot,
    chat_id: ChatId,
    status_id: MessageId,
    user_id: u64,
    photo: &PhotoSize,
    deps: &HandlerDeps,
) -> AppResult<Option<UploadOutcome>> {
    let temp = TempDownload::create(&deps.temp_root, user_id).await?;
    let mut progress = ProgressMessage::new(chat_id, status_id);

    let path = download_photo(bot, &photo.file.id, temp.dir(), &mut progress).await?;
    let outcome = deps.upload_dispatcher.upload(&path).await;
    temp.cleanup().await;
    Ok(outcome?)
}
