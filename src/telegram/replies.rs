//! User-facing reply texts (HTML parse mode)

use indoc::indoc;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html::escape;

use crate::upload::UploadOutcome;

pub const PROCESSING: &str = "Processing....⏳";

pub const UPLOAD_FAILED: &str = "❌ Upload failed, please try again later.";

pub const START: &str = indoc! {"
    Hello <b>Dear!</b>

    👋 <b>Welcome to the Telegraph Uploader Bot!</b>

    With this bot, you can:
     • <b>Upload Photos</b>: send me a photo and I'll upload it to an image host, providing you with a link.
     • <b>Create Instant View Links</b>: send me a text and I'll publish it as a Telegraph page.

    📝 <b>Custom Title</b>:
    <pre>Title: {title}
    {content}</pre>

    📝 <b>Example</b>:
    <pre>Title: My First Telegraph Post
    This is the content of my first Telegraph post!
    I'm using the Telegraph Uploader Bot to publish this.</pre>

    Without a title line, your name is used as the title.
"};

/// Text and optional action buttons for a successful upload.
pub fn upload_success(outcome: &UploadOutcome) -> (String, Option<InlineKeyboardMarkup>) {
    let text = format!(
        "{}\n\n<i>Hosted on {}</i>",
        escape(&outcome.url),
        outcome.provider.host_name()
    );

    let mut buttons = Vec::new();
    if let Ok(url) = url::Url::parse(&outcome.url) {
        buttons.push(InlineKeyboardButton::url("🔗 Open", url));
    }
    if let Some(delete_url) = outcome.delete_url.as_deref().and_then(|u| url::Url::parse(u).ok()) {
        buttons.push(InlineKeyboardButton::url("🗑 Delete", delete_url));
    }

    let keyboard = if buttons.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(vec![buttons]))
    };
    (text, keyboard)
}

/// Unexpected failures are shown verbatim.
pub fn error(err: &impl std::fmt::Display) -> String {
    format!("<b>Error:</b>\n{}", escape(&err.to_string()))
}
