//! Handler types and dependencies

use std::path::PathBuf;
use std::sync::Arc;

use teloxide::types::Message;

use crate::publish::{PagePublisher, Sender};
use crate::upload::UploadDispatcher;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub upload_dispatcher: Arc<UploadDispatcher>,
    pub page_publisher: Arc<PagePublisher>,
    /// Root under which each photo gets its own temp directory
    pub temp_root: PathBuf,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(upload_dispatcher: Arc<UploadDispatcher>, page_publisher: Arc<PagePublisher>, temp_root: PathBuf) -> Self {
        Self {
            upload_dispatcher,
            page_publisher,
            temp_root,
        }
    }
}

/// Extracts the author of a message. Channel posts and service messages have no `from`.
pub fn sender_from_message(msg: &Message) -> Sender {
    match msg.from.as_ref() {
        Some(user) => Sender {
            id: Some(user.id.0),
            display_name: user.first_name.clone(),
            username: user.username.clone(),
        },
        None => Sender::new("Anonymous"),
    }
}
