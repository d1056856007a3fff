//! Telegram bot integration and handlers

pub mod bot;
pub mod download;
pub mod handlers;
pub mod replies;

/// Bot type used across handlers
pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, Command, UploaderBot};
pub use handlers::{schema, HandlerDeps, HandlerError};
