//! Telegraph Uploader - Telegram bot for image hosting and instant view pages
//!
//! Photos sent to the bot are uploaded to ImgBB (when an API key is configured) with envs.sh as
//! fallback. Text messages are published as pages on a Telegraph-compatible host.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging and text helpers
//! - `upload`: Image host dispatch with primary → fallback ordering
//! - `publish`: Title parsing, markup conversion and Telegraph page creation
//! - `telegram`: Telegram bot integration and handlers

pub mod cli;
pub mod core;
pub mod publish;
pub mod telegram;
pub mod upload;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult, Config};
pub use publish::{PagePublisher, PublishError, PublishOutcome, PublishRequest, Sender};
pub use telegram::UploaderBot;
pub use upload::{ImageProvider, UploadDispatcher, UploadError, UploadOutcome, UploadRequest};
