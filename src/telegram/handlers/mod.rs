//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! The same handler tree is used in production and in tests.

mod commands;
mod posts;
mod schema;
mod types;
mod uploads;

pub use schema::schema;
pub use types::{sender_from_message, HandlerDeps, HandlerError};
