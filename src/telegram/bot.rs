//! Bot initialization and lifecycle
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - `UploaderBot`, the long-lived service object with explicit start/run/stop

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::ClientBuilder;
use teloxide::dispatching::Dispatcher;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;

use crate::core::config::{self, Config};
use crate::core::error::AppResult;
use crate::publish::PagePublisher;
use crate::telegram::handlers::{schema, HandlerDeps};
use crate::telegram::Bot;
use crate::upload::UploadDispatcher;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "how to create posts and upload photos")]
    Help,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, client setup)
pub fn create_bot(config: &Config) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::bot_timeout()).build()?;
    let bot = Bot::with_client(config.bot_token.clone(), client);

    match config.bot_api_url.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// The bot as a whole: built once per process from an injected [`Config`].
pub struct UploaderBot {
    bot: Bot,
    deps: HandlerDeps,
}

impl UploaderBot {
    /// Validates the config and wires the upload and publish cores.
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let bot = create_bot(&config)?;
        let upload_dispatcher = Arc::new(UploadDispatcher::new(&config.upload)?);
        let page_publisher = Arc::new(PagePublisher::new(config.publish.clone())?);
        let deps = HandlerDeps::new(upload_dispatcher, page_publisher, PathBuf::from(&config.temp_dir));

        Ok(Self { bot, deps })
    }

    /// Fetches the bot identity, registers commands and prepares the temp root.
    pub async fn start(&self) -> AppResult<Me> {
        let me = self.bot.get_me().await?;

        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            log::warn!("Failed to register bot commands: {}", e);
        }
        fs_err::tokio::create_dir_all(&self.deps.temp_root).await?;

        log::info!("🚀 Bot started at @{}", me.username());
        Ok(me)
    }

    /// Dispatches updates until Ctrl-C.
    pub async fn run(&self) {
        Dispatcher::builder(self.bot.clone(), schema(self.deps.clone()))
            .default_handler(|upd| async move {
                log::debug!("Unhandled update: {:?}", upd.id);
            })
            .error_handler(LoggingErrorHandler::with_custom_text("An error from the update handler"))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    /// Cleans the temp root if nothing is left in it.
    pub async fn stop(&self) {
        // remove_dir refuses non-empty directories, which is what we want
        if let Err(e) = fs_err::tokio::remove_dir(&self.deps.temp_root).await {
            log::debug!("Temp root kept: {}", e);
        }
        log::info!("👋 Session stopped");
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{PublishConfig, UploadConfig};

    fn config(token: &str, bot_api_url: Option<&str>) -> Config {
        Config {
            bot_token: token.to_string(),
            bot_api_url: bot_api_url.map(|s| s.to_string()),
            temp_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            upload: UploadConfig::default(),
            publish: PublishConfig::default(),
        }
    }

    #[test]
    fn test_commands_are_lowercase() {
        let commands = Command::bot_commands();
        let names: Vec<_> = commands.iter().map(|c| c.command.trim_start_matches('/')).collect();
        assert_eq!(names, vec!["start", "help"]);
    }

    #[test]
    fn test_create_bot_rejects_invalid_api_url() {
        assert!(create_bot(&config("123:ABC", Some("not a url"))).is_err());
        assert!(create_bot(&config("123:ABC", Some("http://localhost:8081"))).is_ok());
    }

    #[test]
    fn test_uploader_bot_requires_token() {
        assert!(UploaderBot::new(config("", None)).is_err());
        assert!(UploaderBot::new(config("123:ABC", None)).is_ok());
    }
}
