use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;

use telegraph_uploader::cli::{Cli, Commands};
use telegraph_uploader::core::{config, init_logger, log_configuration, Config};
use telegraph_uploader::publish::{PagePublisher, Sender};
use telegraph_uploader::upload::UploadDispatcher;
use telegraph_uploader::UploaderBot;

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env before any config static is read
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    let config = Config::from_env();

    match cli.command {
        Some(Commands::Run) => run_bot(config).await,
        Some(Commands::Upload { file }) => run_upload(config, file).await,
        Some(Commands::Publish { file, author, username }) => run_publish(config, file, author, username).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(config).await
        }
    }
}

/// Run the bot until Ctrl-C
async fn run_bot(config: Config) -> Result<()> {
    log_configuration(&config);

    let bot = UploaderBot::new(config)?;
    bot.start().await?;
    bot.run().await;
    bot.stop().await;

    Ok(())
}

/// Upload one file from the command line
async fn run_upload(config: Config, file: PathBuf) -> Result<()> {
    log_configuration(&config);

    let dispatcher = UploadDispatcher::new(&config.upload)?;
    match dispatcher.upload(&file).await? {
        Some(outcome) => {
            println!("{}", outcome.url);
            if let Some(delete_url) = outcome.delete_url {
                println!("delete: {}", delete_url);
            }
            Ok(())
        }
        None => Err(anyhow::anyhow!("Upload failed on every configured host")),
    }
}

/// Publish one text file from the command line
async fn run_publish(config: Config, file: PathBuf, author: String, username: Option<String>) -> Result<()> {
    let text = fs_err::tokio::read_to_string(&file).await?;
    // The file is plain text; escape it so it is not taken for markup
    let html = teloxide::utils::html::escape(&text);

    let mut sender = Sender::new(author);
    if let Some(username) = username {
        sender = sender.with_username(username);
    }

    let publisher = PagePublisher::new(config.publish)?;
    let outcome = publisher
        .publish_text(&html, &sender)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("{}", outcome.url);

    Ok(())
}
