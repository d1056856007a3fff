use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// ImgBB API key (https://api.imgbb.com/)
/// Read from IMGBB_API_KEY environment variable
/// When unset or empty, photo uploads go straight to envs.sh
pub static IMGBB_API_KEY: Lazy<Option<String>> =
    Lazy::new(|| env::var("IMGBB_API_KEY").ok().filter(|key| !key.trim().is_empty()));

/// Telegraph-compatible document host domain
/// Read from DOMAIN environment variable
/// Default: graph.org
pub static DOMAIN: Lazy<String> = Lazy::new(|| env::var("DOMAIN").unwrap_or_else(|_| "graph.org".to_string()));

/// Telegraph API base URL override
/// Read from TELEGRAPH_API_URL environment variable
/// Default: https://api.<DOMAIN>
pub static TELEGRAPH_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("TELEGRAPH_API_URL").ok());

/// Short name used for the throwaway Telegraph account created per post
/// Read from TELEGRAPH_SHORT_NAME environment variable
pub static TELEGRAPH_SHORT_NAME: Lazy<String> =
    Lazy::new(|| env::var("TELEGRAPH_SHORT_NAME").unwrap_or_else(|_| "Ns Bots".to_string()));

/// ImgBB upload endpoint
/// Read from IMGBB_UPLOAD_URL environment variable
pub static IMGBB_UPLOAD_URL: Lazy<String> =
    Lazy::new(|| env::var("IMGBB_UPLOAD_URL").unwrap_or_else(|_| "https://api.imgbb.com/1/upload".to_string()));

/// envs.sh upload endpoint
/// Read from ENVS_UPLOAD_URL environment variable
pub static ENVS_UPLOAD_URL: Lazy<String> =
    Lazy::new(|| env::var("ENVS_UPLOAD_URL").unwrap_or_else(|_| "https://envs.sh".to_string()));

/// Accept the `content|TITLE` shorthand in text messages
/// Read from PIPE_TITLE environment variable ("1" / "true" / "yes")
/// Default: disabled
pub static PIPE_TITLE: Lazy<bool> = Lazy::new(|| {
    env::var("PIPE_TITLE")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
});

/// Temporary files directory for downloaded photos
/// Read from TEMP_FILES_DIR environment variable
/// Default: ./downloads
pub static TEMP_FILES_DIR: Lazy<String> =
    Lazy::new(|| env::var("TEMP_FILES_DIR").unwrap_or_else(|_| "./downloads".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Custom Bot API server URL
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for a single image host upload (in seconds)
    pub const UPLOAD_TIMEOUT_SECS: u64 = 15;

    /// Timeout for Telegraph API calls (in seconds)
    pub const PUBLISH_TIMEOUT_SECS: u64 = 15;

    /// Timeout for Bot API requests (in seconds)
    /// Generous because photo downloads go through the same client
    pub const BOT_REQUEST_TIMEOUT_SECS: u64 = 120;

    /// Image host upload timeout duration
    pub fn upload_timeout() -> Duration {
        Duration::from_secs(UPLOAD_TIMEOUT_SECS)
    }

    /// Telegraph API timeout duration
    pub fn publish_timeout() -> Duration {
        Duration::from_secs(PUBLISH_TIMEOUT_SECS)
    }

    /// Bot API timeout duration
    pub fn bot_timeout() -> Duration {
        Duration::from_secs(BOT_REQUEST_TIMEOUT_SECS)
    }
}

/// Progress message configuration
pub mod progress {
    use super::Duration;

    /// Minimum interval between progress message edits (in seconds)
    pub const EDIT_INTERVAL_SECS: u64 = 3;

    /// Progress edit interval duration
    pub fn edit_interval() -> Duration {
        Duration::from_secs(EDIT_INTERVAL_SECS)
    }
}

/// Image host settings consumed by [`crate::upload::UploadDispatcher`].
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Primary host credential; `None` disables the primary host entirely.
    pub imgbb_api_key: Option<SecretString>,
    pub imgbb_url: String,
    pub envs_url: String,
    pub timeout: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            imgbb_api_key: None,
            imgbb_url: "https://api.imgbb.com/1/upload".to_string(),
            envs_url: "https://envs.sh".to_string(),
            timeout: network::upload_timeout(),
        }
    }
}

/// Document host settings consumed by [`crate::publish::PagePublisher`].
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Public domain used to build page URLs, e.g. `graph.org`.
    pub domain: String,
    /// API base; derived from `domain` when not overridden.
    pub api_url: String,
    pub short_name: String,
    pub pipe_title: bool,
    pub timeout: Duration,
}

impl PublishConfig {
    /// Settings for a given domain, with the API at `https://api.<domain>`.
    pub fn for_domain(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            api_url: format!("https://api.{}", domain),
            short_name: "Ns Bots".to_string(),
            pipe_title: false,
            timeout: network::publish_timeout(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self::for_domain("graph.org")
    }
}

/// Everything the bot needs, resolved once at startup and injected downstream.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub bot_api_url: Option<String>,
    pub temp_dir: String,
    pub upload: UploadConfig,
    pub publish: PublishConfig,
}

impl Config {
    /// Builds the configuration from the environment statics above.
    pub fn from_env() -> Self {
        let mut publish = PublishConfig::for_domain(&DOMAIN);
        if let Some(api_url) = TELEGRAPH_API_URL.as_ref() {
            publish.api_url = api_url.trim_end_matches('/').to_string();
        }
        publish.short_name = TELEGRAPH_SHORT_NAME.clone();
        publish.pipe_title = *PIPE_TITLE;

        Self {
            bot_token: BOT_TOKEN.clone(),
            bot_api_url: BOT_API_URL.clone(),
            temp_dir: TEMP_FILES_DIR.clone(),
            upload: UploadConfig {
                imgbb_api_key: IMGBB_API_KEY.clone().map(SecretString::from),
                imgbb_url: IMGBB_UPLOAD_URL.clone(),
                envs_url: ENVS_UPLOAD_URL.clone(),
                timeout: network::upload_timeout(),
            },
            publish,
        }
    }

    /// Checks the settings the bot cannot run without.
    pub fn validate(&self) -> crate::core::error::AppResult<()> {
        if self.bot_token.trim().is_empty() {
            return Err(crate::core::error::AppError::Config(
                "BOT_TOKEN (or TELOXIDE_TOKEN) is not set".to_string(),
            ));
        }
        if self.publish.domain.trim().is_empty() {
            return Err(crate::core::error::AppError::Config("DOMAIN must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: &str) -> Config {
        Config {
            bot_token: token.to_string(),
            bot_api_url: None,
            temp_dir: "/tmp".to_string(),
            upload: UploadConfig::default(),
            publish: PublishConfig::default(),
        }
    }

    #[test]
    fn test_publish_config_derives_api_url_from_domain() {
        let config = PublishConfig::for_domain("telegra.ph");
        assert_eq!(config.domain, "telegra.ph");
        assert_eq!(config.api_url, "https://api.telegra.ph");
        assert!(!config.pipe_title);
    }

    #[test]
    fn test_upload_config_defaults() {
        let config = UploadConfig::default();
        assert!(config.imgbb_api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_validate_rejects_missing_token() {
        assert!(config_with_token("").validate().is_err());
        assert!(config_with_token("   ").validate().is_err());
        assert!(config_with_token("123:ABC").validate().is_ok());
    }
}
