use thiserror::Error;

/// Centralized error types for the application
///
/// Errors from the bot wiring and the CLI are converted to this enum for consistent handling.
/// The upload and publish cores keep their own narrower error types and convert into this one
/// only at the edges.
///
/// # Example
///
/// ```no_run
/// use telegraph_uploader::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Telegram file download errors
    #[error("Telegram download error: {0}")]
    TelegramDownload(#[from] teloxide::DownloadError),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Upload core errors
    #[error(transparent)]
    Upload(#[from] crate::upload::UploadError),

    /// Publish core errors
    #[error(transparent)]
    Publish(#[from] crate::publish::PublishError),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config("BOT_TOKEN is not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: BOT_TOKEN is not set");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_upload_error_is_transparent() {
        let upload = crate::upload::UploadError::FileAccess {
            path: "/tmp/missing.jpg".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let expected = upload.to_string();
        let err: AppError = upload.into();
        assert!(matches!(err, AppError::Upload(_)));
        assert_eq!(err.to_string(), expected);
    }
}
