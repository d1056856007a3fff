//! Image upload with strict primary → fallback ordering
//!
//! The primary host (ImgBB) is only tried when an API key is configured. Any failure there is
//! logged and the fallback host (envs.sh) is tried next. When both fail the dispatcher returns
//! `Ok(None)`: callers show a "try again" message instead of an error.

mod envs;
mod imgbb;

use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

use crate::core::config::UploadConfig;

pub use envs::EnvsHost;
pub use imgbb::ImgbbHost;

/// Which host actually served an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProvider {
    Primary,
    Fallback,
}

impl ImageProvider {
    /// Human-readable host name for replies and logs.
    pub fn host_name(self) -> &'static str {
        match self {
            ImageProvider::Primary => "ImgBB",
            ImageProvider::Fallback => "envs.sh",
        }
    }
}

/// Normalized result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub provider: ImageProvider,
    pub url: String,
    /// Only set when the serving host exposes a deletion link.
    pub delete_url: Option<String>,
}

/// A local file ready to be uploaded.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    path: PathBuf,
    size: u64,
}

impl UploadRequest {
    /// Checks that `path` is an existing regular file and records its size.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref().to_path_buf();
        let metadata = fs_err::tokio::metadata(&path)
            .await
            .map_err(|source| UploadError::FileAccess { path: path.clone(), source })?;

        if !metadata.is_file() {
            return Err(UploadError::FileAccess {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        Ok(Self {
            path,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// File name sent in the multipart body.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "photo.jpg".to_string())
    }

    async fn read(&self) -> Result<Vec<u8>, UploadError> {
        fs_err::tokio::read(&self.path)
            .await
            .map_err(|source| UploadError::FileAccess {
                path: self.path.clone(),
                source,
            })
    }
}

/// The only error the dispatcher surfaces. Provider failures are not errors.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Cannot read file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single provider attempt failed. Logged, never returned to callers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("host returned status {0}")]
    Status(StatusCode),

    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Transport(e) if e.is_timeout())
    }
}

/// Uploads files to the configured image hosts.
///
/// Holds no per-request state; one instance is shared by all handlers.
#[derive(Debug, Clone)]
pub struct UploadDispatcher {
    client: reqwest::Client,
    primary: Option<ImgbbHost>,
    fallback: EnvsHost,
}

impl UploadDispatcher {
    /// Creates a dispatcher with its own HTTP client bounded by `config.timeout`.
    pub fn new(config: &UploadConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a dispatcher on top of an existing client.
    pub fn with_client(client: reqwest::Client, config: &UploadConfig) -> Self {
        let primary = config
            .imgbb_api_key
            .clone()
            .map(|key| ImgbbHost::new(config.imgbb_url.clone(), key));

        Self {
            client,
            primary,
            fallback: EnvsHost::new(config.envs_url.clone()),
        }
    }

    /// Whether the primary host will be attempted.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Uploads the file at `path`.
    ///
    /// # Returns
    /// * `Ok(Some(outcome))` - One of the hosts accepted the file
    /// * `Ok(None)` - Every host failed
    /// * `Err(UploadError::FileAccess)` - The file is missing or unreadable
    pub async fn upload(&self, path: impl AsRef<Path>) -> Result<Option<UploadOutcome>, UploadError> {
        let request = UploadRequest::open(path).await?;
        self.dispatch(&request).await
    }

    /// Same as [`upload`](Self::upload) for an already opened request.
    pub async fn dispatch(&self, request: &UploadRequest) -> Result<Option<UploadOutcome>, UploadError> {
        let bytes = request.read().await?;
        let file_name = request.file_name();

        log::info!(
            "📤 Uploading {} ({} bytes), primary host {}",
            request.path().display(),
            request.size(),
            if self.primary.is_some() { "enabled" } else { "disabled" }
        );

        if let Some(ref primary) = self.primary {
            match primary.upload(&self.client, &file_name, bytes.clone()).await {
                Ok(outcome) => {
                    log::info!("✅ Uploaded to {}: {}", outcome.provider.host_name(), outcome.url);
                    return Ok(Some(outcome));
                }
                Err(e) if e.is_timeout() => {
                    log::warn!("⚠️ ImgBB upload timed out, falling back to envs.sh");
                }
                Err(e) => {
                    log::warn!("⚠️ ImgBB upload failed ({}), falling back to envs.sh", e);
                }
            }
        }

        match self.fallback.upload(&self.client, &file_name, bytes).await {
            Ok(outcome) => {
                log::info!("✅ Uploaded to {}: {}", outcome.provider.host_name(), outcome.url);
                Ok(Some(outcome))
            }
            Err(e) => {
                log::error!("❌ envs.sh upload failed ({}), no host left to try", e);
                Ok(None)
            }
        }
    }
}
