//! envs.sh client: anonymous upload, the response body is the bare URL

use reqwest::multipart::{Form, Part};

use super::{ImageProvider, ProviderError, UploadOutcome};

/// Fallback image host. No credential.
#[derive(Debug, Clone)]
pub struct EnvsHost {
    endpoint: String,
}

impl EnvsHost {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }

    pub(super) async fn upload(
        &self,
        client: &reqwest::Client,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, ProviderError> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        let response = client.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("envs.sh returned status {}", status);
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        let url = body.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ProviderError::Malformed(format!("expected a URL, got {:?}", truncate(url, 80))));
        }

        Ok(UploadOutcome {
            provider: ImageProvider::Fallback,
            url: url.to_string(),
            delete_url: None,
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
