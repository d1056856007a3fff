//! ImgBB client (https://api.imgbb.com/)

use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{ImageProvider, ProviderError, UploadOutcome};

#[derive(Deserialize)]
struct ImgbbResponse {
    data: Option<ImgbbData>,
}

#[derive(Deserialize)]
struct ImgbbData {
    url: String,
    delete_url: Option<String>,
}

/// Primary image host. Requires an API key passed as the `key` query parameter.
#[derive(Debug, Clone)]
pub struct ImgbbHost {
    endpoint: String,
    api_key: SecretString,
}

impl ImgbbHost {
    pub fn new(endpoint: String, api_key: SecretString) -> Self {
        Self { endpoint, api_key }
    }

    pub(super) async fn upload(
        &self,
        client: &reqwest::Client,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, ProviderError> {
        let form = Form::new().part("image", Part::bytes(bytes).file_name(file_name.to_string()));

        let response = client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose_secret())])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("ImgBB returned status {}", status);
            return Err(ProviderError::Status(status));
        }

        let body: ImgbbResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let data = body
            .data
            .ok_or_else(|| ProviderError::Malformed("missing `data` object".to_string()))?;

        Ok(UploadOutcome {
            provider: ImageProvider::Primary,
            url: data.url,
            delete_url: data.delete_url.filter(|u| !u.is_empty()),
        })
    }
}
