//! Minimal Telegraph API client (`createAccount`, `createPage`)
//!
//! Works against any Telegraph-compatible host, e.g. `https://api.telegra.ph` or
//! `https://api.graph.org`. The host answers HTTP 200 with `{"ok": false, "error": "..."}`
//! for API-level failures.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::nodes::Node;
use super::PublishError;

/// Host error code prefixes that mean "the page content itself was refused".
const CONTENT_ERROR_PREFIXES: &[&str] = &["CONTENT_", "TITLE_", "AUTHOR_", "PAGE_"];

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct AccountResult {
    access_token: String,
}

#[derive(Deserialize)]
struct PageResult {
    path: String,
}

/// Single-use account credential returned by `createAccount`.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(SecretString::from(token))
    }

    fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Page fields sent to `createPage`.
#[derive(Debug)]
pub struct NewPage<'a> {
    pub title: &'a str,
    pub author_name: &'a str,
    pub author_url: Option<&'a str>,
    pub content: &'a [Node],
}

#[derive(Debug, Clone)]
pub struct TelegraphClient {
    client: reqwest::Client,
    api_url: String,
}

impl TelegraphClient {
    pub fn new(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a fresh account and returns its access token.
    pub async fn create_account(&self, short_name: &str) -> Result<AccessToken, PublishError> {
        let account: AccountResult = self.call("createAccount", &[("short_name", short_name.to_string())]).await?;
        Ok(AccessToken::new(account.access_token))
    }

    /// Creates a page and returns its path (e.g. `My-Post-10-16`).
    pub async fn create_page(&self, token: &AccessToken, page: &NewPage<'_>) -> Result<String, PublishError> {
        let content = serde_json::to_string(page.content).map_err(|e| PublishError::Host(e.to_string()))?;

        let mut params = vec![
            ("access_token", token.expose().to_string()),
            ("title", page.title.to_string()),
            ("author_name", page.author_name.to_string()),
            ("content", content),
            ("return_content", "false".to_string()),
        ];
        if let Some(url) = page.author_url {
            params.push(("author_url", url.to_string()));
        }

        let result: PageResult = self.call("createPage", &params).await?;
        Ok(result.path)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T, PublishError> {
        let url = format!("{}/{}", self.api_url, method);
        let response = self.client.post(&url).form(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("Telegraph {} returned status {}", method, status);
            return Err(PublishError::Host(format!("{} failed with HTTP status {}", method, status)));
        }

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| PublishError::Host(format!("{}: unexpected response: {}", method, e)))?;

        if !body.ok {
            let code = body.error.unwrap_or_else(|| "UNKNOWN_ERROR".to_string());
            return Err(classify_api_error(code));
        }

        body.result
            .ok_or_else(|| PublishError::Host(format!("{}: response has no result", method)))
    }
}

fn classify_api_error(code: String) -> PublishError {
    if CONTENT_ERROR_PREFIXES.iter().any(|prefix| code.starts_with(prefix)) {
        PublishError::ContentRejected(code)
    } else {
        PublishError::Host(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_content_errors() {
        for code in ["CONTENT_TOO_BIG", "CONTENT_TEXT_REQUIRED", "TITLE_TOO_LONG", "PAGE_SAVE_FAILED"] {
            assert!(
                matches!(classify_api_error(code.to_string()), PublishError::ContentRejected(_)),
                "{}",
                code
            );
        }
    }

    #[test]
    fn test_classify_other_errors() {
        match classify_api_error("ACCESS_TOKEN_INVALID".to_string()) {
            PublishError::Host(text) => assert_eq!(text, "ACCESS_TOKEN_INVALID"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            classify_api_error("FLOOD_WAIT_5".to_string()),
            PublishError::Host(_)
        ));
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret".to_string());
        assert!(!format!("{:?}", token).contains("super-secret"));
        assert_eq!(token.expose(), "super-secret");
    }
}
