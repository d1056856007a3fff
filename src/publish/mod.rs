//! Text → Telegraph page publishing
//!
//! Every call provisions a brand-new throwaway account on the document host, then creates one
//! page with it. Tokens are never cached.

pub mod nodes;
pub mod parser;
mod telegraph;

use thiserror::Error;

use crate::core::config::PublishConfig;

pub use parser::{parse_post, ParseOptions, ParsedPost};
pub use telegraph::{AccessToken, NewPage, TelegraphClient};

/// Fixed reply when the host refuses the content.
pub const CONTENT_REJECTED_MESSAGE: &str = "Unable to generate instant view link.";

#[derive(Debug, Error)]
pub enum PublishError {
    /// Content the host cannot render (disallowed markup, empty body, oversized title...)
    #[error("content rejected: {0}")]
    ContentRejected(String),

    /// Any other API-level failure, carrying the host's own error text
    #[error("{0}")]
    Host(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl PublishError {
    /// Text shown to the user. Rejections get the fixed message, everything else the raw error.
    pub fn user_message(&self) -> String {
        match self {
            PublishError::ContentRejected(_) => CONTENT_REJECTED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<nodes::NodeError> for PublishError {
    fn from(err: nodes::NodeError) -> Self {
        PublishError::ContentRejected(err.to_string())
    }
}

/// Who sent the text; used for the default title and the author fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: Option<u64>,
    pub display_name: String,
    pub username: Option<String>,
}

impl Sender {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: None,
            display_name: display_name.into(),
            username: None,
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Profile link, only when the sender has a public handle.
    pub fn author_url(&self) -> Option<String> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("https://telegram.dog/{}", u))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub title: String,
    pub html_body: String,
    pub author_name: String,
    pub author_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub url: String,
}

/// Publishes text messages as pages on a Telegraph-compatible host.
#[derive(Debug, Clone)]
pub struct PagePublisher {
    telegraph: TelegraphClient,
    config: PublishConfig,
}

impl PagePublisher {
    /// Creates a publisher with its own HTTP client bounded by `config.timeout`.
    pub fn new(config: PublishConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: PublishConfig) -> Self {
        Self {
            telegraph: TelegraphClient::new(client, &config.api_url),
            config,
        }
    }

    pub fn domain(&self) -> &str {
        &self.config.domain
    }

    /// Turns raw message HTML into a request: title directive, emoji cleanup, `<br>` conversion.
    pub fn prepare(&self, text: &str, sender: &Sender) -> PublishRequest {
        let options = ParseOptions {
            pipe_title: self.config.pipe_title,
        };
        let post = parse_post(text, options);

        PublishRequest {
            title: post.title.unwrap_or_else(|| sender.display_name.clone()),
            html_body: post.body,
            author_name: sender.display_name.clone(),
            author_url: sender.author_url(),
        }
    }

    /// Creates a fresh account, then the page.
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome, PublishError> {
        let content = nodes::html_to_nodes(&request.html_body)?;
        if content.is_empty() {
            return Err(PublishError::ContentRejected("empty content".to_string()));
        }

        log::info!(
            "📝 Publishing '{}' to {} ({} chars)",
            request.title,
            self.config.domain,
            nodes::text_len(&content)
        );

        let token = self.telegraph.create_account(&self.config.short_name).await?;
        let path = self
            .telegraph
            .create_page(
                &token,
                &NewPage {
                    title: &request.title,
                    author_name: &request.author_name,
                    author_url: request.author_url.as_deref(),
                    content: &content,
                },
            )
            .await?;

        let url = self.page_url(&path);
        log::info!("✅ Published: {}", url);
        Ok(PublishOutcome { url })
    }

    /// [`prepare`](Self::prepare) followed by [`publish`](Self::publish).
    pub async fn publish_text(&self, text: &str, sender: &Sender) -> Result<PublishOutcome, PublishError> {
        let request = self.prepare(text, sender);
        self.publish(&request).await
    }

    /// `https://<domain>/<path>`
    pub fn page_url(&self, path: &str) -> String {
        format!("https://{}/{}", self.config.domain, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn publisher(pipe_title: bool) -> PagePublisher {
        let mut config = PublishConfig::for_domain("graph.org");
        config.pipe_title = pipe_title;
        PagePublisher::new(config).unwrap()
    }

    #[test]
    fn test_prepare_defaults_title_to_sender_name() {
        let request = publisher(false).prepare("Hello\nWorld", &Sender::new("Ann"));
        assert_eq!(
            request,
            PublishRequest {
                title: "Ann".to_string(),
                html_body: "Hello<br>World".to_string(),
                author_name: "Ann".to_string(),
                author_url: None,
            }
        );
    }

    #[test]
    fn test_prepare_uses_title_directive_and_handle() {
        let sender = Sender::new("Ann").with_username("ann_dev").with_id(42);
        let request = publisher(false).prepare("Title: My Post\nHello\nWorld", &sender);
        assert_eq!(request.title, "My Post");
        assert_eq!(request.html_body, "Hello<br>World");
        assert_eq!(request.author_url.as_deref(), Some("https://telegram.dog/ann_dev"));
    }

    #[test]
    fn test_prepare_pipe_title_follows_config() {
        let sender = Sender::new("Ann");
        assert_eq!(publisher(false).prepare("Body|Head", &sender).title, "Ann");
        assert_eq!(publisher(true).prepare("Body|Head", &sender).title, "Head");
    }

    #[test]
    fn test_empty_username_has_no_author_url() {
        assert_eq!(Sender::new("Ann").with_username("").author_url(), None);
    }

    #[test]
    fn test_page_url() {
        let publisher = publisher(false);
        assert_eq!(publisher.page_url("My-Post-10-16"), "https://graph.org/My-Post-10-16");
        assert_eq!(publisher.page_url("/My-Post-10-16"), "https://graph.org/My-Post-10-16");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            PublishError::ContentRejected("CONTENT_TOO_BIG".to_string()).user_message(),
            CONTENT_REJECTED_MESSAGE
        );
        assert_eq!(
            PublishError::Host("ACCESS_TOKEN_INVALID".to_string()).user_message(),
            "ACCESS_TOKEN_INVALID"
        );
    }

    #[tokio::test]
    async fn test_disallowed_markup_rejected_before_any_request() {
        // Unroutable API URL: reaching the network would surface a Transport error instead
        let mut config = PublishConfig::for_domain("graph.org");
        config.api_url = "http://127.0.0.1:9".to_string();
        let publisher = PagePublisher::new(config).unwrap();

        let result = publisher.publish_text("<script>x</script>", &Sender::new("Ann")).await;
        assert!(matches!(result, Err(PublishError::ContentRejected(_))));
    }
}
