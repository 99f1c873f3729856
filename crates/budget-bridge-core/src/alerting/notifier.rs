//! Webhook delivery for budget alerts

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};
use url::Url;

use crate::error::{Error, Result};
use crate::models::SlackPayload;

/// Delivers a rendered alert somewhere.
///
/// Implementations make at most one delivery attempt per call.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `payload` to `webhook_url`, returning the raw response body
    async fn deliver(&self, webhook_url: &str, payload: &SlackPayload) -> Result<String>;
}

/// Posts alerts to an incoming-webhook endpoint
#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    client: Client,
    require_https: bool,
}

impl WebhookDispatcher {
    /// Create a dispatcher that only talks HTTPS and never follows redirects
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .https_only(true)
            .build()?;

        Ok(Self {
            client,
            require_https: true,
        })
    }

    /// Create a dispatcher on top of an existing client.
    ///
    /// The client's own scheme and redirect settings apply unchanged.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            require_https: false,
        }
    }
}

#[async_trait]
impl Notifier for WebhookDispatcher {
    async fn deliver(&self, webhook_url: &str, payload: &SlackPayload) -> Result<String> {
        let url = Url::parse(webhook_url).map_err(|e| {
            error!(error = %e, "Webhook URL is malformed");
            Error::InvalidUrl(e.to_string())
        })?;

        if self.require_https && url.scheme() != "https" {
            error!(scheme = url.scheme(), "Webhook URL is not HTTPS");
            return Err(Error::InvalidUrl(format!(
                "webhook URL must use https, got {}",
                url.scheme()
            )));
        }

        let body = serde_json::to_vec(payload)?;

        debug!(host = url.host_str().unwrap_or_default(), "Posting budget alert");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Webhook request failed");
                Error::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(status = status.as_u16(), error = %e, "Failed to read webhook response");
            Error::Transport(e)
        })?;

        if status != StatusCode::OK {
            error!(status = status.as_u16(), body = %body, "Webhook rejected budget alert");
            return Err(Error::delivery(status.as_u16(), body));
        }

        info!("Budget alert delivered");
        Ok(body)
    }
}
