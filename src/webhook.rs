//! Outbound client for the workflow webhooks (scraping and chatbot).

use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("webhook url is not configured")]
    NotConfigured,
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("webhook failed with status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("invalid webhook response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
}

impl WebhookClient {
    pub fn new(timeout: Duration) -> Result<Self, WebhookError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("restaurant-registry/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WebhookError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// POST `body` as JSON to `url` and decode the JSON reply.
    ///
    /// Any non-2xx status is an error carrying the upstream body text.
    pub async fn post_json<B, R>(&self, url: Option<&str>, body: &B) -> Result<R, WebhookError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = url.ok_or(WebhookError::NotConfigured)?;
        tracing::debug!(%url, "calling webhook");

        let res = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = res.status();
        tracing::debug!(status = %status, "webhook responded");

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(WebhookError::Http {
                status: status.as_u16(),
                body,
            });
        }

        res.json::<R>()
            .await
            .map_err(|e| WebhookError::Decode(e.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> WebhookError {
    if err.is_timeout() {
        WebhookError::Timeout
    } else {
        WebhookError::Transport(err.to_string())
    }
}
