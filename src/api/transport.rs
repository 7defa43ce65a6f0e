//! The HTTP layer underneath the API client.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::api::ApiError;

/// Sends one form-encoded POST to the spreadsheet service and returns the raw
/// reply body.
///
/// Implementations must fail with [ApiError::Connection] when the server
/// cannot be reached and with [ApiError::Status] when it answers with a
/// non-success status. Everything else about the body is left to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `params` as `application/x-www-form-urlencoded`, in order.
    async fn post_form(&self, params: &[(&str, String)]) -> Result<String, ApiError>;
}

/// A [Transport] that talks to the real service with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport that posts to `url`.
    ///
    /// Redirects are followed, which the spreadsheet macro service relies on.
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_owned(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, params: &[(&str, String)]) -> Result<String, ApiError> {
        let body = serde_urlencoded::to_string(params)
            .map_err(|error| ApiError::Encoding(error.to_string()))?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|error| {
                tracing::error!("Request to {} failed: {error}", self.url);
                ApiError::Connection(error.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        response.text().await.map_err(|error| {
            tracing::error!("Could not read the response body from {}: {error}", self.url);
            ApiError::Connection(error.to_string())
        })
    }
}
