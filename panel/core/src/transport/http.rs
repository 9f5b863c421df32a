//! HTTP Transport
//!
//! Talks to the backend chat service:
//!
//! - `POST <endpoint>` with `{"message": "..."}`
//! - 2xx answer: `{"response": "...", "pages": [1, 2]}` (`pages` optional)
//!
//! Anything else (connection failure, non-2xx status, undecodable body)
//! becomes the fallback reply.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::traits::{ChatReply, ChatTransport};

/// Why an exchange failed (logged, never returned from `send`)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection or I/O failure
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        /// Endpoint that was attempted
        endpoint: String,
        /// The underlying error
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status
        status: reqwest::StatusCode,
        /// Response body (may be empty)
        body: String,
    },

    /// Success status but the body was not a chat response
    #[error("Failed to decode chat response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Request body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The visitor's message
    pub message: String,
}

/// Success response body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text
    pub response: String,
    /// Cited pages (missing or `null` means none)
    #[serde(default)]
    pub pages: Option<Vec<i64>>,
}

impl From<ChatResponse> for ChatReply {
    fn from(response: ChatResponse) -> Self {
        ChatReply::new(response.response, response.pages.unwrap_or_default())
    }
}

/// HTTP chat transport
#[derive(Clone)]
pub struct HttpTransport {
    /// Chat endpoint URL
    endpoint: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
        })
    }

    /// The chat endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Perform one exchange, keeping the failure reason
    pub async fn exchange(&self, message: &str) -> Result<ChatReply, TransportError> {
        let request = ChatRequest {
            message: message.to_string(),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|source| TransportError::Network {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let data: ChatResponse = response.json().await.map_err(TransportError::Decode)?;
        Ok(data.into())
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn send(&self, message: &str) -> ChatReply {
        match self.exchange(message).await {
            Ok(reply) => {
                debug!(
                    chars = reply.text.chars().count(),
                    pages = reply.cited_pages.len(),
                    "Chat reply received"
                );
                reply
            }
            Err(e) => {
                warn!(error = %e, "Chat exchange failed");
                ChatReply::fallback()
            }
        }
    }
}
