pub mod controller;
pub mod render;
pub mod repl;
pub mod transcript;

use crate::models::chat::{ ChatRequest, ChatResponse };
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use thiserror::Error;
use url::Url;

/// Any failure of a relay call. The controller turns all of them into the
/// same fallback reply; the detail is only logged.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay responded with status {0}")]
    Status(u16),

    #[error("could not read relay reply: {0}")]
    Decode(String),
}

#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, SubmissionError>;
}

#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    http: HttpClient,
    relay_url: Url,
}

impl HttpRelayClient {
    pub fn new(relay_url: Url) -> Self {
        Self {
            http: HttpClient::new(),
            relay_url,
        }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, SubmissionError> {
        let resp = self.http.post(self.relay_url.clone()).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SubmissionError::Status(status.as_u16()));
        }

        resp.json::<ChatResponse>().await.map_err(|e| SubmissionError::Decode(e.to_string()))
    }
}
