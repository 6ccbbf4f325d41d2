//! Outbound half of the relay: one inbound chat call becomes exactly one
//! call to the inference backend, with no retries.

use crate::models::chat::ChatRequest;
use log::{ error, info };
use reqwest::Client as HttpClient;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Ways a forwarded call can fail. Every variant reaches the browser as the
/// same generic 500; the detail only goes to the operator log.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("backend responded with status {status}")]
    BackendHttp {
        status: u16,
        body: String,
    },

    #[error("no response received from backend: {0}")]
    BackendUnreachable(#[source] reqwest::Error),

    #[error("failed to set up backend request: {0}")]
    LocalRequest(String),

    #[error("backend replied with a body that is not JSON: {0}")]
    MalformedBackendBody(#[source] reqwest::Error),
}

impl RelayError {
    fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() {
            RelayError::LocalRequest(err.to_string())
        } else {
            RelayError::BackendUnreachable(err)
        }
    }

    /// Writes the operator-facing diagnostics for this failure.
    pub fn log(&self, backend_url: &Url) {
        error!("--- FAILED TO PROXY REQUEST TO {} ---", backend_url);
        match self {
            RelayError::BackendHttp { status, body } => {
                error!("Backend responded with an error status.");
                error!("Status: {}", status);
                error!("Data: {}", body);
            }
            RelayError::BackendUnreachable(e) => {
                error!("No response was received from the backend.");
                error!("Check that the backend address is right and the service is reachable.");
                error!("Cause: {}", e);
            }
            RelayError::LocalRequest(msg) => {
                error!("An error occurred while setting up the request: {}", msg);
            }
            RelayError::MalformedBackendBody(e) => {
                error!("Backend responded with a body that could not be parsed as JSON: {}", e);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: HttpClient,
    chat_url: Url,
}

impl BackendClient {
    pub fn new(chat_url: Url) -> Self {
        Self {
            http: HttpClient::new(),
            chat_url,
        }
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    /// Forwards `request` as-is and returns the backend's JSON body untouched.
    pub async fn forward(&self, request: &ChatRequest) -> Result<Value, RelayError> {
        info!("Forwarding request to backend at: {}", self.chat_url);

        let resp = self.http
            .post(self.chat_url.clone())
            .json(request)
            .send().await
            .map_err(RelayError::from_send)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::BackendHttp { status: status.as_u16(), body });
        }

        let data = resp.json::<Value>().await.map_err(RelayError::MalformedBackendBody)?;
        info!("Successfully received response from backend.");
        Ok(data)
    }
}
