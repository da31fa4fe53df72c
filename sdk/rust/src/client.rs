use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize)]
struct ProcessRequest<'a> {
    data: &'a str,
}

/// Envelope returned by `POST /api/process` for both success and failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub message: String,
    pub data: String,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status and an envelope.
    #[error("service returned {status}: {}", .envelope.message)]
    Rejected {
        status: StatusCode,
        envelope: ProcessResponse,
    },

    /// The service answered with a status and a body that is not an envelope.
    #[error("unexpected response {status}: {body}")]
    Unexpected { status: StatusCode, body: String },
}

pub struct ProcessorClient {
    client: Client,
    base_url: String,
}

impl ProcessorClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit text for processing.
    pub async fn process(&self, data: &str) -> Result<ProcessResponse, ClientError> {
        let resp = self
            .client
            .post(format!("{}/api/process", self.base_url))
            .json(&ProcessRequest { data })
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        match serde_json::from_str::<ProcessResponse>(&text) {
            Ok(envelope) if status.is_success() => Ok(envelope),
            Ok(envelope) => Err(ClientError::Rejected { status, envelope }),
            Err(_) => Err(ClientError::Unexpected { status, body: text }),
        }
    }

    /// Returns the health message when the service is up.
    pub async fn health(&self) -> Result<String, ClientError> {
        let resp = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ClientError::Unexpected { status, body })
        }
    }
}
