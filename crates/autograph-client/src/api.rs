use async_trait::async_trait;

use autograph_core::{DiagramSource, ErrorDetail, GenerationRequest, GenerationResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service could not be reached at all.
    #[error("Connection Error: {0}")]
    Transport(String),
    /// The service answered with a non-200 status.
    #[error("Backend Error ({status}): {detail}")]
    Backend { status: u16, detail: String },
    /// The service answered 200 with a body we could not read.
    #[error("Backend Error: unreadable response: {0}")]
    Decode(String),
}

/// Anything that can turn a request into diagram source. One call, no retries.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<DiagramSource, ClientError>;
}

/// HTTP client for `POST <base_url>/generate`.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GenerationBackend for ServiceClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<DiagramSource, ClientError> {
        let url = format!("{}/generate", self.base_url);
        tracing::debug!(%url, "posting generation request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Backend {
                status: status.as_u16(),
                detail: detail_of(&body),
            });
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(body.mermaid_code)
    }
}

/// The `detail` field of an error body, or the raw body if it is not one.
fn detail_of(body: &str) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| body.to_string())
}
