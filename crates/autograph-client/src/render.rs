use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;

use autograph_core::DiagramSource;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("syntax error in diagram source")]
    Syntax,
    #[error("renderer unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub svg: String,
}

#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    async fn render(&self, source: &DiagramSource, height: u32) -> Result<Rendered, RenderError>;
}

/// Renders through a mermaid.ink compatible endpoint: `GET <base>/svg/<base64url>`.
/// Any 4xx answer means the source did not parse.
#[derive(Debug, Clone)]
pub struct MermaidInkRenderer {
    http: reqwest::Client,
    base_url: String,
}

impl MermaidInkRenderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, source: &DiagramSource, height: u32) -> String {
        format!(
            "{}/svg/{}?height={height}",
            self.base_url,
            URL_SAFE.encode(source.as_str())
        )
    }
}

#[async_trait]
impl DiagramRenderer for MermaidInkRenderer {
    async fn render(&self, source: &DiagramSource, height: u32) -> Result<Rendered, RenderError> {
        if source.as_str().trim().is_empty() {
            return Err(RenderError::Syntax);
        }

        let response = self
            .http
            .get(self.url_for(source, height))
            .send()
            .await
            .map_err(|e| RenderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            tracing::debug!(%status, "renderer rejected source");
            return Err(RenderError::Syntax);
        }
        if !status.is_success() {
            return Err(RenderError::Unavailable(format!("status {status}")));
        }

        let svg = response
            .text()
            .await
            .map_err(|e| RenderError::Unavailable(e.to_string()))?;
        Ok(Rendered { svg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_base64url_source_and_height() {
        let renderer = MermaidInkRenderer::new("https://mermaid.ink/");
        let url = renderer.url_for(&DiagramSource::from("graph TD\nA-->B"), 400);
        let encoded = URL_SAFE.encode("graph TD\nA-->B");
        assert_eq!(url, format!("https://mermaid.ink/svg/{encoded}?height=400"));
    }

    #[tokio::test]
    async fn blank_source_is_syntax_error_without_request() {
        // Nothing listens on the discard port; a request would surface as Unavailable.
        let renderer = MermaidInkRenderer::new("http://127.0.0.1:9");
        let err = renderer.render(&DiagramSource::from("  \n"), 400).await.unwrap_err();
        assert_eq!(err, RenderError::Syntax);
    }
}
