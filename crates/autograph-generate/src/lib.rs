pub mod engine;
mod prompt;
mod sanitize;

use std::sync::Arc;

use autograph_core::DiagramSource;

pub use engine::{Completion, GroqProvider, Provider, ProviderError};
pub use prompt::{system_prompt, user_message};
pub use sanitize::sanitize;

/// Decoding temperature for every request; flowcharts should not vary between runs.
pub const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// No credential was supplied. Raised before any provider call.
    #[error("API Key is missing")]
    InvalidRequest,
    /// The provider call failed; the message is passed through as-is.
    #[error("{0}")]
    Upstream(#[from] ProviderError),
}

/// Turns process descriptions into flowchart source using one provider and model.
#[derive(Clone)]
pub struct Generator {
    provider: Arc<dyn Provider>,
    model: String,
}

impl Generator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Groq-backed generator for `model`.
    pub fn groq(model: impl Into<String>) -> Self {
        Self::new(Arc::new(GroqProvider), model)
    }

    pub async fn generate(
        &self,
        description: &str,
        credential: &str,
    ) -> Result<DiagramSource, GenerateError> {
        if credential.is_empty() {
            return Err(GenerateError::InvalidRequest);
        }

        let system = system_prompt();
        let user = user_message(description);
        let completion = Completion {
            model: &self.model,
            system: &system,
            user: &user,
            temperature: TEMPERATURE,
        };

        tracing::debug!(model = %self.model, "sending description to provider");

        let raw = self.provider.complete(completion, credential).await?;
        tracing::trace!(raw = %raw, "raw provider output");

        let source = DiagramSource::new(sanitize(&raw));
        tracing::debug!(lines = source.as_str().lines().count(), "sanitized diagram");
        Ok(source)
    }
}
