use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

/// One chat round trip: fixed system text, a single user turn, a decoding temperature.
#[derive(Debug, Clone, Copy)]
pub struct Completion<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Provider messages are shown to the user as they are.
    #[error("{0}")]
    Build(String),
    #[error("{0}")]
    Chat(String),
    #[error("LLM returned empty text")]
    EmptyText,
    #[error("LLM returned no text")]
    NoText,
}

/// A hosted text-generation model. Implementations make exactly one outbound call per
/// `complete` and never retry.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(
        &self,
        completion: Completion<'_>,
        credential: &str,
    ) -> Result<String, ProviderError>;
}

/// Groq chat completions through the `llm` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroqProvider;

#[async_trait]
impl Provider for GroqProvider {
    async fn complete(
        &self,
        completion: Completion<'_>,
        credential: &str,
    ) -> Result<String, ProviderError> {
        let llm = LLMBuilder::new()
            .backend(LLMBackend::Groq)
            .model(completion.model)
            .system(completion.system)
            .temperature(completion.temperature)
            .api_key(credential)
            .build()
            .map_err(|e| ProviderError::Build(e.to_string()))?;

        let messages = vec![ChatMessage::user().content(completion.user).build()];

        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| ProviderError::Chat(e.to_string()))?;

        non_empty(response.text())
    }
}

fn non_empty(text: Option<String>) -> Result<String, ProviderError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(ProviderError::EmptyText),
        None => Err(ProviderError::NoText),
    }
}
