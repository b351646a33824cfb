//! [`LlmClient`] backed by openai-client; works with any OpenAI-compatible endpoint (Groq by default).

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{CompletionOptions, StreamChunk};
use prompt::ChatMessage;
use tracing::{debug, instrument};

use super::config::{LlmConfig, DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL};
use super::{chat_message_to_openai, LlmClient};

/// OpenAI-compatible [`LlmClient`]. Messages are forwarded unchanged; the caller owns the system prompt.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    use_streaming: bool,
    configured: bool,
}

impl OpenAILlmClient {
    /// Client for the default Groq endpoint and model.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_GROQ_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let configured = !api_key.trim().is_empty();
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_GROQ_MODEL.to_string(),
            use_streaming: false,
            configured,
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_options(CompletionOptions {
                temperature: config.temperature(),
                max_tokens: config.max_tokens(),
                ..CompletionOptions::default()
            })
            .with_streaming(config.use_streaming())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.client = self.client.with_options(options);
        self
    }

    /// When set, the reply is streamed and collected instead of requested in one piece.
    pub fn with_streaming(mut self, use_streaming: bool) -> Self {
        self.use_streaming = use_streaming;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        if !self.configured {
            anyhow::bail!("GROQ_API_KEY not configured");
        }
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;

        if self.use_streaming {
            self.client
                .chat_completion_stream(&self.model, openai_messages, |chunk: StreamChunk| {
                    debug!(len = chunk.content.len(), done = chunk.done, "stream chunk");
                    async { Ok::<(), anyhow::Error>(()) }
                })
                .await
        } else {
            self.client
                .chat_completion(&self.model, openai_messages)
                .await
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_unconfigured() {
        assert!(!OpenAILlmClient::new(String::new()).is_configured());
        assert!(!OpenAILlmClient::new("  ".to_string()).is_configured());
        assert!(OpenAILlmClient::new("gsk_x".to_string()).is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_client_errors_without_request() {
        let client = OpenAILlmClient::new(String::new());
        let err = client
            .get_llm_response_with_messages(vec![ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_default_model() {
        assert_eq!(OpenAILlmClient::new("k".into()).model(), DEFAULT_GROQ_MODEL);
    }
}
