//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for chat completion (single response and streamed).
//! Any OpenAI-compatible endpoint works through [`OpenAIClient::with_base_url`]; the service
//! points it at Groq. Provides token masking for safe logging.

use async_openai::{types::CreateChatCompletionRequestArgs, Client};
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 1.0,
        }
    }
}

/// A chunk of streamed completion content and whether the stream is finished.
pub struct StreamChunk {
    /// Text received since the last callback.
    pub content: String,
    /// True if this is the final chunk for the response.
    pub done: bool,
}

/// Chat client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    /// Only used for masked logging.
    api_key_for_logging: String,
    options: CompletionOptions,
}

impl OpenAIClient {
    /// Builds a client with a custom base URL (Groq, proxies, mock servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self::from_config(config, api_key)
    }

    fn from_config(config: async_openai::config::OpenAIConfig, api_key: String) -> Self {
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
            options: CompletionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> CompletionOptions {
        self.options
    }

    #[allow(deprecated)]
    fn build_request(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<async_openai::types::CreateChatCompletionRequest> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(self.options.temperature)
            .top_p(self.options.top_p)
            .max_tokens(self.options.max_tokens)
            .build()?;
        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat completion request JSON");
        }
        Ok(request)
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// Errors on transport/API failure or when the response has no choices.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "chat_completion request"
        );

        let request = self.build_request(model, messages)?;
        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("Completion response contained no choices"),
        }
    }

    /// Streams a chat completion, invoking `callback` about once per second and on finish.
    /// Returns the full concatenated text. Stream errors are propagated.
    pub async fn chat_completion_stream<F, Fut>(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        mut callback: F,
    ) -> anyhow::Result<String>
    where
        F: FnMut(StreamChunk) -> Fut,
        Fut: std::future::Future<Output = anyhow::Result<()>>,
    {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "chat_completion_stream request"
        );

        let request = self.build_request(model, messages)?;
        let mut stream = self.client.chat().create_stream(request).await?;

        let mut full_response = String::new();
        let mut pending = String::new();
        let mut last_flush = Instant::now();

        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| anyhow::anyhow!("Stream error: {}", e))?;
            let Some(choice) = chunk.choices.first() else {
                continue;
            };
            if let Some(content) = &choice.delta.content {
                pending.push_str(content);
                full_response.push_str(content);
            }
            let finished = choice.finish_reason.is_some();
            if (finished || last_flush.elapsed() >= Duration::from_secs(1)) && !pending.is_empty()
            {
                callback(StreamChunk {
                    content: std::mem::take(&mut pending),
                    done: finished,
                })
                .await?;
                last_flush = Instant::now();
            }
        }

        if !pending.is_empty() {
            callback(StreamChunk {
                content: pending,
                done: true,
            })
            .await?;
        }

        Ok(full_response)
    }
}
