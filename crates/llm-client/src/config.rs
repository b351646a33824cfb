//! LLM configuration: trait and env-based implementation.

use std::env;

/// Default Groq OpenAI-compatible endpoint.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model served through Groq.
pub const DEFAULT_GROQ_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn max_tokens(&self) -> u32;
    fn use_streaming(&self) -> bool;
    fn system_prompt(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    /// Empty when `GROQ_API_KEY` is unset; the client then reports itself unconfigured.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub use_streaming: bool,
    pub system_prompt: Option<String>,
}

impl Default for EnvLlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            use_streaming: false,
            system_prompt: None,
        }
    }
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn temperature(&self) -> f32 {
        self.temperature
    }
    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
    fn use_streaming(&self) -> bool {
        self.use_streaming
    }
    fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl EnvLlmConfig {
    /// Load from environment variables. Never fails: a missing key only leaves the client unconfigured,
    /// unparsable numbers fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = env::var("GROQ_API_KEY").unwrap_or_default().trim().to_string();
        let base_url = env::var("GROQ_BASE_URL").unwrap_or(defaults.base_url);
        let model = env::var("GROQ_MODEL").unwrap_or(defaults.model);
        let temperature = parse_env("LLM_TEMPERATURE").unwrap_or(defaults.temperature);
        let max_tokens = parse_env("LLM_MAX_TOKENS").unwrap_or(defaults.max_tokens);
        let use_streaming = parse_env("LLM_USE_STREAMING").unwrap_or(defaults.use_streaming);
        let system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Self {
            api_key,
            base_url,
            model,
            temperature,
            max_tokens,
            use_streaming,
            system_prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: &[&str] = &[
        "GROQ_API_KEY",
        "GROQ_BASE_URL",
        "GROQ_MODEL",
        "LLM_TEMPERATURE",
        "LLM_MAX_TOKENS",
        "LLM_USE_STREAMING",
        "LLM_SYSTEM_PROMPT",
    ];

    fn clear_env() {
        for k in KEYS {
            env::remove_var(k);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = EnvLlmConfig::from_env();
        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, DEFAULT_GROQ_BASE_URL);
        assert_eq!(config.model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 1000);
        assert!(!config.use_streaming);
        assert!(config.system_prompt.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env();
        env::set_var("GROQ_API_KEY", "gsk_test");
        env::set_var("GROQ_MODEL", "llama-3.1-8b-instant");
        env::set_var("LLM_TEMPERATURE", "0.2");
        env::set_var("LLM_MAX_TOKENS", "512");
        env::set_var("LLM_USE_STREAMING", "true");
        env::set_var("LLM_SYSTEM_PROMPT", "Be brief.");

        let config = EnvLlmConfig::from_env();
        assert_eq!(config.api_key(), "gsk_test");
        assert_eq!(config.model(), "llama-3.1-8b-instant");
        assert_eq!(config.temperature(), 0.2);
        assert_eq!(config.max_tokens(), 512);
        assert!(config.use_streaming());
        assert_eq!(config.system_prompt(), Some("Be brief."));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_bad_numbers_fall_back() {
        clear_env();
        env::set_var("LLM_MAX_TOKENS", "lots");
        env::set_var("LLM_SYSTEM_PROMPT", "   ");
        let config = EnvLlmConfig::from_env();
        assert_eq!(config.max_tokens, 1000);
        assert!(config.system_prompt.is_none());
        clear_env();
    }
}
