//! Orchestrator for chat turns and the profile/recommendation operations.

use std::sync::Arc;
use std::time::Duration;

use conversation::ConversationSession;
use knowledge_core::{KnowledgeGraph, ProfileAttributes, Recommendation, UserProfile};
use llm_client::LlmClient;
use preferences::{ExtractionReport, PreferenceExtractor};
use prompt::{build_agent_messages, combine_context, ChatMessage, SHOPPING_ASSISTANT_SYSTEM_PROMPT};
use shop_core::{ConversationMessage, ShopError};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::outcome::ChatOutcome;

/// Default bound on one LLM completion.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(30);

const APOLOGY_PREFIX: &str = "I apologize, but I encountered an error: ";

/// Tunables for [`ShoppingAgent`].
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub system_prompt: String,
    pub llm_timeout: Duration,
    /// Conversation retention cap; `None` keeps the whole log.
    pub max_messages: Option<usize>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            system_prompt: SHOPPING_ASSISTANT_SYSTEM_PROMPT.to_string(),
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            max_messages: None,
        }
    }
}

fn log_messages_submitted(messages: &[ChatMessage]) {
    debug!(count = messages.len(), "Messages submitted to LLM");
    for (i, m) in messages.iter().enumerate() {
        debug!(index = i, role = ?m.role, content = %m.content, "submit_to_llm message");
    }
}

fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
    for (i, cause) in e.chain().enumerate() {
        if i == 0 {
            error!(cause = %cause, "{}", first_msg);
        } else {
            error!(cause = %cause, "Caused by");
        }
    }
}

/// One shared conversation plus handles to the LLM and the knowledge graph.
pub struct ShoppingAgent {
    llm: Arc<dyn LlmClient>,
    graph: Arc<KnowledgeGraph>,
    extractor: PreferenceExtractor,
    options: AgentOptions,
    session: Mutex<ConversationSession>,
}

impl ShoppingAgent {
    // ---------- Construction ----------

    pub fn new(
        llm: Arc<dyn LlmClient>,
        graph: Arc<KnowledgeGraph>,
        extractor: PreferenceExtractor,
        options: AgentOptions,
    ) -> Self {
        let session = ConversationSession::new().with_max_messages(options.max_messages);
        Self {
            llm,
            graph,
            extractor,
            options,
            session: Mutex::new(session),
        }
    }

    /// Default extractor and options over the given handles.
    pub fn with_defaults(llm: Arc<dyn LlmClient>, graph: Arc<KnowledgeGraph>) -> Self {
        let extractor = PreferenceExtractor::new(graph.clone());
        Self::new(llm, graph, extractor, AgentOptions::default())
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    pub fn llm_configured(&self) -> bool {
        self.llm.is_configured()
    }

    pub fn graph_connected(&self) -> bool {
        self.graph.is_connected()
    }

    // ---------- Chat ----------

    /// Runs one chat turn. Never fails: LLM errors and timeouts come back as an apology in
    /// `response` with `error` set, and only the user message stays in the log.
    #[instrument(skip(self, user_message, extra_context))]
    pub async fn process_message(
        &self,
        user_message: &str,
        user_id: &str,
        extra_context: &str,
    ) -> ChatOutcome {
        let window = {
            let mut session = self.session.lock().await;
            session.push_user(user_message);
            session.build_context()
        };

        let user_profile = self.graph.get_profile(user_id).await;
        let profile_json = user_profile
            .as_ref()
            .and_then(|p| serde_json::to_string_pretty(p).ok());
        let context = combine_context(extra_context, &window);
        let messages = build_agent_messages(
            &self.options.system_prompt,
            &context,
            profile_json.as_deref(),
            user_message,
        );
        log_messages_submitted(&messages);

        let response = match self.complete(messages).await {
            Ok(text) => text,
            Err(e) => {
                log_error_chain(&e, "Failed to get LLM response");
                let conversation_length = self.session.lock().await.len();
                return ChatOutcome {
                    response: format!("{APOLOGY_PREFIX}{e}"),
                    user_id: user_id.to_string(),
                    user_profile,
                    conversation_length,
                    timestamp: now_rfc3339(),
                    error: Some(e.to_string()),
                    extraction: ExtractionReport::default(),
                };
            }
        };

        let conversation_length = {
            let mut session = self.session.lock().await;
            session.push_assistant(response.as_str());
            session.len()
        };

        let extraction = self.extractor.extract_and_store(user_id, user_message).await;
        if !extraction.is_complete() {
            debug!(user_id, failed = extraction.failed.len(), "Some preferences were not stored");
        }

        info!(
            user_id,
            conversation_length,
            response_len = response.len(),
            "Chat turn completed"
        );
        ChatOutcome {
            response,
            user_id: user_id.to_string(),
            user_profile,
            conversation_length,
            timestamp: now_rfc3339(),
            error: None,
            extraction,
        }
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        let timeout = self.options.llm_timeout;
        match tokio::time::timeout(timeout, self.llm.get_llm_response_with_messages(messages)).await
        {
            Ok(result) => result,
            Err(_) => Err(ShopError::Timeout {
                operation: "LLM completion",
                secs: timeout.as_secs(),
            }
            .into()),
        }
    }

    // ---------- Profiles, recommendations, purchases ----------

    pub async fn create_user_profile(&self, user_id: &str, profile: &ProfileAttributes) -> bool {
        self.graph.upsert_profile(user_id, profile).await
    }

    pub async fn get_user_profile(&self, user_id: &str) -> Option<UserProfile> {
        self.graph.get_profile(user_id).await
    }

    pub async fn get_user_recommendations(&self, user_id: &str) -> Vec<Recommendation> {
        self.graph.get_recommendations(user_id).await
    }

    pub async fn record_purchase(&self, user_id: &str, product_id: &str, product_name: &str) -> bool {
        self.graph.add_purchase(user_id, product_id, product_name).await
    }

    // ---------- Conversation ----------

    pub async fn get_conversation_history(&self) -> Vec<ConversationMessage> {
        self.session.lock().await.history()
    }

    pub async fn clear_conversation_history(&self) {
        self.session.lock().await.clear();
        info!("Conversation history cleared");
    }

    /// Releases the graph handle; later graph operations fail soft.
    pub async fn shutdown(&self) {
        self.graph.close().await;
    }
}

fn now_rfc3339() -> String {
    chrono::Local::now().to_rfc3339()
}
