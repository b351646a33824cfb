//! Component factory: builds the graph, LLM client, search proxy and agent from config.

use std::sync::Arc;

use agent::{AgentOptions, ShoppingAgent};
use knowledge_core::{GraphStore, KnowledgeGraph};
use knowledge_inmemory::InMemoryGraphStore;
use knowledge_neo4j::Neo4jGraphStore;
use llm_client::{LlmClient, LlmConfig, OpenAILlmClient};
use openai_client::mask_token;
use preferences::PreferenceExtractor;
use serp_client::SerpApiService;
use tracing::{error, info, instrument, warn};

use crate::config::{AppConfig, GraphBackend, GraphConfig};
use crate::routes::AppState;

/// Connects the configured graph backend. A Neo4j connection failure (or timeout) is logged
/// and yields a disconnected graph; the service keeps running.
#[instrument(skip(config), fields(backend = ?config.backend))]
pub async fn connect_graph(config: &GraphConfig) -> KnowledgeGraph {
    let store: Option<Arc<dyn GraphStore>> = match config.backend {
        GraphBackend::Memory => {
            info!("Using in-memory graph store");
            Some(Arc::new(InMemoryGraphStore::new()))
        }
        GraphBackend::Neo4j => {
            let connect = Neo4jGraphStore::connect(&config.uri, &config.user, &config.password);
            match tokio::time::timeout(config.timeout(), connect).await {
                Ok(Ok(store)) => Some(Arc::new(store)),
                Ok(Err(e)) => {
                    error!(uri = %config.uri, error = %e, "Failed to connect to Neo4j");
                    None
                }
                Err(_) => {
                    error!(uri = %config.uri, timeout_secs = config.timeout_secs, "Neo4j connection timed out");
                    None
                }
            }
        }
    };
    let graph = match store {
        Some(store) => KnowledgeGraph::connected(store),
        None => {
            warn!("Knowledge graph unavailable, profile and preference features are disabled");
            KnowledgeGraph::disconnected()
        }
    };
    graph.with_timeout(config.timeout())
}

/// OpenAI-compatible client for the configured Groq endpoint.
pub fn build_llm_client(config: &dyn LlmConfig) -> Arc<dyn LlmClient> {
    if config.api_key().is_empty() {
        warn!("GROQ_API_KEY not set, chat requests will return an error");
    } else {
        info!(
            api_key = %mask_token(config.api_key()),
            base_url = %config.base_url(),
            model = %config.model(),
            "LLM client configured"
        );
    }
    Arc::new(OpenAILlmClient::from_config(config))
}

/// Agent over the given handles. `LLM_SYSTEM_PROMPT` replaces the built-in instruction.
pub fn build_agent(
    config: &AppConfig,
    llm: Arc<dyn LlmClient>,
    graph: Arc<KnowledgeGraph>,
) -> ShoppingAgent {
    let defaults = AgentOptions::default();
    let options = AgentOptions {
        system_prompt: config
            .llm
            .system_prompt
            .clone()
            .unwrap_or(defaults.system_prompt),
        llm_timeout: config.llm_timeout(),
        max_messages: config.conversation_max_messages,
    };
    let extractor = PreferenceExtractor::new(graph.clone());
    ShoppingAgent::new(llm, graph, extractor, options)
}

/// Builds every component from config.
#[instrument(skip(config))]
pub async fn build_components(config: &AppConfig) -> AppState {
    let graph = Arc::new(connect_graph(&config.graph).await);
    let llm = build_llm_client(&config.llm);
    let agent = Arc::new(build_agent(config, llm, graph));
    let search = Arc::new(SerpApiService::new(config.serp_api_key.clone()));
    info!(
        llm_configured = agent.llm_configured(),
        graph_connected = agent.graph_connected(),
        search_configured = search.is_configured(),
        "Components initialized"
    );
    AppState { agent, search }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.graph.backend = GraphBackend::Memory;
        config.graph.timeout_secs = 2;
        config.llm_timeout_secs = 7;
        config.conversation_max_messages = Some(20);
        config
    }

    #[tokio::test]
    async fn test_memory_backend_connects() {
        let config = memory_config();

        let graph = connect_graph(&config.graph).await;

        assert!(graph.is_connected());
        assert_eq!(graph.timeout(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_components_without_keys() {
        let config = memory_config();

        let state = build_components(&config).await;

        assert!(!state.agent.llm_configured());
        assert!(state.agent.graph_connected());
        assert!(!state.search.is_configured());
        assert_eq!(state.agent.options().llm_timeout, Duration::from_secs(7));
        assert_eq!(state.agent.options().max_messages, Some(20));
    }

    #[tokio::test]
    async fn test_system_prompt_override() {
        let mut config = memory_config();
        config.llm.system_prompt = Some("Be brief.".to_string());
        let graph = Arc::new(connect_graph(&config.graph).await);

        let agent = build_agent(&config, build_llm_client(&config.llm), graph);

        assert_eq!(agent.options().system_prompt, "Be brief.");
    }
}
