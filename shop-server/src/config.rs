//! Service configuration, loaded from the environment (after `.env`).
//!
//! Loading never fails: missing keys degrade their component, unparsable values fall back to
//! defaults. Loading runs before tracing is up, so problems are kept in
//! [`AppConfig::warnings`] and logged by the runner.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use llm_client::EnvLlmConfig;
use shop_core::ShopError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_LOG_FILE: &str = "logs/shop-agent.log";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GRAPH_TIMEOUT_SECS: u64 = 5;

/// Which [`knowledge_core::GraphStore`] backs the knowledge graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphBackend {
    #[default]
    Neo4j,
    Memory,
}

impl FromStr for GraphBackend {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neo4j" => Ok(Self::Neo4j),
            "memory" | "inmemory" | "in-memory" => Ok(Self::Memory),
            other => Err(ShopError::Config(format!(
                "GRAPH_STORE must be neo4j or memory, got {other:?}"
            ))),
        }
    }
}

/// Graph backend connection settings.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// GRAPH_STORE
    pub backend: GraphBackend,
    /// NEO4J_URI
    pub uri: String,
    /// NEO4J_USER
    pub user: String,
    /// NEO4J_PASSWORD
    pub password: String,
    /// GRAPH_TIMEOUT_SECS
    pub timeout_secs: u64,
}

impl GraphConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            backend: GraphBackend::default(),
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            timeout_secs: DEFAULT_GRAPH_TIMEOUT_SECS,
        }
    }
}

/// Bind address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Full service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: EnvLlmConfig,
    /// LLM_TIMEOUT_SECS
    pub llm_timeout_secs: u64,
    pub graph: GraphConfig,
    /// SERP_API_KEY; `None` serves mock search data
    pub serp_api_key: Option<String>,
    /// CONVERSATION_MAX_MESSAGES; `None` keeps the whole log
    pub conversation_max_messages: Option<usize>,
    pub server: ServerConfig,
    /// DEBUG
    pub debug: bool,
    /// LOG_FILE
    pub log_file: String,
    /// Invalid values that were replaced by defaults.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: EnvLlmConfig::default(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            graph: GraphConfig::default(),
            serp_api_key: None,
            conversation_max_messages: None,
            server: ServerConfig::default(),
            debug: false,
            log_file: DEFAULT_LOG_FILE.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// Parses `key` if set; unparsable values are recorded in `warnings` and ignored.
fn parse_env<T: FromStr>(key: &str, warnings: &mut Vec<String>) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warnings.push(format!("Ignoring invalid {key}={raw:?}"));
            None
        }
    }
}

fn parse_bool_env(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Reads `.env` (if present), then the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Reads the process environment only.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let backend = match env::var("GRAPH_STORE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: ShopError| {
                warnings.push(format!("{e}; falling back to neo4j graph store"));
                GraphBackend::Neo4j
            }),
            Err(_) => defaults.graph.backend,
        };
        let graph = GraphConfig {
            backend,
            uri: env::var("NEO4J_URI").unwrap_or(defaults.graph.uri),
            user: env::var("NEO4J_USER").unwrap_or(defaults.graph.user),
            password: env::var("NEO4J_PASSWORD").unwrap_or(defaults.graph.password),
            timeout_secs: parse_env("GRAPH_TIMEOUT_SECS", &mut warnings)
                .unwrap_or(defaults.graph.timeout_secs),
        };

        let server = ServerConfig {
            host: non_empty_env("HOST").unwrap_or(defaults.server.host),
            port: parse_env("PORT", &mut warnings).unwrap_or(defaults.server.port),
        };

        Self {
            llm: EnvLlmConfig::from_env(),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", &mut warnings)
                .unwrap_or(defaults.llm_timeout_secs),
            graph,
            serp_api_key: non_empty_env("SERP_API_KEY"),
            conversation_max_messages: parse_env::<usize>("CONVERSATION_MAX_MESSAGES", &mut warnings)
                .filter(|n| *n > 0),
            server,
            debug: parse_bool_env("DEBUG").unwrap_or(defaults.debug),
            log_file: non_empty_env("LOG_FILE").unwrap_or(defaults.log_file),
            warnings,
        }
    }

    /// Applies CLI overrides to the bind address.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}
