//! # shop-server
//!
//! HTTP front end for the shopping assistant: configuration from the environment, component
//! assembly, the axum router, and the serve loop.

pub mod cli;
pub mod components;
pub mod config;
pub mod routes;
pub mod runner;

pub use cli::{Cli, Commands};
pub use components::{build_agent, build_components, build_llm_client, connect_graph};
pub use config::{AppConfig, GraphBackend, GraphConfig, ServerConfig};
pub use routes::{build_router, AppState, APP_NAME};
pub use runner::run_server;
