//! # Shopping agent
//!
//! [`ShoppingAgent`] runs one chat turn end to end: log the user message, look up the profile,
//! ask the LLM with the conversation window and profile in the system prompt, log the reply,
//! then mine the message for preferences. It also fronts the profile, recommendation and
//! purchase operations used by the HTTP layer.

mod agent;
mod outcome;

pub use agent::{AgentOptions, ShoppingAgent, DEFAULT_LLM_TIMEOUT};
pub use outcome::ChatOutcome;
