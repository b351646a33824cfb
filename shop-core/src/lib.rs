//! # shop-core
//!
//! Shared pieces for the shopping assistant: [`ShopError`], tracing initialization, and the
//! conversation record types used by the session, the agent and the HTTP layer.

pub mod error;
pub mod logger;
pub mod types;

pub use error::ShopError;
pub use logger::{default_filter, init_tracing};
pub use types::{ConversationMessage, ConversationRole};
