//! # knowledge-core
//!
//! Data model and storage interface for the user-preference graph:
//!
//! - `(:User {user_id, ...})-[:LIKES]->(:Preference {value})-[:BELONGS_TO]->(:Category {name})`
//! - `(:User)-[:PURCHASED]->(:Product {product_id, name})`
//!
//! Backends implement [`GraphStore`]; the service uses the fail-soft [`KnowledgeGraph`] adapter.

pub mod error;
pub mod graph;
pub mod store;
pub mod types;

pub use error::{KnowledgeError, Result};
pub use graph::{KnowledgeGraph, DEFAULT_GRAPH_TIMEOUT};
pub use store::GraphStore;
pub use types::{
    is_storable_property, sanitize_attributes, ProfileAttributes, Recommendation, UserProfile,
    MAX_RECOMMENDATION_CATEGORIES, USER_ID_KEY,
};
