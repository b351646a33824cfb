//! # Graph Storage
//!
//! [`GraphStore`] is the fallible backend interface. Callers normally go through
//! [`crate::KnowledgeGraph`], which turns every failure into `false` / `None` / empty.
//!
//! All writes have merge semantics: repeating an identical write never creates a second node
//! or relation.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ProfileAttributes, Recommendation, UserProfile};

/// Backend for the user/preference graph.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Short backend name for logs (`neo4j`, `memory`).
    fn backend_name(&self) -> &'static str;

    /// Merges the User node keyed by `user_id` and applies `attributes` (`SET u += $attributes`).
    async fn upsert_profile(&self, user_id: &str, attributes: &ProfileAttributes) -> Result<()>;

    /// Reads the User node's properties. `None` when no such node exists.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Merges Category, Preference, `LIKES` and `BELONGS_TO` for an existing user.
    /// Returns `false` (and writes nothing) when the user does not exist.
    async fn add_preference(&self, user_id: &str, category: &str, preference: &str)
        -> Result<bool>;

    /// Merges Product and `PURCHASED` for an existing user.
    /// Returns `false` (and writes nothing) when the user does not exist.
    async fn add_purchase(&self, user_id: &str, product_id: &str, product_name: &str)
        -> Result<bool>;

    /// Liked preference values grouped by category, at most `limit` groups, store order.
    async fn get_recommendations(&self, user_id: &str, limit: usize)
        -> Result<Vec<Recommendation>>;

    /// Releases the backend connection.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
