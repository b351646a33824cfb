//! # In-Memory Graph Store
//!
//! [`InMemoryGraphStore`] implements [`GraphStore`] in process memory with the same merge
//! semantics as the Cypher queries of the Neo4j backend:
//!
//! - nodes are keyed (`User.user_id`, `Category.name`, `Preference.value`, `Product.product_id`)
//! - relations are sets, so repeated writes are no-ops
//! - preference/purchase writes for an unknown user write nothing
//!
//! Data is lost on restart. Selected with `GRAPH_STORE=memory`, and used by tests.
//!
//! ## Thread Safety
//!
//! State lives behind `Arc<RwLock<_>>`; clones share the same graph.

use async_trait::async_trait;
use knowledge_core::{
    GraphStore, ProfileAttributes, Recommendation, Result, UserProfile,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Node and relation counts, for assertions and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub users: usize,
    pub categories: usize,
    pub preferences: usize,
    pub products: usize,
    pub likes: usize,
    pub belongs_to: usize,
    pub purchased: usize,
}

#[derive(Debug, Default)]
struct GraphState {
    users: HashMap<String, UserProfile>,
    /// Category names in creation order.
    categories: Vec<String>,
    /// Preference value → categories it belongs to, in creation order.
    preferences: HashMap<String, Vec<String>>,
    /// Product id → name.
    products: HashMap<String, String>,
    /// User id → liked preference values, in creation order.
    likes: HashMap<String, Vec<String>>,
    /// User id → purchased product ids, in creation order.
    purchases: HashMap<String, Vec<String>>,
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|v| v == value) {
        false
    } else {
        list.push(value.to_string());
        true
    }
}

/// In-memory graph for development and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraphStore {
    state: Arc<RwLock<GraphState>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stats(&self) -> GraphStats {
        let state = self.state.read().await;
        GraphStats {
            users: state.users.len(),
            categories: state.categories.len(),
            preferences: state.preferences.len(),
            products: state.products.len(),
            likes: state.likes.values().map(Vec::len).sum(),
            belongs_to: state.preferences.values().map(Vec::len).sum(),
            purchased: state.purchases.values().map(Vec::len).sum(),
        }
    }

    /// Product ids purchased by `user_id`, in creation order.
    pub async fn purchases_of(&self, user_id: &str) -> Vec<(String, String)> {
        let state = self.state.read().await;
        state
            .purchases
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .map(|id| {
                        let name = state.products.get(id).cloned().unwrap_or_default();
                        (id.clone(), name)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Removes everything.
    pub async fn clear(&self) {
        *self.state.write().await = GraphState::default();
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn upsert_profile(&self, user_id: &str, attributes: &ProfileAttributes) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id))
            .merge(attributes);
        debug!(user_id, keys = attributes.len(), "InMemoryGraphStore: profile merged");
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn add_preference(
        &self,
        user_id: &str,
        category: &str,
        preference: &str,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(user_id) {
            return Ok(false);
        }
        push_unique(&mut state.categories, category);
        let belongs_to = state.preferences.entry(preference.to_string()).or_default();
        push_unique(belongs_to, category);
        let likes = state.likes.entry(user_id.to_string()).or_default();
        push_unique(likes, preference);
        Ok(true)
    }

    async fn add_purchase(
        &self,
        user_id: &str,
        product_id: &str,
        product_name: &str,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(user_id) {
            return Ok(false);
        }
        state
            .products
            .insert(product_id.to_string(), product_name.to_string());
        let purchased = state.purchases.entry(user_id.to_string()).or_default();
        push_unique(purchased, product_id);
        Ok(true)
    }

    async fn get_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let state = self.state.read().await;
        let mut groups: Vec<Recommendation> = Vec::new();
        let Some(liked) = state.likes.get(user_id) else {
            return Ok(groups);
        };
        for value in liked {
            for category in state.preferences.get(value).into_iter().flatten() {
                match groups.iter_mut().find(|g| &g.category == category) {
                    Some(group) => group.preferences.push(value.clone()),
                    None => groups.push(Recommendation {
                        category: category.clone(),
                        preferences: vec![value.clone()],
                    }),
                }
            }
        }
        groups.truncate(limit);
        Ok(groups)
    }
}
