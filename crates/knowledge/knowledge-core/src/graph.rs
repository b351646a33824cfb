//! # Knowledge Graph adapter
//!
//! [`KnowledgeGraph`] owns the (optional) backend handle and is the only way the rest of the
//! service talks to the graph. Every operation fails soft:
//!
//! | operation | failure value |
//! |-----------|---------------|
//! | `upsert_profile`, `add_preference`, `add_purchase` | `false` |
//! | `get_profile` | `None` |
//! | `get_recommendations` | empty list |
//!
//! Failures are: no connection, backend error, invalid property, timeout. Each is logged and
//! never propagated.

use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::KnowledgeError;
use crate::store::GraphStore;
use crate::types::{
    sanitize_attributes, ProfileAttributes, Recommendation, UserProfile,
    MAX_RECOMMENDATION_CATEGORIES,
};

/// Default bound on a single graph call.
pub const DEFAULT_GRAPH_TIMEOUT: Duration = Duration::from_secs(5);

/// Fail-soft adapter over a [`GraphStore`].
pub struct KnowledgeGraph {
    store: RwLock<Option<Arc<dyn GraphStore>>>,
    timeout: Duration,
}

impl KnowledgeGraph {
    /// An adapter with no backend; every call returns its failure value.
    pub fn disconnected() -> Self {
        Self {
            store: RwLock::new(None),
            timeout: DEFAULT_GRAPH_TIMEOUT,
        }
    }

    /// An adapter over an already connected backend.
    pub fn connected(store: Arc<dyn GraphStore>) -> Self {
        info!(backend = store.backend_name(), "Knowledge graph connected");
        Self {
            store: RwLock::new(Some(store)),
            timeout: DEFAULT_GRAPH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_connected(&self) -> bool {
        self.handle().is_some()
    }

    /// Releases the backend. Later calls behave as disconnected.
    pub async fn close(&self) {
        let store = match self.store.write() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(store) = store {
            match store.close().await {
                Ok(()) => info!(backend = store.backend_name(), "Knowledge graph closed"),
                Err(e) => warn!(error = %e, "Error while closing knowledge graph"),
            }
        }
    }

    fn handle(&self) -> Option<Arc<dyn GraphStore>> {
        match self.store.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Runs one backend call under the timeout; `None` on any failure.
    async fn call<T, F, Fut>(&self, operation: &'static str, f: F) -> Option<T>
    where
        F: FnOnce(Arc<dyn GraphStore>) -> Fut,
        Fut: Future<Output = Result<T, KnowledgeError>>,
    {
        let Some(store) = self.handle() else {
            warn!(operation, "No graph connection available");
            return None;
        };
        match tokio::time::timeout(self.timeout, f(store)).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                error!(operation, error = %e, "Graph operation failed");
                None
            }
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Graph operation timed out"
                );
                None
            }
        }
    }

    /// Creates or merges the User node. Existing properties not named in `attributes` survive.
    pub async fn upsert_profile(&self, user_id: &str, attributes: &ProfileAttributes) -> bool {
        let attributes = match sanitize_attributes(attributes) {
            Ok(a) => a,
            Err(e) => {
                warn!(user_id, error = %e, "Rejected profile update");
                return false;
            }
        };
        let done = self
            .call("upsert_profile", |store| async move {
                store.upsert_profile(user_id, &attributes).await
            })
            .await
            .is_some();
        if done {
            info!(user_id, "User profile created/updated");
        }
        done
    }

    pub async fn get_profile(&self, user_id: &str) -> Option<UserProfile> {
        self.call("get_profile", |store| async move { store.get_profile(user_id).await })
            .await
            .flatten()
    }

    /// Records that `user_id` likes `preference` within `category`. A missing user is not a
    /// failure: nothing is written and the call still succeeds.
    pub async fn add_preference(&self, user_id: &str, category: &str, preference: &str) -> bool {
        match self
            .call("add_preference", |store| async move {
                store.add_preference(user_id, category, preference).await
            })
            .await
        {
            Some(true) => {
                info!(user_id, category, preference, "Added preference");
                true
            }
            Some(false) => {
                debug!(user_id, category, preference, "User not found, preference skipped");
                true
            }
            None => false,
        }
    }

    /// Records a purchase. Same missing-user semantics as [`Self::add_preference`].
    pub async fn add_purchase(&self, user_id: &str, product_id: &str, product_name: &str) -> bool {
        match self
            .call("add_purchase", |store| async move {
                store.add_purchase(user_id, product_id, product_name).await
            })
            .await
        {
            Some(true) => {
                info!(user_id, product_id, product_name, "Added purchase");
                true
            }
            Some(false) => {
                debug!(user_id, product_id, "User not found, purchase skipped");
                true
            }
            None => false,
        }
    }

    /// Up to [`MAX_RECOMMENDATION_CATEGORIES`] category groups. Order is whatever the store
    /// returns and must not be relied on.
    pub async fn get_recommendations(&self, user_id: &str) -> Vec<Recommendation> {
        let mut groups = self
            .call("get_recommendations", |store| async move {
                store
                    .get_recommendations(user_id, MAX_RECOMMENDATION_CATEGORIES)
                    .await
            })
            .await
            .unwrap_or_default();
        groups.truncate(MAX_RECOMMENDATION_CATEGORIES);
        groups
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::disconnected()
    }
}
