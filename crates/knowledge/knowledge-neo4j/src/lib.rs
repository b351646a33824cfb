//! # Neo4j Graph Store
//!
//! [`Neo4jGraphStore`] implements [`GraphStore`] with Cypher `MERGE` queries, so every write
//! is idempotent. Property values cross the Bolt boundary through [`json_to_bolt`] and
//! [`bolt_to_json`].

mod convert;

pub use convert::{bolt_to_json, json_to_bolt, properties_to_bolt};

use async_trait::async_trait;
use knowledge_core::{
    GraphStore, KnowledgeError, ProfileAttributes, Recommendation, Result, UserProfile,
};
use neo4rs::{query, BoltType, Graph, Query};
use tracing::{debug, info};

const UPSERT_PROFILE: &str = "MERGE (u:User {user_id: $user_id}) SET u += $profile_data";

const GET_PROFILE: &str = "MATCH (u:User {user_id: $user_id}) RETURN properties(u) AS props";

const ADD_PREFERENCE: &str = "MATCH (u:User {user_id: $user_id})
     MERGE (c:Category {name: $category})
     MERGE (p:Preference {value: $preference})
     MERGE (u)-[:LIKES]->(p)
     MERGE (p)-[:BELONGS_TO]->(c)
     RETURN count(u) AS matched";

const ADD_PURCHASE: &str = "MATCH (u:User {user_id: $user_id})
     MERGE (p:Product {product_id: $product_id})
     SET p.name = $product_name
     MERGE (u)-[:PURCHASED]->(p)
     RETURN count(u) AS matched";

const GET_RECOMMENDATIONS: &str =
    "MATCH (u:User {user_id: $user_id})-[:LIKES]->(p:Preference)-[:BELONGS_TO]->(c:Category)
     RETURN c.name AS category, collect(p.value) AS preferences
     LIMIT $limit";

fn query_error(e: neo4rs::Error) -> KnowledgeError {
    KnowledgeError::Query(e.to_string())
}

fn decode_error(e: impl std::fmt::Display) -> KnowledgeError {
    KnowledgeError::Decode(e.to_string())
}

/// Neo4j-backed graph store.
pub struct Neo4jGraphStore {
    graph: Graph,
    uri: String,
}

impl Neo4jGraphStore {
    /// Opens a connection pool and checks it with a trivial query.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| KnowledgeError::Connection(e.to_string()))?;
        graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| KnowledgeError::Connection(e.to_string()))?;
        info!(uri, "Connected to Neo4j");
        Ok(Self {
            graph,
            uri: uri.to_string(),
        })
    }

    /// Runs a query returning a single `matched` count row.
    async fn matched(&self, q: Query) -> Result<bool> {
        let mut stream = self.graph.execute(q).await.map_err(query_error)?;
        let matched = match stream.next().await.map_err(query_error)? {
            Some(row) => row.get::<i64>("matched").map_err(decode_error)?,
            None => 0,
        };
        while stream.next().await.map_err(query_error)?.is_some() {}
        Ok(matched > 0)
    }
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    fn backend_name(&self) -> &'static str {
        "neo4j"
    }

    async fn upsert_profile(&self, user_id: &str, attributes: &ProfileAttributes) -> Result<()> {
        let q = query(UPSERT_PROFILE)
            .param("user_id", user_id)
            .param("profile_data", properties_to_bolt(attributes));
        self.graph.run(q).await.map_err(query_error)?;
        debug!(user_id, keys = attributes.len(), "Neo4j: profile merged");
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let q = query(GET_PROFILE).param("user_id", user_id);
        let mut stream = self.graph.execute(q).await.map_err(query_error)?;
        let Some(row) = stream.next().await.map_err(query_error)? else {
            return Ok(None);
        };
        let props = row.get::<BoltType>("props").map_err(decode_error)?;
        let properties = match bolt_to_json(&props) {
            serde_json::Value::Object(map) => map.into_iter().collect::<ProfileAttributes>(),
            other => {
                return Err(KnowledgeError::Decode(format!(
                    "expected a property map, got {other}"
                )))
            }
        };
        Ok(Some(UserProfile::from_properties(user_id, properties)))
    }

    async fn add_preference(
        &self,
        user_id: &str,
        category: &str,
        preference: &str,
    ) -> Result<bool> {
        let q = query(ADD_PREFERENCE)
            .param("user_id", user_id)
            .param("category", category)
            .param("preference", preference);
        self.matched(q).await
    }

    async fn add_purchase(
        &self,
        user_id: &str,
        product_id: &str,
        product_name: &str,
    ) -> Result<bool> {
        let q = query(ADD_PURCHASE)
            .param("user_id", user_id)
            .param("product_id", product_id)
            .param("product_name", product_name);
        self.matched(q).await
    }

    async fn get_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let q = query(GET_RECOMMENDATIONS)
            .param("user_id", user_id)
            .param("limit", limit as i64);
        let mut stream = self.graph.execute(q).await.map_err(query_error)?;
        let mut groups = Vec::new();
        while let Some(row) = stream.next().await.map_err(query_error)? {
            let category = row.get::<String>("category").map_err(decode_error)?;
            let preferences = row.get::<Vec<String>>("preferences").map_err(decode_error)?;
            groups.push(Recommendation {
                category,
                preferences,
            });
        }
        Ok(groups)
    }

    /// Nothing to flush; the pool closes when the last handle to this store is dropped.
    async fn close(&self) -> Result<()> {
        debug!(uri = %self.uri, "Neo4j store closing, pool drops with its last handle");
        Ok(())
    }
}
