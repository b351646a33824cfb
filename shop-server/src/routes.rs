//! HTTP routes.
//!
//! | method | path | handler |
//! |--------|------|---------|
//! | GET | `/` | service info |
//! | GET | `/health` | liveness |
//! | POST | `/chat` | one chat turn (200 once the body parses; LLM failures are in-band) |
//! | POST | `/user/profile` | create or merge a profile |
//! | GET | `/user/:user_id/profile` | read a profile |
//! | GET | `/user/:user_id/recommendations` | liked preferences by category |
//! | POST | `/user/:user_id/purchases` | record a purchase |
//! | GET, DELETE | `/conversation/history` | read or clear the shared log |
//! | GET | `/search/{products,restaurants,flights,hotels}` | SerpApi proxy |
//! | GET | `/docs` | endpoint catalogue |

use std::sync::Arc;

use agent::{ChatOutcome, ShoppingAgent};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use knowledge_core::ProfileAttributes;
use serde::Deserialize;
use serde_json::{json, Value};
use serp_client::SerpApiService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const APP_NAME: &str = "Agent-Powered E-Commerce";
pub const DEFAULT_USER_ID: &str = "default_user";

/// Router state: one agent and one search proxy per process.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ShoppingAgent>,
    pub search: Arc<SerpApiService>,
}

/// Handler error rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

/// Body extraction failures keep axum's status (400/415/422) with a JSON `detail`.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = %rejection.status(), "Rejected request body");
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ---------- Request bodies and queries ----------

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct UserProfileRequest {
    pub user_id: String,
    pub profile_data: ProfileAttributes,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub product_id: String,
    pub product_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductSearchQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantSearchQuery {
    #[serde(default)]
    pub q: String,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlightSearchQuery {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct HotelSearchQuery {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
}

// ---------- Router ----------

/// Builds the router with permissive CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/user/profile", post(create_user_profile))
        .route("/user/:user_id/profile", get(get_user_profile))
        .route("/user/:user_id/recommendations", get(get_user_recommendations))
        .route("/user/:user_id/purchases", post(record_purchase))
        .route(
            "/conversation/history",
            get(get_conversation_history).delete(clear_conversation_history),
        )
        .route("/search/products", get(search_products))
        .route("/search/restaurants", get(search_restaurants))
        .route("/search/flights", get(search_flights))
        .route("/search/hotels", get(search_hotels))
        .route("/docs", get(api_docs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------- Handlers ----------

async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "app": APP_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "llm_configured": state.agent.llm_configured(),
        "graph_connected": state.agent.graph_connected(),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatOutcome>> {
    let Json(req) = body?;
    info!(user_id = %req.user_id, message_len = req.message.len(), "Chat request");
    let outcome = state
        .agent
        .process_message(&req.message, &req.user_id, &req.context)
        .await;
    Ok(Json(outcome))
}

async fn create_user_profile(
    State(state): State<AppState>,
    body: Result<Json<UserProfileRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = body?;
    if state
        .agent
        .create_user_profile(&req.user_id, &req.profile_data)
        .await
    {
        Ok(Json(json!({
            "message": "User profile created/updated successfully",
            "user_id": req.user_id,
        })))
    } else {
        warn!(user_id = %req.user_id, "Profile upsert failed");
        Err(ApiError::internal("Failed to create user profile"))
    }
}

async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    match state.agent.get_user_profile(&user_id).await {
        Some(profile) => Json(json!({ "user_id": user_id, "profile": profile })),
        None => Json(json!({
            "user_id": user_id,
            "profile": null,
            "message": "User profile not found",
        })),
    }
}

async fn get_user_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Value> {
    let recommendations = state.agent.get_user_recommendations(&user_id).await;
    Json(json!({ "user_id": user_id, "recommendations": recommendations }))
}

async fn record_purchase(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<PurchaseRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = body?;
    if state
        .agent
        .record_purchase(&user_id, &req.product_id, &req.product_name)
        .await
    {
        Ok(Json(json!({
            "message": "Purchase recorded successfully",
            "user_id": user_id,
        })))
    } else {
        Err(ApiError::internal("Failed to record purchase"))
    }
}

async fn get_conversation_history(State(state): State<AppState>) -> Json<Value> {
    let history = state.agent.get_conversation_history().await;
    Json(json!({ "conversation_history": history }))
}

async fn clear_conversation_history(State(state): State<AppState>) -> Json<Value> {
    state.agent.clear_conversation_history().await;
    Json(json!({ "message": "Conversation history cleared successfully" }))
}

async fn search_products(
    State(state): State<AppState>,
    Query(q): Query<ProductSearchQuery>,
) -> Json<Value> {
    let results = state
        .search
        .search_products(&q.q, q.category.as_deref())
        .await;
    Json(json!(results))
}

async fn search_restaurants(
    State(state): State<AppState>,
    Query(q): Query<RestaurantSearchQuery>,
) -> Json<Value> {
    let results = state
        .search
        .search_restaurants(&q.q, q.location.as_deref())
        .await;
    Json(json!(results))
}

async fn search_flights(
    State(state): State<AppState>,
    Query(q): Query<FlightSearchQuery>,
) -> Json<Value> {
    let results = state.search.search_flights(&q.from, &q.to, &q.date).await;
    Json(json!(results))
}

async fn search_hotels(
    State(state): State<AppState>,
    Query(q): Query<HotelSearchQuery>,
) -> Json<Value> {
    let results = state
        .search
        .search_hotels(&q.location, &q.check_in, &q.check_out)
        .await;
    Json(json!(results))
}

async fn api_docs() -> Json<Value> {
    Json(json!({
        "endpoints": {
            "POST /chat": "Chat with the AI shopping assistant",
            "POST /user/profile": "Create or update user profile",
            "GET /user/{user_id}/profile": "Get user profile",
            "GET /user/{user_id}/recommendations": "Get personalized recommendations",
            "POST /user/{user_id}/purchases": "Record a purchase",
            "GET /conversation/history": "Get conversation history",
            "DELETE /conversation/history": "Clear conversation history",
            "GET /search/products": "Search products (q, category)",
            "GET /search/restaurants": "Search restaurants (q, location)",
            "GET /search/flights": "Search flights (from, to, date)",
            "GET /search/hotels": "Search hotels (location, check_in, check_out)",
            "GET /health": "Health check",
            "GET /": "Application info"
        },
        "usage": {
            "chat_endpoint": {
                "method": "POST",
                "url": "/chat",
                "body": {
                    "message": "string (required)",
                    "user_id": "string (optional, default: 'default_user')",
                    "context": "string (optional)"
                }
            }
        }
    }))
}
