use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::storage::ContentStore;
use crate::store::Store;

/// Shared handler dependencies: the entity store and the content store for
/// generated artifacts. Both sit behind trait objects so tests and
/// development mode can run entirely in-process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub files: Arc<dyn ContentStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(index))
        .route("/health", get(health))
        .merge(auth_routes())
        // Bearer-token protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
}

fn api_routes() -> Router<AppState> {
    use axum::middleware::from_fn;

    Router::new()
        .route("/api/v1/products", post(handlers::products::create))
        .route(
            "/api/v1/products/:id",
            put(handlers::products::update).patch(handlers::products::update),
        )
        .route("/api/v1/organizations", post(handlers::organizations::create))
        .route(
            "/api/v1/organizations/:org_id/users",
            get(handlers::members::list),
        )
        .route(
            "/api/v1/organizations/:org_id/invites",
            post(handlers::invites::create),
        )
        .route("/api/v1/members/:org_id/search", get(handlers::members::search))
        .route("/api/v1/members/:org_id/export", get(handlers::members::export))
        .route("/api/v1/invites/accept", post(handlers::invites::accept))
        .route_layer(from_fn(crate::middleware::bearer_auth))
}

async fn index() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Orgnest API",
            "version": version,
            "description": "Multi-tenant organization and product management backend API",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/api/v1/auth/register, /api/v1/auth/login (public - token acquisition)",
                "products": "/api/v1/products[/:id] (protected)",
                "organizations": "/api/v1/organizations[/:orgId/users|/:orgId/invites] (protected)",
                "members": "/api/v1/members/:orgId/search|export (protected)",
                "invites": "/api/v1/invites/accept (protected)",
            },
        },
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "store": "ok" }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "store unavailable",
                "data": { "status": "degraded", "timestamp": now, "store_error": e.to_string() }
            })),
        ),
    }
}
