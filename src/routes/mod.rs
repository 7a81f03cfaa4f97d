//! Router del portal
//!
//! Un subárbol por rol más las rutas de cuenta y autenticación. La sesión se
//! resuelve primero y el guard decide después, antes de llegar a los handlers.

pub mod account_routes;
pub mod admin_routes;
pub mod auth_routes;
pub mod driver_routes;
pub mod handlers;
pub mod owner_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_middleware, cors_middleware_with_origins, role_guard, session_middleware};
use crate::services::navigation::LOGIN_PATH;
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    // sin orígenes configurados solo desarrollo abre CORS a cualquiera
    let cors = if state.config.is_development() && state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
        .merge(auth_routes::create_auth_router())
        .nest("/account", account_routes::create_account_router())
        .nest("/admin", admin_routes::create_admin_router())
        .nest("/owner", owner_routes::create_owner_router())
        .nest("/driver", driver_routes::create_driver_router())
        .layer(middleware::from_fn(role_guard))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Landing pública
async fn landing() -> Json<Value> {
    Json(json!({
        "name": "Transport Portal",
        "login": LOGIN_PATH,
        "portals": ["/admin", "/owner", "/driver"],
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
