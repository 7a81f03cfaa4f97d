use axum::{
    routing::{get, post},
    Router,
};

use crate::routes::handlers;
use crate::state::AppState;

pub fn create_owner_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::role_index))
        .route("/dashboard", get(handlers::owner_dashboard))
        .route("/trucks", get(handlers::list_trucks))
        .route("/trucks/:id", get(handlers::get_truck))
        .route("/orders", get(handlers::list_orders))
        .route("/orders/:id", get(handlers::get_order))
        .route("/orders/:id/status", post(handlers::update_order_status))
}
