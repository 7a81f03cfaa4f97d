use axum::{
    routing::{get, post},
    Router,
};

use crate::routes::handlers;
use crate::state::AppState;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::role_index))
        .route("/dashboard", get(handlers::driver_dashboard))
        .route("/orders", get(handlers::list_orders))
        .route("/orders/:id", get(handlers::get_order))
        .route("/orders/:id/status", post(handlers::update_order_status))
        .route("/expenses", get(handlers::list_expenses).post(handlers::create_expense))
        .route("/transfers", get(handlers::list_transfers))
}
