use axum::{
    routing::{get, post},
    Router,
};

use crate::routes::handlers;
use crate::state::AppState;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::role_index))
        .route("/dashboard", get(handlers::admin_dashboard))
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route("/users/drivers", get(handlers::list_drivers))
        .route("/users/owners", get(handlers::list_owners))
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/trucks", get(handlers::list_trucks).post(handlers::create_truck))
        .route(
            "/trucks/:id",
            get(handlers::get_truck)
                .put(handlers::update_truck)
                .delete(handlers::delete_truck),
        )
        .route("/trucks/:id/assign_driver", post(handlers::assign_driver))
        .route("/orders", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/orders/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/orders/:id/status", post(handlers::update_order_status))
        .route("/expenses", get(handlers::list_expenses).post(handlers::create_expense))
        .route(
            "/expenses/:id",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        .route("/transfers", get(handlers::list_transfers).post(handlers::create_transfer))
        .route(
            "/transfers/:id",
            get(handlers::get_transfer)
                .put(handlers::update_transfer)
                .delete(handlers::delete_transfer),
        )
}
