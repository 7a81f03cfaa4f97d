use axum::{
    routing::{get, post, put},
    Router,
};

use crate::controllers::auth_controller;
use crate::state::AppState;

/// Rutas de cualquier usuario autenticado
pub fn create_account_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth_controller::me))
        .route("/refresh", post(auth_controller::refresh))
        .route("/password", post(auth_controller::change_password))
        .route("/profile", put(auth_controller::update_profile))
}
