use axum::{routing::post, Router};

use crate::controllers::auth_controller;
use crate::state::AppState;

/// `/login` y `/logout` quedan fuera del guard
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth_controller::login))
        .route("/logout", post(auth_controller::logout))
}
