use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::dto::auth_dto::{LoginView, SessionView};
use crate::dto::ApiResponse;
use crate::models::auth::{ChangePasswordRequest, Identity, LoginRequest};
use crate::models::user::ProfileForm;
use crate::services::auth_service::AuthService;
use crate::state::{AppState, Session};
use crate::utils::errors::AppResult;

#[derive(Debug, Default, Deserialize)]
pub struct NextParam {
    pub next: Option<String>,
}

/// Endpoint de login
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<NextParam>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginView>>> {
    let session = AuthService::from_state(&state).login(payload).await?;
    let view = LoginView::new(&session, params.next.as_deref());
    Ok(Json(ApiResponse::success_with_message(view, "Login successful")))
}

/// Endpoint de logout; sin sesión no hay nada que cerrar
pub async fn logout(
    State(state): State<AppState>,
    session: Option<Extension<Session>>,
) -> Json<ApiResponse<()>> {
    if let Some(Extension(session)) = session {
        AuthService::from_state(&state).logout(&session).await;
    }
    Json(ApiResponse::message("Logout successful"))
}

/// Endpoint de refresh del access token
pub async fn refresh(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<ApiResponse<SessionView>>> {
    let session = AuthService::from_state(&state).refresh(&session).await?;
    Ok(Json(ApiResponse::success(SessionView::from(&session))))
}

pub async fn me(Extension(session): Extension<Session>) -> Json<SessionView> {
    Json(SessionView::from(&session))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    AuthService::from_state(&state)
        .change_password(&session, payload)
        .await?;
    Ok(Json(ApiResponse::message("Password changed successfully")))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<ProfileForm>,
) -> AppResult<Json<ApiResponse<Identity>>> {
    let identity = AuthService::from_state(&state)
        .update_profile(&session, payload)
        .await?;
    Ok(Json(ApiResponse::success_with_message(identity, "Profile updated successfully")))
}
