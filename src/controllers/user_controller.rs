use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::dto::user_dto::UserRow;
use crate::dto::ApiResponse;
use crate::models::user::{User, UserForm};
use crate::services::listing::{self, ListQuery, Page};
use crate::state::{AppState, Session};
use crate::utils::errors::AppResult;

pub struct UserController {
    api: ApiClient,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }

    pub async fn list(&self, session: &Session, query: &ListQuery) -> AppResult<Page<UserRow>> {
        let users = self.api.list_users(&session.access_token).await?;
        Ok(listing::apply(users, query).map(|user| UserRow::from(&user)))
    }

    pub async fn get(&self, session: &Session, id: i64) -> AppResult<User> {
        self.api.get_user(&session.access_token, id).await
    }

    pub async fn drivers(&self, session: &Session) -> AppResult<Vec<UserRow>> {
        let drivers = self.api.list_drivers(&session.access_token).await?;
        Ok(drivers.iter().map(UserRow::from).collect())
    }

    pub async fn owners(&self, session: &Session) -> AppResult<Vec<UserRow>> {
        let owners = self.api.list_owners(&session.access_token).await?;
        Ok(owners.iter().map(UserRow::from).collect())
    }

    pub async fn create(&self, session: &Session, mut form: UserForm) -> AppResult<ApiResponse<User>> {
        form.is_edit = false;
        form.validate()?;
        let user = self.api.create_user(&session.access_token, &form).await?;
        info!("👤 Usuario {} creado ({})", user.email, user.role.as_str());
        Ok(ApiResponse::success_with_message(user, "User created successfully"))
    }

    /// Al editar, una contraseña vacía no se envía
    pub async fn update(&self, session: &Session, id: i64, mut form: UserForm) -> AppResult<ApiResponse<User>> {
        form.is_edit = true;
        if form.password.as_deref().map_or(false, str::is_empty) {
            form.password = None;
        }
        form.validate()?;
        let user = self.api.update_user(&session.access_token, id, &form).await?;
        Ok(ApiResponse::success_with_message(user, "User updated successfully"))
    }

    pub async fn delete(&self, session: &Session, id: i64) -> AppResult<ApiResponse<()>> {
        self.api.delete_user(&session.access_token, id).await?;
        info!("🗑️ Usuario {} eliminado", id);
        Ok(ApiResponse::message("User deleted successfully"))
    }
}
