//! Cliente HTTP para la API REST de transporte
//!
//! Todas las llamadas autenticadas llevan el access token como Bearer.
//! Los errores HTTP de la API se traducen a `AppError` en un único punto.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::models::auth::{ChangePasswordRequest, LoginRequest, LoginResponse, RefreshResponse};
use crate::models::dashboard::DashboardStats;
use crate::models::expense::{Expense, ExpenseForm};
use crate::models::order::{Order, OrderForm, OrderStatus, UpdateStatusRequest};
use crate::models::timeline::TimelineEvent;
use crate::models::transfer::{Transfer, TransferForm};
use crate::models::truck::{AssignDriverRequest, Truck, TruckForm};
use crate::models::user::{ProfileForm, User, UserForm};
use crate::utils::errors::{AppError, AppResult};

/// Las listas llegan como array plano o paginadas con `results`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Plain(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> ListPayload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Plain(items) => items,
            ListPayload::Paginated { results } => results,
        }
    }
}

/// Cliente de la API de transporte
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Crear nuevo cliente con timeout configurable
    pub fn new(base_url: &str, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("🌐 {} {}", method, url);

        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
        let response = check_status(builder.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid API payload: {}", e)))
    }

    async fn send_empty(builder: RequestBuilder) -> AppResult<()> {
        check_status(builder.send().await?).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> AppResult<T> {
        Self::send(self.request(Method::GET, path, Some(token))).await
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        params: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let builder = self.request(Method::GET, path, Some(token)).query(params);
        let payload: ListPayload<T> = Self::send(builder).await?;
        Ok(payload.into_vec())
    }

    async fn write<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: &B,
    ) -> AppResult<T> {
        Self::send(self.request(method, path, Some(token)).json(body)).await
    }

    async fn delete(&self, path: &str, token: &str) -> AppResult<()> {
        Self::send_empty(self.request(Method::DELETE, path, Some(token))).await
    }

    // ---- auth ----

    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        Self::send(self.request(Method::POST, "/api/auth/login/", None).json(request)).await
    }

    pub async fn logout(&self, token: &str, refresh: Option<&str>) -> AppResult<()> {
        let builder = self
            .request(Method::POST, "/api/auth/logout/", Some(token))
            .json(&json!({ "refresh": refresh }));
        Self::send_empty(builder).await
    }

    pub async fn refresh(&self, refresh: &str) -> AppResult<RefreshResponse> {
        let builder = self
            .request(Method::POST, "/api/auth/token/refresh/", None)
            .json(&json!({ "refresh": refresh }));
        Self::send(builder).await
    }

    pub async fn change_password(&self, token: &str, request: &ChangePasswordRequest) -> AppResult<()> {
        let builder = self
            .request(Method::POST, "/api/auth/change_password/", Some(token))
            .json(request);
        Self::send_empty(builder).await
    }

    // ---- users ----

    pub async fn list_users(&self, token: &str) -> AppResult<Vec<User>> {
        self.list("/api/users/", token, &[]).await
    }

    pub async fn get_user(&self, token: &str, id: i64) -> AppResult<User> {
        self.get(&format!("/api/users/{}/", id), token).await
    }

    pub async fn create_user(&self, token: &str, form: &UserForm) -> AppResult<User> {
        self.write(Method::POST, "/api/users/", token, form).await
    }

    pub async fn update_user(&self, token: &str, id: i64, form: &UserForm) -> AppResult<User> {
        self.write(Method::PUT, &format!("/api/users/{}/", id), token, form).await
    }

    pub async fn delete_user(&self, token: &str, id: i64) -> AppResult<()> {
        self.delete(&format!("/api/users/{}/", id), token).await
    }

    pub async fn list_drivers(&self, token: &str) -> AppResult<Vec<User>> {
        self.list("/api/users/drivers/", token, &[]).await
    }

    pub async fn list_owners(&self, token: &str) -> AppResult<Vec<User>> {
        self.list("/api/users/owners/", token, &[]).await
    }

    pub async fn update_profile(&self, token: &str, form: &ProfileForm) -> AppResult<User> {
        self.write(Method::PUT, "/api/users/update_profile/", token, form).await
    }

    // ---- trucks ----

    pub async fn list_trucks(&self, token: &str, owner: Option<i64>) -> AppResult<Vec<Truck>> {
        let params: Vec<(&str, String)> = owner.map(|id| ("owner", id.to_string())).into_iter().collect();
        self.list("/api/transport/trucks/", token, &params).await
    }

    pub async fn get_truck(&self, token: &str, id: i64) -> AppResult<Truck> {
        self.get(&format!("/api/transport/trucks/{}/", id), token).await
    }

    pub async fn create_truck(&self, token: &str, form: &TruckForm) -> AppResult<Truck> {
        self.write(Method::POST, "/api/transport/trucks/", token, form).await
    }

    pub async fn update_truck(&self, token: &str, id: i64, form: &TruckForm) -> AppResult<Truck> {
        self.write(Method::PUT, &format!("/api/transport/trucks/{}/", id), token, form)
            .await
    }

    pub async fn delete_truck(&self, token: &str, id: i64) -> AppResult<()> {
        self.delete(&format!("/api/transport/trucks/{}/", id), token).await
    }

    pub async fn assign_driver(&self, token: &str, id: i64, driver_id: i64) -> AppResult<Value> {
        self.write(
            Method::POST,
            &format!("/api/transport/trucks/{}/assign_driver/", id),
            token,
            &AssignDriverRequest { driver_id },
        )
        .await
    }

    // ---- orders ----

    pub async fn list_orders(&self, token: &str) -> AppResult<Vec<Order>> {
        self.list("/api/transport/orders/", token, &[]).await
    }

    pub async fn get_order(&self, token: &str, id: i64) -> AppResult<Order> {
        self.get(&format!("/api/transport/orders/{}/", id), token).await
    }

    pub async fn create_order(&self, token: &str, form: &OrderForm) -> AppResult<Order> {
        self.write(Method::POST, "/api/transport/orders/", token, form).await
    }

    pub async fn update_order(&self, token: &str, id: i64, form: &OrderForm) -> AppResult<Order> {
        self.write(Method::PUT, &format!("/api/transport/orders/{}/", id), token, form)
            .await
    }

    pub async fn delete_order(&self, token: &str, id: i64) -> AppResult<()> {
        self.delete(&format!("/api/transport/orders/{}/", id), token).await
    }

    pub async fn order_timeline(&self, token: &str, id: i64) -> AppResult<Vec<TimelineEvent>> {
        self.list(&format!("/api/transport/orders/{}/timeline/", id), token, &[])
            .await
    }

    pub async fn order_expenses(&self, token: &str, id: i64) -> AppResult<Vec<Expense>> {
        self.list(&format!("/api/transport/orders/{}/expenses/", id), token, &[])
            .await
    }

    pub async fn order_transfers(&self, token: &str, id: i64) -> AppResult<Vec<Transfer>> {
        self.list(&format!("/api/transport/orders/{}/transfers/", id), token, &[])
            .await
    }

    pub async fn update_order_status(
        &self,
        token: &str,
        id: i64,
        status: OrderStatus,
    ) -> AppResult<Value> {
        self.write(
            Method::POST,
            &format!("/api/transport/orders/{}/update_status/", id),
            token,
            &UpdateStatusRequest { status },
        )
        .await
    }

    pub async fn dashboard_stats(&self, token: &str) -> AppResult<DashboardStats> {
        self.get("/api/transport/dashboard/stats/", token).await
    }

    // ---- expenses ----

    pub async fn list_expenses(&self, token: &str, order: Option<i64>) -> AppResult<Vec<Expense>> {
        let params: Vec<(&str, String)> = order.map(|id| ("order", id.to_string())).into_iter().collect();
        self.list("/api/transport/expenses/", token, &params).await
    }

    pub async fn create_expense(&self, token: &str, form: &ExpenseForm) -> AppResult<Expense> {
        self.write(Method::POST, "/api/transport/expenses/", token, form).await
    }

    pub async fn get_expense(&self, token: &str, id: i64) -> AppResult<Expense> {
        self.get(&format!("/api/transport/expenses/{}/", id), token).await
    }

    pub async fn update_expense(&self, token: &str, id: i64, form: &ExpenseForm) -> AppResult<Expense> {
        self.write(Method::PUT, &format!("/api/transport/expenses/{}/", id), token, form)
            .await
    }

    pub async fn delete_expense(&self, token: &str, id: i64) -> AppResult<()> {
        self.delete(&format!("/api/transport/expenses/{}/", id), token).await
    }

    // ---- transfers ----

    pub async fn list_transfers(&self, token: &str, order: Option<i64>) -> AppResult<Vec<Transfer>> {
        let params: Vec<(&str, String)> = order.map(|id| ("order", id.to_string())).into_iter().collect();
        self.list("/api/transport/transfers/", token, &params).await
    }

    pub async fn create_transfer(&self, token: &str, form: &TransferForm) -> AppResult<Transfer> {
        self.write(Method::POST, "/api/transport/transfers/", token, form).await
    }

    pub async fn get_transfer(&self, token: &str, id: i64) -> AppResult<Transfer> {
        self.get(&format!("/api/transport/transfers/{}/", id), token).await
    }

    pub async fn update_transfer(&self, token: &str, id: i64, form: &TransferForm) -> AppResult<Transfer> {
        self.write(Method::PUT, &format!("/api/transport/transfers/{}/", id), token, form)
            .await
    }

    pub async fn delete_transfer(&self, token: &str, id: i64) -> AppResult<()> {
        self.delete(&format!("/api/transport/transfers/{}/", id), token).await
    }
}

/// Mensaje legible de un cuerpo de error de la API (`detail`, `error` o `message`)
fn api_message(body: &Value, fallback: &str) -> String {
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
    warn!("⚠️ API respondió {}: {}", status, text);

    Err(match status {
        StatusCode::UNAUTHORIZED => {
            AppError::Unauthorized(api_message(&body, "Session expired"))
        }
        StatusCode::FORBIDDEN => AppError::Forbidden(api_message(&body, "Access denied")),
        StatusCode::NOT_FOUND => AppError::NotFound(api_message(&body, "Resource not found")),
        StatusCode::BAD_REQUEST => {
            let details = if body.is_null() { None } else { Some(body.clone()) };
            AppError::BadRequest(api_message(&body, "Invalid request"), details)
        }
        other => AppError::ExternalApi(format!("API error {}", other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_payload_shapes() {
        let plain: ListPayload<i64> = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2, 3]);

        let paginated: ListPayload<i64> =
            serde_json::from_value(json!({ "count": 2, "results": [4, 5] })).unwrap();
        assert_eq!(paginated.into_vec(), vec![4, 5]);
    }

    #[test]
    fn test_api_message_keys() {
        assert_eq!(api_message(&json!({ "detail": "Nope" }), "x"), "Nope");
        assert_eq!(api_message(&json!({ "error": "Bad" }), "x"), "Bad");
        assert_eq!(api_message(&json!({ "email": ["taken"] }), "fallback"), "fallback");
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = ApiClient::new("http://127.0.0.1:8000/", 5).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }
}
