//! Handlers compartidos entre subárboles de rol
//!
//! El guard ya garantizó que el rol de la sesión coincide con el subárbol,
//! así que el prefijo de los enlaces sale del propio rol.

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Extension, Json,
};
use serde::Deserialize;

use crate::controllers::truck_controller::TruckDetailView;
use crate::controllers::{
    DashboardController, FinanceController, OrderController, TruckController, UserController,
};
use crate::dto::dashboard_dto::{AdminDashboard, DriverDashboard, OwnerDashboard};
use crate::dto::finance_dto::{ExpenseListView, TransferListView};
use crate::dto::order_dto::{OrderDetailView, OrderRow};
use crate::dto::truck_dto::TruckRow;
use crate::dto::user_dto::UserRow;
use crate::dto::ApiResponse;
use crate::models::expense::{Expense, ExpenseForm};
use crate::models::order::{Order, OrderForm, UpdateStatusRequest};
use crate::models::transfer::{Transfer, TransferForm};
use crate::models::truck::{Truck, TruckForm};
use crate::models::user::{User, UserForm};
use crate::services::listing::{ListQuery, Page};
use crate::services::navigation::{home_path, role_prefix};
use crate::state::{AppState, Session};
use crate::utils::errors::AppResult;

fn prefix(session: &Session) -> &'static str {
    role_prefix(&session.identity.role).unwrap_or("")
}

/// `/<rol>` a secas lleva al dashboard del rol
pub async fn role_index(Extension(session): Extension<Session>) -> Redirect {
    Redirect::to(home_path(&session.identity.role))
}

// ---- dashboards ----

pub async fn admin_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<AdminDashboard>> {
    Ok(Json(DashboardController::new(&state).admin(&session).await?))
}

pub async fn owner_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<OwnerDashboard>> {
    Ok(Json(DashboardController::new(&state).owner(&session).await?))
}

pub async fn driver_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<DriverDashboard>> {
    Ok(Json(DashboardController::new(&state).driver(&session).await?))
}

// ---- orders ----

pub async fn list_orders(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<OrderRow>>> {
    let page = OrderController::new(&state)
        .list(&session, prefix(&session), &query)
        .await?;
    Ok(Json(page))
}

pub async fn get_order(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetailView>> {
    Ok(Json(OrderController::new(&state).detail(&session, id).await?))
}

pub async fn create_order(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(form): Json<OrderForm>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(OrderController::new(&state).create(&session, form).await?))
}

pub async fn update_order(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(form): Json<OrderForm>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(OrderController::new(&state).update(&session, id, form).await?))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(OrderController::new(&state).delete(&session, id).await?))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<OrderDetailView>>> {
    let response = OrderController::new(&state)
        .update_status(&session, id, request)
        .await?;
    Ok(Json(response))
}

// ---- trucks ----

pub async fn list_trucks(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<TruckRow>>> {
    let page = TruckController::new(&state)
        .list(&session, prefix(&session), &query)
        .await?;
    Ok(Json(page))
}

pub async fn get_truck(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<TruckDetailView>> {
    let view = TruckController::new(&state)
        .detail(&session, prefix(&session), id)
        .await?;
    Ok(Json(view))
}

pub async fn create_truck(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(form): Json<TruckForm>,
) -> AppResult<Json<ApiResponse<Truck>>> {
    Ok(Json(TruckController::new(&state).create(&session, form).await?))
}

pub async fn update_truck(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(form): Json<TruckForm>,
) -> AppResult<Json<ApiResponse<Truck>>> {
    Ok(Json(TruckController::new(&state).update(&session, id, form).await?))
}

pub async fn delete_truck(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(TruckController::new(&state).delete(&session, id).await?))
}

#[derive(Debug, Deserialize)]
pub struct AssignDriverBody {
    pub driver_id: i64,
}

pub async fn assign_driver(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(body): Json<AssignDriverBody>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let response = TruckController::new(&state)
        .assign_driver(&session, id, body.driver_id)
        .await?;
    Ok(Json(response))
}

// ---- users ----

pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<UserRow>>> {
    Ok(Json(UserController::new(&state).list(&session, &query).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    Ok(Json(UserController::new(&state).get(&session, id).await?))
}

pub async fn list_drivers(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<UserRow>>> {
    Ok(Json(UserController::new(&state).drivers(&session).await?))
}

pub async fn list_owners(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<UserRow>>> {
    Ok(Json(UserController::new(&state).owners(&session).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(form): Json<UserForm>,
) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(UserController::new(&state).create(&session, form).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(form): Json<UserForm>,
) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(UserController::new(&state).update(&session, id, form).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(UserController::new(&state).delete(&session, id).await?))
}

// ---- expenses / transfers ----

pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ExpenseListView>> {
    Ok(Json(FinanceController::new(&state).list_expenses(&session, &query).await?))
}

pub async fn create_expense(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(form): Json<ExpenseForm>,
) -> AppResult<Json<ApiResponse<Expense>>> {
    Ok(Json(FinanceController::new(&state).create_expense(&session, form).await?))
}

pub async fn get_expense(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<Expense>> {
    Ok(Json(FinanceController::new(&state).get_expense(&session, id).await?))
}

pub async fn update_expense(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(form): Json<ExpenseForm>,
) -> AppResult<Json<ApiResponse<Expense>>> {
    Ok(Json(FinanceController::new(&state).update_expense(&session, id, form).await?))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(FinanceController::new(&state).delete_expense(&session, id).await?))
}

pub async fn list_transfers(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TransferListView>> {
    Ok(Json(FinanceController::new(&state).list_transfers(&session, &query).await?))
}

pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(form): Json<TransferForm>,
) -> AppResult<Json<ApiResponse<Transfer>>> {
    Ok(Json(FinanceController::new(&state).create_transfer(&session, form).await?))
}

pub async fn get_transfer(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<Transfer>> {
    Ok(Json(FinanceController::new(&state).get_transfer(&session, id).await?))
}

pub async fn update_transfer(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(form): Json<TransferForm>,
) -> AppResult<Json<ApiResponse<Transfer>>> {
    Ok(Json(FinanceController::new(&state).update_transfer(&session, id, form).await?))
}

pub async fn delete_transfer(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(FinanceController::new(&state).delete_transfer(&session, id).await?))
}
