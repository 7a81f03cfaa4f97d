//! Gastos y transferencias de las órdenes

use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::dto::finance_dto::{ExpenseListView, TransferListView};
use crate::dto::ApiResponse;
use crate::models::expense::{Expense, ExpenseForm};
use crate::models::transfer::{Transfer, TransferForm};
use crate::services::listing::{ListQuery, Searchable};
use crate::state::{AppState, Session};
use crate::utils::errors::AppResult;

pub struct FinanceController {
    api: ApiClient,
}

impl FinanceController {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }

    pub async fn list_expenses(&self, session: &Session, query: &ListQuery) -> AppResult<ExpenseListView> {
        let expenses = self.api.list_expenses(&session.access_token, query.order).await?;
        let filtered: Vec<Expense> = expenses.into_iter().filter(|e| e.matches(query)).collect();
        Ok(ExpenseListView::build(filtered, query.page, query.per_page()))
    }

    pub async fn create_expense(&self, session: &Session, form: ExpenseForm) -> AppResult<ApiResponse<Expense>> {
        form.validate()?;
        let expense = self.api.create_expense(&session.access_token, &form).await?;
        info!("🧾 Gasto {} ({}) en la orden {}", expense.id, expense.amount, form.order);
        Ok(ApiResponse::success_with_message(expense, "Expense added successfully"))
    }

    /// Gasto tal cual lo guarda la API, para el formulario de edición
    pub async fn get_expense(&self, session: &Session, id: i64) -> AppResult<Expense> {
        self.api.get_expense(&session.access_token, id).await
    }

    pub async fn update_expense(
        &self,
        session: &Session,
        id: i64,
        form: ExpenseForm,
    ) -> AppResult<ApiResponse<Expense>> {
        form.validate()?;
        let expense = self.api.update_expense(&session.access_token, id, &form).await?;
        info!("🧾 Gasto {} actualizado ({})", expense.id, expense.amount);
        Ok(ApiResponse::success_with_message(expense, "Expense updated successfully"))
    }

    pub async fn delete_expense(&self, session: &Session, id: i64) -> AppResult<ApiResponse<()>> {
        self.api.delete_expense(&session.access_token, id).await?;
        Ok(ApiResponse::message("Expense deleted successfully"))
    }

    pub async fn list_transfers(&self, session: &Session, query: &ListQuery) -> AppResult<TransferListView> {
        let transfers = self.api.list_transfers(&session.access_token, query.order).await?;
        let filtered: Vec<Transfer> = transfers.into_iter().filter(|t| t.matches(query)).collect();
        Ok(TransferListView::build(filtered, query.page, query.per_page()))
    }

    pub async fn create_transfer(&self, session: &Session, form: TransferForm) -> AppResult<ApiResponse<Transfer>> {
        form.validate()?;
        let transfer = self.api.create_transfer(&session.access_token, &form).await?;
        info!(
            "💸 Transferencia {} ({}) en la orden {}",
            transfer.transfer_type.as_str(),
            transfer.amount,
            form.order
        );
        Ok(ApiResponse::success_with_message(transfer, "Transfer recorded successfully"))
    }

    pub async fn get_transfer(&self, session: &Session, id: i64) -> AppResult<Transfer> {
        self.api.get_transfer(&session.access_token, id).await
    }

    pub async fn update_transfer(
        &self,
        session: &Session,
        id: i64,
        form: TransferForm,
    ) -> AppResult<ApiResponse<Transfer>> {
        form.validate()?;
        let transfer = self.api.update_transfer(&session.access_token, id, &form).await?;
        Ok(ApiResponse::success_with_message(transfer, "Transfer updated successfully"))
    }

    pub async fn delete_transfer(&self, session: &Session, id: i64) -> AppResult<ApiResponse<()>> {
        self.api.delete_transfer(&session.access_token, id).await?;
        Ok(ApiResponse::message("Transfer deleted successfully"))
    }
}
