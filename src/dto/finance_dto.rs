//! DTOs de gastos y transferencias

use rust_decimal::Decimal;
use serde::Serialize;

use crate::dto::dashboard_dto::Money;
use crate::models::expense::Expense;
use crate::models::transfer::Transfer;
use crate::services::lifecycle::{
    expenses_by_category, total_expenses, transfer_totals, DisplayStatus, StatusDisplay,
    TransferTotals,
};
use crate::services::listing::{paginate, Page};
use crate::utils::format::{format_currency, format_date_time, NOT_AVAILABLE};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub label: String,
    pub amount: Decimal,
    pub amount_display: String,
}

/// Totales por categoría listos para el desglose
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    expenses_by_category(expenses)
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.as_str().to_string(),
            label: category.display().label,
            amount,
            amount_display: format_currency(amount),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub order_id: i64,
    pub order_number: String,
    pub category: StatusDisplay,
    pub description: String,
    pub amount: Decimal,
    pub amount_display: String,
    pub date: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            order_id: expense.order.id(),
            order_number: expense.order_number().unwrap_or(NOT_AVAILABLE).to_string(),
            category: expense.category.display(),
            description: expense.description.clone(),
            amount: expense.amount,
            amount_display: format_currency(expense.amount),
            date: format_date_time(expense.date.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferRow {
    pub id: i64,
    pub order_id: i64,
    pub order_number: String,
    pub transfer_type: StatusDisplay,
    pub status: StatusDisplay,
    pub outgoing: bool,
    pub description: String,
    pub amount: Decimal,
    pub amount_display: String,
    pub transaction_id: String,
    pub created_at: String,
}

impl From<&Transfer> for TransferRow {
    fn from(transfer: &Transfer) -> Self {
        Self {
            id: transfer.id,
            order_id: transfer.order.id(),
            order_number: transfer
                .order
                .order_number()
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            transfer_type: transfer.transfer_type.display(),
            status: transfer.status.display(),
            outgoing: transfer.transfer_type.is_outgoing(),
            description: transfer.description.clone(),
            amount: transfer.amount,
            amount_display: format_currency(transfer.amount),
            transaction_id: transfer
                .transaction_id
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            created_at: format_date_time(transfer.created_at.as_ref()),
        }
    }
}

/// Listado de gastos con sus totales (sobre el filtro completo, no solo la página)
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseListView {
    pub page: Page<ExpenseRow>,
    pub total: Money,
    pub by_category: Vec<CategoryTotal>,
}

impl ExpenseListView {
    pub fn build(filtered: Vec<Expense>, page: usize, per_page: usize) -> Self {
        let total = Money::from(total_expenses(&filtered));
        let by_category = category_totals(&filtered);
        let page = paginate(filtered, page, per_page).map(|expense| ExpenseRow::from(&expense));
        Self {
            page,
            total,
            by_category,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferListView {
    pub page: Page<TransferRow>,
    pub totals: TransferTotals,
}

impl TransferListView {
    pub fn build(filtered: Vec<Transfer>, page: usize, per_page: usize) -> Self {
        let totals = transfer_totals(&filtered);
        let page = paginate(filtered, page, per_page).map(|transfer| TransferRow::from(&transfer));
        Self { page, totals }
    }
}
