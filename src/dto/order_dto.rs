//! DTOs de órdenes: fila de listado y ficha completa

use rust_decimal::Decimal;
use serde::Serialize;

use crate::dto::finance_dto::{category_totals, CategoryTotal, ExpenseRow, TransferRow};
use crate::models::expense::Expense;
use crate::models::order::{Order, OrderStatus};
use crate::models::timeline::TimelineEvent;
use crate::models::transfer::Transfer;
use crate::services::lifecycle::{
    available_actions, financial_summary, progress_percent, project_timeline, transfer_totals,
    DisplayStatus, FinancialSummary, StatusAction, StatusDisplay, TimelineItem, TransferTotals,
};
use crate::utils::format::{format_currency, format_date, truncate_text};

#[derive(Debug, Clone, Serialize)]
pub struct OrderRow {
    pub id: i64,
    pub order_number: String,
    pub route: String,
    pub load_type: String,
    pub status: String,
    pub status_display: StatusDisplay,
    pub progress: u8,
    pub total_amount: Decimal,
    pub total_amount_display: String,
    pub pickup_date: String,
    pub detail_path: String,
}

impl OrderRow {
    /// `prefix` es el subárbol del rol (`/admin`, `/owner`, `/driver`)
    pub fn new(order: &Order, prefix: &str) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number.clone(),
            route: format!(
                "{} → {}",
                truncate_text(&order.pickup_location, 30),
                truncate_text(&order.delivery_location, 30)
            ),
            load_type: order.load_type.clone().unwrap_or_default(),
            status: order.status.as_str().to_string(),
            status_display: order.status.display(),
            progress: progress_percent(&order.status),
            total_amount: order.total_amount,
            total_amount_display: format_currency(order.total_amount),
            pickup_date: format_date(order.pickup_date.map(|d| d.date_naive()).as_ref()),
            detail_path: format!("{}/orders/{}", prefix, order.id),
        }
    }
}

/// Acción ofrecida y el estado que hay que mandar para ejecutarla
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionView {
    pub action: StatusAction,
    pub status: OrderStatus,
}

impl From<StatusAction> for ActionView {
    fn from(action: StatusAction) -> Self {
        Self {
            action,
            status: action.target(),
        }
    }
}

/// Ficha de la orden con timeline y finanzas
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailView {
    pub order: Order,
    pub status_display: StatusDisplay,
    pub progress: u8,
    pub actions: Vec<ActionView>,
    pub balance: Decimal,
    pub balance_display: String,
    pub financial: FinancialSummary,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub transfer_totals: TransferTotals,
    pub timeline: Vec<TimelineItem>,
    pub expenses: Vec<ExpenseRow>,
    pub transfers: Vec<TransferRow>,
}

impl OrderDetailView {
    pub fn build(
        order: Order,
        expenses: &[Expense],
        transfers: &[Transfer],
        timeline: &[TimelineEvent],
    ) -> Self {
        let balance = order.balance();

        Self {
            status_display: order.status.display(),
            progress: progress_percent(&order.status),
            actions: available_actions(&order.status)
                .into_iter()
                .map(ActionView::from)
                .collect(),
            balance,
            balance_display: format_currency(balance),
            financial: financial_summary(order.total_amount, expenses).with_advance(order.advance_amount),
            expenses_by_category: category_totals(expenses),
            transfer_totals: transfer_totals(transfers),
            timeline: project_timeline(timeline),
            expenses: expenses.iter().map(ExpenseRow::from).collect(),
            transfers: transfers.iter().map(TransferRow::from).collect(),
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::{ExpenseCategory, OrderRef};
    use crate::services::lifecycle::StatusColor;

    fn order() -> Order {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "order_number": "TRANS424242",
            "status": "in_transit",
            "pickup_location": "Mumbai",
            "delivery_location": "Pune",
            "total_amount": "10000.00",
            "advance_amount": "3000.00",
            "owner": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_order_row_projection() {
        let row = OrderRow::new(&order(), "/driver");
        assert_eq!(row.progress, 75);
        assert_eq!(row.status_display.label, "In Transit");
        assert_eq!(row.status_display.color, StatusColor::Warning);
        assert_eq!(row.route, "Mumbai → Pune");
        assert_eq!(row.detail_path, "/driver/orders/42");
        assert_eq!(row.total_amount_display, "₹10,000.00");
        assert_eq!(row.pickup_date, "N/A");
    }

    #[test]
    fn test_detail_view_derives_balance_and_totals() {
        let expenses = vec![Expense {
            id: 1,
            order: OrderRef::Id(42),
            category: ExpenseCategory::Fuel,
            description: "Diesel".to_string(),
            amount: Decimal::from(2500),
            date: None,
            added_by: None,
        }];
        let view = OrderDetailView::build(order(), &expenses, &[], &[]);

        assert_eq!(view.balance, Decimal::from(7000));
        assert_eq!(view.financial.net_profit, Decimal::from(7500));
        assert_eq!(view.financial.balance, Some(view.balance));
        assert_eq!(view.expenses_by_category.len(), 1);
        assert_eq!(view.expenses_by_category[0].label, "Fuel");
        assert_eq!(view.actions.len(), 2);
        assert_eq!(view.actions[1].action, StatusAction::MarkDelivered);
        assert_eq!(view.actions[1].status, OrderStatus::Delivered);
        assert!(view.timeline.is_empty());
    }
}
