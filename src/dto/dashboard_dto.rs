//! DTOs de los dashboards por rol

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::dto::finance_dto::ExpenseRow;
use crate::dto::order_dto::OrderRow;

/// Importe con su versión formateada
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Money {
    pub amount: Decimal,
    pub display: String,
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self {
            amount,
            display: crate::utils::format::format_currency(amount),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub total_users: usize,
    pub total_trucks: usize,
    pub total_orders: i64,
    pub active_orders: i64,
    pub total_revenue: Money,
    pub pending_amount: Money,
    pub total_expenses: Money,
    pub total_profit: Money,
    pub recent_orders: Vec<OrderRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusShare {
    pub count: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerDashboard {
    pub total_trucks: usize,
    pub available_trucks: usize,
    pub total_orders: usize,
    pub active_orders: usize,
    pub completed_orders: usize,
    /// Porcentaje de órdenes completadas sobre el total
    pub completion_rate: u8,
    pub total_revenue: Money,
    /// Camiones por estado (`available`, `on_trip`, ...) con su peso en la flota
    pub truck_status: BTreeMap<String, StatusShare>,
    pub in_transit_orders: Vec<OrderRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverDashboard {
    pub assigned_orders: usize,
    pub completed_orders: usize,
    pub expense_count: usize,
    pub total_expenses: Money,
    /// Solo cuando la API calcula las ganancias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Money>,
    pub current_orders: Vec<OrderRow>,
    pub recent_expenses: Vec<ExpenseRow>,
}
