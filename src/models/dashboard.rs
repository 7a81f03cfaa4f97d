//! Estadísticas de `/api/transport/dashboard/stats/`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;
use crate::models::order::Order;

/// Resumen agregado calculado por la API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub active_orders: i64,
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub pending_amount: Decimal,
    #[serde(default)]
    pub total_expenses: Decimal,
    #[serde(default)]
    pub total_profit: Decimal,
    /// Ganancias del conductor; solo si la API las calcula
    #[serde(default)]
    pub driver_earnings: Option<Decimal>,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
    #[serde(default)]
    pub upcoming_deliveries: Vec<Order>,
    #[serde(default)]
    pub recent_expenses: Vec<Expense>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats_default_to_zero() {
        let stats: DashboardStats =
            serde_json::from_value(serde_json::json!({ "total_orders": 4 })).unwrap();
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert!(stats.driver_earnings.is_none());
        assert!(stats.recent_orders.is_empty());
    }
}
