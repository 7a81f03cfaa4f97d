//! Agregados de los dashboards
//!
//! Funciones puras sobre los datos ya descargados; los controllers
//! se encargan de pedirlos a la API.

use std::collections::BTreeMap;

use crate::dto::dashboard_dto::{AdminDashboard, DriverDashboard, Money, OwnerDashboard, StatusShare};
use crate::dto::finance_dto::ExpenseRow;
use crate::dto::order_dto::OrderRow;
use crate::models::dashboard::DashboardStats;
use crate::models::expense::Expense;
use crate::models::order::{Order, OrderStatus};
use crate::models::truck::{Truck, TruckStatus};
use crate::models::user::User;
use crate::services::lifecycle::total_expenses;
use crate::utils::format::calculate_percentage;

pub const RECENT_LIMIT: usize = 5;
pub const DRIVER_CURRENT_LIMIT: usize = 3;

pub fn admin_dashboard(users: &[User], trucks: &[Truck], stats: &DashboardStats) -> AdminDashboard {
    AdminDashboard {
        total_users: users.len(),
        total_trucks: trucks.len(),
        total_orders: stats.total_orders,
        active_orders: stats.active_orders,
        total_revenue: Money::from(stats.total_revenue),
        pending_amount: Money::from(stats.pending_amount),
        total_expenses: Money::from(stats.total_expenses),
        total_profit: Money::from(stats.total_profit),
        recent_orders: stats
            .recent_orders
            .iter()
            .take(RECENT_LIMIT)
            .map(|order| OrderRow::new(order, "/admin"))
            .collect(),
    }
}

pub fn owner_dashboard(trucks: &[Truck], orders: &[Order], stats: &DashboardStats) -> OwnerDashboard {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for truck in trucks {
        *counts.entry(truck.status.as_str().to_string()).or_default() += 1;
    }
    let truck_status = counts
        .into_iter()
        .map(|(status, count)| {
            let share = StatusShare {
                count,
                percent: calculate_percentage(count, trucks.len()),
            };
            (status, share)
        })
        .collect();

    let active_orders = orders.iter().filter(|order| order.is_active()).count();
    let completed_orders = orders.len() - active_orders;

    OwnerDashboard {
        total_trucks: trucks.len(),
        available_trucks: trucks
            .iter()
            .filter(|truck| truck.status == TruckStatus::Available)
            .count(),
        total_orders: orders.len(),
        active_orders,
        completed_orders,
        completion_rate: calculate_percentage(completed_orders, orders.len()),
        total_revenue: Money::from(stats.total_revenue),
        truck_status,
        in_transit_orders: orders
            .iter()
            .filter(|order| order.status == OrderStatus::InTransit)
            .map(|order| OrderRow::new(order, "/owner"))
            .collect(),
    }
}

/// Las ganancias del conductor solo se muestran si la API las manda
pub fn driver_dashboard(orders: &[Order], expenses: &[Expense], stats: &DashboardStats) -> DriverDashboard {
    let current: Vec<&Order> = orders.iter().filter(|order| order.is_active()).collect();

    DriverDashboard {
        assigned_orders: current.len(),
        completed_orders: orders
            .iter()
            .filter(|order| order.status == OrderStatus::Delivered)
            .count(),
        expense_count: expenses.len(),
        total_expenses: Money::from(total_expenses(expenses)),
        earnings: stats.driver_earnings.map(Money::from),
        current_orders: current
            .into_iter()
            .take(DRIVER_CURRENT_LIMIT)
            .map(|order| OrderRow::new(order, "/driver"))
            .collect(),
        recent_expenses: expenses.iter().take(RECENT_LIMIT).map(ExpenseRow::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order(id: i64, status: &str) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "order_number": format!("TRANS{}", id),
            "status": status,
            "total_amount": "5000",
            "owner": 3
        }))
        .unwrap()
    }

    fn truck(id: i64, status: &str) -> Truck {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "truck_number": format!("MH12AB{:04}", id),
            "status": status,
            "owner": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_owner_counts() {
        let trucks = vec![truck(1, "available"), truck(2, "on_trip"), truck(3, "available")];
        let orders = vec![
            order(1, "in_transit"),
            order(2, "delivered"),
            order(3, "pending"),
            order(4, "cancelled"),
        ];
        let dashboard = owner_dashboard(&trucks, &orders, &DashboardStats::default());

        assert_eq!(dashboard.available_trucks, 2);
        assert_eq!(dashboard.truck_status["available"], StatusShare { count: 2, percent: 67 });
        assert_eq!(dashboard.truck_status["on_trip"], StatusShare { count: 1, percent: 33 });
        assert_eq!(dashboard.active_orders, 2);
        assert_eq!(dashboard.completed_orders, 2);
        assert_eq!(dashboard.completion_rate, 50);
        assert_eq!(dashboard.in_transit_orders.len(), 1);
    }

    #[test]
    fn test_owner_rates_without_data() {
        let dashboard = owner_dashboard(&[], &[], &DashboardStats::default());

        assert_eq!(dashboard.completion_rate, 0);
        assert!(dashboard.truck_status.is_empty());

        let orders = vec![order(1, "delivered"), order(2, "delivered"), order(3, "assigned")];
        let dashboard = owner_dashboard(&[truck(1, "maintenance")], &orders, &DashboardStats::default());
        assert_eq!(dashboard.completion_rate, 67);
        assert_eq!(dashboard.truck_status["maintenance"].percent, 100);
    }

    #[test]
    fn test_driver_earnings_only_from_api() {
        let orders = vec![
            order(1, "assigned"),
            order(2, "in_transit"),
            order(3, "pending"),
            order(4, "assigned"),
            order(5, "delivered"),
        ];
        let dashboard = driver_dashboard(&orders, &[], &DashboardStats::default());

        assert_eq!(dashboard.assigned_orders, 4);
        assert_eq!(dashboard.completed_orders, 1);
        assert_eq!(dashboard.current_orders.len(), 3);
        assert!(dashboard.earnings.is_none());

        let stats = DashboardStats {
            driver_earnings: Some(Decimal::from(1800)),
            ..Default::default()
        };
        let dashboard = driver_dashboard(&orders, &[], &stats);
        assert_eq!(dashboard.earnings.unwrap().display, "₹1,800.00");
    }

    #[test]
    fn test_admin_uses_stats_defaults() {
        let dashboard = admin_dashboard(&[], &[truck(1, "maintenance")], &DashboardStats::default());
        assert_eq!(dashboard.total_trucks, 1);
        assert_eq!(dashboard.total_orders, 0);
        assert_eq!(dashboard.total_revenue.display, "₹0.00");
    }
}
