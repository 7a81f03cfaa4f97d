//! Proyección del ciclo de vida de una orden
//!
//! Convierte estado, eventos y gastos en datos listos para pintar:
//! progreso, etiquetas/colores/iconos, timeline y resumen financiero.
//! Todo es puro y total; los valores desconocidos caen en un default visible.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::expense::{Expense, ExpenseCategory};
use crate::models::order::OrderStatus;
use crate::models::timeline::{EventType, TimelineEvent};
use crate::models::transfer::{Transfer, TransferStatus, TransferType};
use crate::models::truck::TruckStatus;
use crate::utils::format::{capitalize_first, format_date_time, initials, replace_underscores};

/// Paleta semántica de chips de estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Success,
    Warning,
    Info,
    Error,
    Default,
}

/// Colores del tema para el timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Primary,
    Secondary,
    Info,
    Warning,
    Error,
    Success,
    Grey,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub label: String,
    pub color: StatusColor,
    pub icon: &'static str,
}

impl StatusDisplay {
    fn known(label: &str, color: StatusColor, icon: &'static str) -> Self {
        Self {
            label: label.to_string(),
            color,
            icon,
        }
    }

    /// Valor fuera de tabla: el texto crudo capitalizado y color `default`
    pub fn fallback(raw: &str) -> Self {
        let label = if raw.is_empty() {
            "Unknown".to_string()
        } else {
            capitalize_first(raw)
        };
        Self {
            label,
            color: StatusColor::Default,
            icon: "help_outline",
        }
    }
}

/// Cualquier enum que tenga chip de estado en las vistas
pub trait DisplayStatus {
    fn display(&self) -> StatusDisplay;
}

impl DisplayStatus for OrderStatus {
    fn display(&self) -> StatusDisplay {
        match self {
            OrderStatus::Pending => StatusDisplay::known("Pending", StatusColor::Warning, "schedule"),
            OrderStatus::Assigned => StatusDisplay::known("Assigned", StatusColor::Info, "assignment"),
            OrderStatus::InTransit => {
                StatusDisplay::known("In Transit", StatusColor::Warning, "local_shipping")
            }
            OrderStatus::Delivered => {
                StatusDisplay::known("Delivered", StatusColor::Success, "check_circle")
            }
            OrderStatus::Cancelled => StatusDisplay::known("Cancelled", StatusColor::Error, "cancel"),
            OrderStatus::Unknown(raw) => StatusDisplay::fallback(raw),
        }
    }
}

impl DisplayStatus for TruckStatus {
    fn display(&self) -> StatusDisplay {
        match self {
            TruckStatus::Available => {
                StatusDisplay::known("Available", StatusColor::Success, "check_circle")
            }
            TruckStatus::OnTrip => StatusDisplay::known("On Trip", StatusColor::Info, "warning"),
            TruckStatus::Maintenance => StatusDisplay::known("Maintenance", StatusColor::Error, "build"),
            TruckStatus::OutOfService => {
                StatusDisplay::known("Out of Service", StatusColor::Error, "error")
            }
            TruckStatus::Unknown(raw) => StatusDisplay::fallback(raw),
        }
    }
}

impl DisplayStatus for TransferType {
    fn display(&self) -> StatusDisplay {
        match self {
            TransferType::ToDriver => {
                StatusDisplay::known("To Driver", StatusColor::Success, "trending_down")
            }
            TransferType::ToOwner => {
                StatusDisplay::known("To Owner", StatusColor::Success, "trending_down")
            }
            TransferType::FromDriver => {
                StatusDisplay::known("From Driver", StatusColor::Error, "trending_up")
            }
            TransferType::FromOwner => {
                StatusDisplay::known("From Owner", StatusColor::Error, "trending_up")
            }
            TransferType::Unknown(raw) => StatusDisplay::fallback(raw),
        }
    }
}

impl DisplayStatus for TransferStatus {
    fn display(&self) -> StatusDisplay {
        match self {
            TransferStatus::Pending => StatusDisplay::known("Pending", StatusColor::Warning, "schedule"),
            TransferStatus::Completed => {
                StatusDisplay::known("Completed", StatusColor::Success, "check_circle")
            }
            TransferStatus::Failed => StatusDisplay::known("Failed", StatusColor::Error, "error"),
            TransferStatus::Unknown(raw) => StatusDisplay::fallback(raw),
        }
    }
}

impl DisplayStatus for ExpenseCategory {
    fn display(&self) -> StatusDisplay {
        match self {
            ExpenseCategory::Fuel => {
                StatusDisplay::known("Fuel", StatusColor::Warning, "local_gas_station")
            }
            ExpenseCategory::Toll => StatusDisplay::known("Toll", StatusColor::Info, "toll"),
            ExpenseCategory::Maintenance => {
                StatusDisplay::known("Maintenance", StatusColor::Error, "build")
            }
            ExpenseCategory::Food => StatusDisplay::known("Food", StatusColor::Success, "restaurant"),
            ExpenseCategory::Accommodation => {
                StatusDisplay::known("Accommodation", StatusColor::Info, "hotel")
            }
            ExpenseCategory::Other => StatusDisplay::known("Other", StatusColor::Default, "receipt"),
            ExpenseCategory::Unknown(raw) => StatusDisplay::fallback(raw),
        }
    }
}

/// Chip de usuario activo/inactivo
pub fn activity_display(is_active: bool) -> StatusDisplay {
    if is_active {
        StatusDisplay::known("Active", StatusColor::Success, "check_circle")
    } else {
        StatusDisplay::known("Inactive", StatusColor::Error, "block")
    }
}

/// Progreso de la orden en porcentaje
pub fn progress_percent(status: &OrderStatus) -> u8 {
    match status {
        OrderStatus::Pending => 0,
        OrderStatus::Assigned => 25,
        OrderStatus::InTransit => 75,
        OrderStatus::Delivered => 100,
        OrderStatus::Cancelled => 0,
        OrderStatus::Unknown(_) => 0,
    }
}

/// Acciones de estado que la UI ofrece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    MarkInTransit,
    MarkDelivered,
}

impl StatusAction {
    pub fn target(&self) -> OrderStatus {
        match self {
            StatusAction::MarkInTransit => OrderStatus::InTransit,
            StatusAction::MarkDelivered => OrderStatus::Delivered,
        }
    }
}

/// Los estados terminales no ofrecen acciones; el resto ofrece ambas sin comprobar
/// la transición (la legalidad la decide la API)
pub fn available_actions(status: &OrderStatus) -> Vec<StatusAction> {
    if status.is_terminal() {
        Vec::new()
    } else {
        vec![StatusAction::MarkInTransit, StatusAction::MarkDelivered]
    }
}

/// Elemento del timeline listo para pintar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineItem {
    pub id: i64,
    pub event_type: String,
    pub title: String,
    pub chip_label: String,
    pub description: String,
    pub icon: &'static str,
    pub color: ThemeColor,
    pub chip_color: ThemeColor,
    pub created_at: String,
    pub actor_name: Option<String>,
    pub actor_initials: Option<String>,
    /// Primer elemento: elevación extra
    pub emphasized: bool,
    /// Todos menos el último llevan conector
    pub has_connector: bool,
}

fn event_icon(event_type: &EventType) -> &'static str {
    match event_type {
        EventType::OrderCreated => "assignment",
        EventType::OrderAssigned => "person",
        EventType::OrderStatusChanged => "check_circle",
        EventType::ExpenseAdded => "receipt",
        EventType::MoneyTransferred => "payment",
        EventType::DocumentUploaded => "description",
        EventType::TripStarted => "local_shipping",
        EventType::TripCompleted => "check_circle",
        EventType::Other(_) => "assignment",
    }
}

fn event_color(event_type: &EventType) -> ThemeColor {
    match event_type {
        EventType::OrderCreated => ThemeColor::Primary,
        EventType::OrderAssigned => ThemeColor::Info,
        EventType::OrderStatusChanged => ThemeColor::Warning,
        EventType::ExpenseAdded => ThemeColor::Error,
        EventType::MoneyTransferred => ThemeColor::Success,
        EventType::DocumentUploaded => ThemeColor::Secondary,
        EventType::TripStarted => ThemeColor::Info,
        EventType::TripCompleted => ThemeColor::Success,
        EventType::Other(_) => ThemeColor::Grey,
    }
}

/// El chip usa la misma tabla salvo el fallback, que es `default` y no gris
fn chip_color(event_type: &EventType) -> ThemeColor {
    match event_type {
        EventType::Other(_) => ThemeColor::Default,
        known => event_color(known),
    }
}

/// Título del evento; un `title` no vacío de la API tiene prioridad
pub fn event_title(event_type: &EventType, title: Option<&str>) -> String {
    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        return title.to_string();
    }

    match event_type {
        EventType::OrderCreated => "Order Created".to_string(),
        EventType::OrderAssigned => "Order Assigned".to_string(),
        EventType::OrderStatusChanged => "Status Changed".to_string(),
        EventType::ExpenseAdded => "Expense Added".to_string(),
        EventType::MoneyTransferred => "Money Transferred".to_string(),
        EventType::DocumentUploaded => "Document Uploaded".to_string(),
        EventType::TripStarted => "Trip Started".to_string(),
        EventType::TripCompleted => "Trip Completed".to_string(),
        EventType::Other(raw) => replace_underscores(raw).to_uppercase(),
    }
}

/// Proyección 1:1 del timeline, respetando el orden recibido
pub fn project_timeline(events: &[TimelineEvent]) -> Vec<TimelineItem> {
    let last = events.len().saturating_sub(1);

    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let actor = event.created_by_detail.as_ref();
            TimelineItem {
                id: event.id,
                event_type: event.event_type.as_str().to_string(),
                title: event_title(&event.event_type, event.title.as_deref()),
                chip_label: replace_underscores(event.event_type.as_str()),
                description: event.description.clone(),
                icon: event_icon(&event.event_type),
                color: event_color(&event.event_type),
                chip_color: chip_color(&event.event_type),
                created_at: format_date_time(Some(&event.created_at)),
                actor_name: actor.map(|a| format!("{} {}", a.first_name, a.last_name).trim().to_string()),
                actor_initials: actor.map(|a| initials(&a.first_name, "")),
                emphasized: index == 0,
                has_connector: index < last,
            }
        })
        .collect()
}

/// Resumen de ingresos y gastos de una orden
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub profit_margin_percent: Decimal,
    pub expense_count: usize,
    pub is_profitable: bool,
    /// Anticipo y saldo pendiente; solo cuando se conoce el anticipo de la orden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
}

impl FinancialSummary {
    pub fn with_advance(mut self, advance: Decimal) -> Self {
        self.advance = Some(advance);
        self.balance = Some(self.total_revenue - advance);
        self
    }
}

/// Suma exacta en decimal de los gastos
pub fn total_expenses(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|expense| expense.amount).sum()
}

pub fn financial_summary(total_amount: Decimal, expenses: &[Expense]) -> FinancialSummary {
    let total_expenses = total_expenses(expenses);
    let net_profit = total_amount - total_expenses;
    let profit_margin_percent = if total_amount > Decimal::ZERO {
        (net_profit / total_amount * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    FinancialSummary {
        total_revenue: total_amount,
        total_expenses,
        net_profit,
        profit_margin_percent,
        expense_count: expenses.len(),
        is_profitable: net_profit >= Decimal::ZERO,
        advance: None,
        balance: None,
    }
}

/// Totales por categoría, en orden estable
pub fn expenses_by_category(expenses: &[Expense]) -> BTreeMap<ExpenseCategory, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(Decimal::ZERO) += expense.amount;
    }
    totals
}

/// Totales de transferencias por dirección
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferTotals {
    pub to_driver: Decimal,
    pub from_driver: Decimal,
    pub to_owner: Decimal,
    pub from_owner: Decimal,
    pub total_in: Decimal,
    pub total_out: Decimal,
}

pub fn transfer_totals(transfers: &[Transfer]) -> TransferTotals {
    let mut totals = TransferTotals::default();
    for transfer in transfers {
        let amount = transfer.amount;
        match transfer.transfer_type {
            TransferType::ToDriver => {
                totals.to_driver += amount;
                totals.total_out += amount;
            }
            TransferType::FromDriver => {
                totals.from_driver += amount;
                totals.total_in += amount;
            }
            TransferType::ToOwner => {
                totals.to_owner += amount;
                totals.total_out += amount;
            }
            TransferType::FromOwner => {
                totals.from_owner += amount;
                totals.total_in += amount;
            }
            TransferType::Unknown(_) => {}
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::OrderRef;
    use crate::models::timeline::Actor;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn expense(id: i64, category: ExpenseCategory, amount: &str) -> Expense {
        Expense {
            id,
            order: OrderRef::Id(1),
            category,
            description: String::new(),
            amount: Decimal::from_str(amount).unwrap(),
            date: None,
            added_by: None,
        }
    }

    fn event(id: i64, event_type: &str, title: Option<&str>) -> TimelineEvent {
        TimelineEvent {
            id,
            event_type: EventType::from(event_type),
            title: title.map(str::to_string),
            description: format!("event {}", id),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            created_by_detail: None,
        }
    }

    #[test]
    fn test_progress_lookup() {
        assert_eq!(progress_percent(&OrderStatus::Pending), 0);
        assert_eq!(progress_percent(&OrderStatus::Assigned), 25);
        assert_eq!(progress_percent(&OrderStatus::InTransit), 75);
        assert_eq!(progress_percent(&OrderStatus::Delivered), 100);
        assert_eq!(progress_percent(&OrderStatus::Cancelled), 0);
        assert_eq!(progress_percent(&OrderStatus::from("teleported")), 0);
    }

    #[test]
    fn test_in_transit_display() {
        let display = OrderStatus::InTransit.display();
        assert_eq!(display.label, "In Transit");
        assert_eq!(display.color, StatusColor::Warning);
        assert_eq!(display, OrderStatus::InTransit.display());
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let display = OrderStatus::from("on_hold").display();
        assert_eq!(display.label, "On_hold");
        assert_eq!(display.color, StatusColor::Default);

        assert_eq!(TruckStatus::from("").display().label, "Unknown");
        assert_eq!(TransferType::from("swap").display().color, StatusColor::Default);
        assert_eq!(ExpenseCategory::from("parking").display().label, "Parking");
    }

    #[test]
    fn test_actions_for_terminal_states() {
        assert!(available_actions(&OrderStatus::Delivered).is_empty());
        assert!(available_actions(&OrderStatus::Cancelled).is_empty());
        assert_eq!(
            available_actions(&OrderStatus::Pending),
            vec![StatusAction::MarkInTransit, StatusAction::MarkDelivered]
        );
        assert_eq!(StatusAction::MarkDelivered.target(), OrderStatus::Delivered);
    }

    #[test]
    fn test_financial_summary_example() {
        let expenses = vec![
            expense(1, ExpenseCategory::Fuel, "2500"),
            expense(2, ExpenseCategory::Toll, "1200"),
            expense(3, ExpenseCategory::Food, "800"),
        ];
        let summary = financial_summary(Decimal::from(10000), &expenses);

        assert_eq!(summary.total_expenses, Decimal::from(4500));
        assert_eq!(summary.net_profit, Decimal::from(5500));
        assert_eq!(summary.profit_margin_percent, Decimal::from_str("55.00").unwrap());
        assert_eq!(summary.expense_count, 3);
        assert!(summary.is_profitable);
        assert!(summary.advance.is_none() && summary.balance.is_none());

        let summary = summary.with_advance(Decimal::from(3000));
        assert_eq!(summary.advance, Some(Decimal::from(3000)));
        assert_eq!(summary.balance, Some(Decimal::from(7000)));
        assert_eq!(summary.net_profit, Decimal::from(5500));
    }

    #[test]
    fn test_financial_summary_keeps_cents() {
        let expenses: Vec<Expense> = (0..1000)
            .map(|i| expense(i, ExpenseCategory::Toll, "0.10"))
            .collect();
        let summary = financial_summary(Decimal::ZERO, &expenses);

        assert_eq!(summary.total_expenses, Decimal::from(100));
        assert_eq!(summary.profit_margin_percent, Decimal::ZERO);
        assert!(!summary.is_profitable);
    }

    #[test]
    fn test_expenses_by_category() {
        let expenses = vec![
            expense(1, ExpenseCategory::Fuel, "100.50"),
            expense(2, ExpenseCategory::Fuel, "99.50"),
            expense(3, ExpenseCategory::Food, "40"),
        ];
        let totals = expenses_by_category(&expenses);
        assert_eq!(totals[&ExpenseCategory::Fuel], Decimal::from(200));
        assert_eq!(totals[&ExpenseCategory::Food], Decimal::from(40));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_timeline_projection() {
        let mut created = event(1, "order_created", None);
        created.created_by_detail = Some(Actor {
            id: Some(2),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
        });
        let events = vec![
            created,
            event(2, "custom_milestone", None),
            event(3, "trip_started", Some("Left Mumbai depot")),
        ];

        let items = project_timeline(&events);
        assert_eq!(items.len(), 3);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        assert_eq!(items[0].title, "Order Created");
        assert!(items[0].emphasized);
        assert!(items[0].has_connector);
        assert_eq!(items[0].actor_name.as_deref(), Some("Asha Rao"));
        assert_eq!(items[0].actor_initials.as_deref(), Some("A"));

        assert_eq!(items[1].title, "CUSTOM MILESTONE");
        assert_eq!(items[1].color, ThemeColor::Grey);
        assert_eq!(items[1].chip_color, ThemeColor::Default);
        assert_eq!(items[1].chip_label, "custom milestone");
        assert!(!items[1].emphasized);

        assert_eq!(items[2].title, "Left Mumbai depot");
        assert!(!items[2].has_connector);

        // misma entrada, misma salida
        assert_eq!(project_timeline(&events), items);
    }

    #[test]
    fn test_empty_timeline() {
        assert!(project_timeline(&[]).is_empty());
    }

    #[test]
    fn test_transfer_totals() {
        let transfer = |kind: &str, amount: i64| Transfer {
            id: amount,
            order: OrderRef::Id(1),
            transfer_type: TransferType::from(kind),
            amount: Decimal::from(amount),
            description: String::new(),
            status: TransferStatus::Completed,
            transaction_id: None,
            bank_name: None,
            account_number: None,
            ifsc_code: None,
            created_at: None,
        };
        let totals = transfer_totals(&[
            transfer("to_driver", 1000),
            transfer("from_owner", 5000),
            transfer("to_owner", 300),
            transfer("mystery", 7),
        ]);

        assert_eq!(totals.total_out, Decimal::from(1300));
        assert_eq!(totals.total_in, Decimal::from(5000));
        assert_eq!(totals.to_driver, Decimal::from(1000));
    }
}
