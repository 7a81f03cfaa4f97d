//! Eventos del timeline de una orden
//!
//! Registros inmutables creados por la API; el portal solo los lee y proyecta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tipo de evento del timeline
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    OrderCreated,
    OrderAssigned,
    OrderStatusChanged,
    ExpenseAdded,
    MoneyTransferred,
    DocumentUploaded,
    TripStarted,
    TripCompleted,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::OrderCreated => "order_created",
            EventType::OrderAssigned => "order_assigned",
            EventType::OrderStatusChanged => "order_status_changed",
            EventType::ExpenseAdded => "expense_added",
            EventType::MoneyTransferred => "money_transferred",
            EventType::DocumentUploaded => "document_uploaded",
            EventType::TripStarted => "trip_started",
            EventType::TripCompleted => "trip_completed",
            EventType::Other(raw) => raw,
        }
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value {
            "order_created" => EventType::OrderCreated,
            "order_assigned" => EventType::OrderAssigned,
            "order_status_changed" => EventType::OrderStatusChanged,
            "expense_added" => EventType::ExpenseAdded,
            "money_transferred" => EventType::MoneyTransferred,
            "document_uploaded" => EventType::DocumentUploaded,
            "trip_started" => EventType::TripStarted,
            "trip_completed" => EventType::TripCompleted,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        EventType::from(value.as_str())
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.as_str().to_string()
    }
}

/// Autor del evento (`created_by_detail`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: i64,
    pub event_type: EventType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by_detail: Option<Actor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_api_json() {
        let event: TimelineEvent = serde_json::from_value(serde_json::json!({
            "id": 11,
            "event_type": "custom_milestone",
            "description": "Crossed the state border",
            "created_at": "2024-01-15T09:30:00Z"
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::Other("custom_milestone".to_string()));
        assert!(event.title.is_none());
        assert!(event.created_by_detail.is_none());
    }
}
