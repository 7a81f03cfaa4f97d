//! DTOs de camiones

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::truck::Truck;
use crate::services::lifecycle::{DisplayStatus, StatusDisplay};
use crate::utils::format::{format_date, is_expired, is_expiring_soon, NOT_AVAILABLE};

/// Estado de un documento con vencimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryState {
    Valid,
    ExpiringSoon,
    Expired,
    Missing,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentExpiry {
    pub document: &'static str,
    pub date: String,
    pub state: ExpiryState,
}

fn expiry_state(date: Option<&NaiveDate>, today: NaiveDate) -> ExpiryState {
    if date.is_none() {
        ExpiryState::Missing
    } else if is_expired(date, today) {
        ExpiryState::Expired
    } else if is_expiring_soon(date, today) {
        ExpiryState::ExpiringSoon
    } else {
        ExpiryState::Valid
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TruckRow {
    pub id: i64,
    pub truck_number: String,
    pub vehicle: String,
    pub year: String,
    pub status: String,
    pub status_display: StatusDisplay,
    pub owner: i64,
    pub assigned_driver: Option<i64>,
    pub documents: Vec<DocumentExpiry>,
    /// Algún documento vencido o por vencer
    pub needs_attention: bool,
    pub detail_path: String,
}

impl TruckRow {
    pub fn new(truck: &Truck, prefix: &str, today: NaiveDate) -> Self {
        let documents: Vec<DocumentExpiry> = truck
            .document_expiries()
            .into_iter()
            .map(|(document, date)| DocumentExpiry {
                document,
                date: format_date(date),
                state: expiry_state(date, today),
            })
            .collect();
        let needs_attention = documents
            .iter()
            .any(|doc| matches!(doc.state, ExpiryState::Expired | ExpiryState::ExpiringSoon));

        Self {
            id: truck.id,
            truck_number: truck.truck_number.clone(),
            vehicle: format!("{} {}", truck.make, truck.model).trim().to_string(),
            year: truck
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: truck.status.as_str().to_string(),
            status_display: truck.status.display(),
            owner: truck.owner,
            assigned_driver: truck.assigned_driver,
            documents,
            needs_attention,
            detail_path: format!("{}/trucks/{}", prefix, truck.id),
        }
    }
}
