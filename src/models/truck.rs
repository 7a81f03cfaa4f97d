//! Modelo de Truck
//!
//! Camiones de la flota con sus documentos (RC, seguro, contaminación).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{
    validate_capacity, validate_not_empty, validate_not_expired, validate_truck_number,
    validate_truck_year,
};

/// Estado del camión
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TruckStatus {
    Available,
    OnTrip,
    Maintenance,
    OutOfService,
    Unknown(String),
}

impl TruckStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TruckStatus::Available => "available",
            TruckStatus::OnTrip => "on_trip",
            TruckStatus::Maintenance => "maintenance",
            TruckStatus::OutOfService => "out_of_service",
            TruckStatus::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for TruckStatus {
    fn from(value: &str) -> Self {
        match value {
            "available" => TruckStatus::Available,
            "on_trip" => TruckStatus::OnTrip,
            "maintenance" => TruckStatus::Maintenance,
            "out_of_service" => TruckStatus::OutOfService,
            other => TruckStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for TruckStatus {
    fn from(value: String) -> Self {
        TruckStatus::from(value.as_str())
    }
}

impl From<TruckStatus> for String {
    fn from(status: TruckStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: i64,
    pub truck_number: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub axle_count: Option<i32>,
    #[serde(default)]
    pub capacity: Option<Decimal>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    pub status: TruckStatus,
    pub owner: i64,
    #[serde(default)]
    pub assigned_driver: Option<i64>,
    #[serde(default)]
    pub current_mileage: Option<Decimal>,
    #[serde(default)]
    pub rc_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub insurance_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub pollution_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Truck {
    /// Vencimientos de documentos etiquetados, en el orden de la ficha
    pub fn document_expiries(&self) -> [(&'static str, Option<&NaiveDate>); 3] {
        [
            ("RC", self.rc_expiry.as_ref()),
            ("Insurance", self.insurance_expiry.as_ref()),
            ("Pollution", self.pollution_expiry.as_ref()),
        ]
    }
}

/// Formulario de camión
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_truck_form", skip_on_field_errors = false))]
pub struct TruckForm {
    #[validate(custom = "validate_truck_number")]
    pub truck_number: String,
    #[validate(custom = "validate_not_empty")]
    pub model: String,
    #[validate(custom = "validate_not_empty")]
    pub make: String,
    pub year: i32,
    #[validate(range(min = 2, max = 12, message = "Axle count must be between 2 and 12"))]
    pub axle_count: i32,
    #[validate(custom = "validate_capacity")]
    pub capacity: Decimal,
    #[validate(custom = "validate_not_empty")]
    pub fuel_type: String,
    #[validate(custom = "validate_not_expired")]
    pub rc_expiry: NaiveDate,
    #[validate(custom = "validate_not_expired")]
    pub insurance_expiry: NaiveDate,
    #[validate(custom = "validate_not_expired")]
    pub pollution_expiry: NaiveDate,
    pub owner: i64,
    #[serde(default)]
    pub status: Option<TruckStatus>,
}

fn validate_truck_form(form: &TruckForm) -> Result<(), ValidationError> {
    validate_truck_year(form.year)
}

/// Body de `/trucks/{id}/assign_driver/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn sample_form() -> TruckForm {
        let next_year = Utc::now().date_naive() + chrono::Duration::days(365);
        TruckForm {
            truck_number: "MH01AB1234".to_string(),
            model: "Prima".to_string(),
            make: "Tata".to_string(),
            year: Utc::now().year() - 2,
            axle_count: 3,
            capacity: Decimal::from(25),
            fuel_type: "Diesel".to_string(),
            rc_expiry: next_year,
            insurance_expiry: next_year,
            pollution_expiry: next_year,
            owner: 3,
            status: None,
        }
    }

    #[test]
    fn test_truck_form_rules() {
        assert!(sample_form().validate().is_ok());

        let bad_axles = TruckForm { axle_count: 14, ..sample_form() };
        assert!(bad_axles.validate().is_err());

        let old = TruckForm { year: 1995, ..sample_form() };
        assert!(old.validate().is_err());

        let lapsed = TruckForm {
            insurance_expiry: Utc::now().date_naive() - chrono::Duration::days(3),
            ..sample_form()
        };
        assert!(lapsed.validate().is_err());
    }

    #[test]
    fn test_truck_from_api_json() {
        let truck: Truck = serde_json::from_value(serde_json::json!({
            "id": 9,
            "truck_number": "MH01AB1234",
            "model": "Prima",
            "make": "Tata",
            "status": "on_trip",
            "owner": 3,
            "capacity": "25.00",
            "rc_expiry": "2030-01-31"
        }))
        .unwrap();

        assert_eq!(truck.status, TruckStatus::OnTrip);
        assert_eq!(truck.document_expiries()[0].1.map(|d| d.year()), Some(2030));
    }
}
