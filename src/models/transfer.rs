//! Modelo de Transfer
//!
//! Transferencias de dinero entre administración, propietarios y conductores.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::expense::OrderRef;
use crate::utils::validation::{validate_min_amount, validate_not_empty};

/// Dirección de la transferencia
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferType {
    ToDriver,
    FromDriver,
    ToOwner,
    FromOwner,
    Unknown(String),
}

impl TransferType {
    pub fn as_str(&self) -> &str {
        match self {
            TransferType::ToDriver => "to_driver",
            TransferType::FromDriver => "from_driver",
            TransferType::ToOwner => "to_owner",
            TransferType::FromOwner => "from_owner",
            TransferType::Unknown(raw) => raw,
        }
    }

    /// Dinero que sale de la empresa
    pub fn is_outgoing(&self) -> bool {
        matches!(self, TransferType::ToDriver | TransferType::ToOwner)
    }
}

impl From<&str> for TransferType {
    fn from(value: &str) -> Self {
        match value {
            "to_driver" => TransferType::ToDriver,
            "from_driver" => TransferType::FromDriver,
            "to_owner" => TransferType::ToOwner,
            "from_owner" => TransferType::FromOwner,
            other => TransferType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for TransferType {
    fn from(value: String) -> Self {
        TransferType::from(value.as_str())
    }
}

impl From<TransferType> for String {
    fn from(transfer_type: TransferType) -> Self {
        transfer_type.as_str().to_string()
    }
}

/// Estado de la transferencia
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferStatus {
    Pending,
    Completed,
    Failed,
    Unknown(String),
}

impl TransferStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Completed => "completed",
            TransferStatus::Failed => "failed",
            TransferStatus::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for TransferStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => TransferStatus::Pending,
            "completed" => TransferStatus::Completed,
            "failed" => TransferStatus::Failed,
            other => TransferStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for TransferStatus {
    fn from(value: String) -> Self {
        TransferStatus::from(value.as_str())
    }
}

impl From<TransferStatus> for String {
    fn from(status: TransferStatus) -> Self {
        status.as_str().to_string()
    }
}

fn default_transfer_status() -> TransferStatus {
    TransferStatus::Pending
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    pub order: OrderRef,
    pub transfer_type: TransferType,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_transfer_status")]
    pub status: TransferStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Formulario de transferencia
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransferForm {
    pub transfer_type: TransferType,
    #[validate(custom = "validate_min_amount")]
    pub amount: Decimal,
    #[validate(custom = "validate_not_empty")]
    pub description: String,
    pub order: i64,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_defaults() {
        let transfer: Transfer = serde_json::from_value(serde_json::json!({
            "id": 5,
            "order": 7,
            "transfer_type": "to_driver",
            "amount": "1500.00"
        }))
        .unwrap();

        assert_eq!(transfer.status, TransferStatus::Pending);
        assert!(transfer.transfer_type.is_outgoing());
        assert!(!TransferType::FromOwner.is_outgoing());
    }

    #[test]
    fn test_transfer_form_rejects_zero() {
        let form = TransferForm {
            transfer_type: TransferType::ToDriver,
            amount: Decimal::ZERO,
            description: "Advance for tolls".to_string(),
            order: 7,
            transaction_id: None,
            bank_name: None,
            account_number: None,
            ifsc_code: None,
        };
        assert!(form.validate().is_err());
    }
}
