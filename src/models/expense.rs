//! Modelo de Expense
//!
//! Gastos asociados a una orden (combustible, peajes...).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_min_amount, validate_not_empty};

/// Categoría del gasto
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseCategory {
    Fuel,
    Toll,
    Maintenance,
    Food,
    Accommodation,
    Other,
    Unknown(String),
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ExpenseCategory::Fuel => "fuel",
            ExpenseCategory::Toll => "toll",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Other => "other",
            ExpenseCategory::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for ExpenseCategory {
    fn from(value: &str) -> Self {
        match value {
            "fuel" => ExpenseCategory::Fuel,
            "toll" => ExpenseCategory::Toll,
            "maintenance" => ExpenseCategory::Maintenance,
            "food" => ExpenseCategory::Food,
            "accommodation" => ExpenseCategory::Accommodation,
            "other" => ExpenseCategory::Other,
            other => ExpenseCategory::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ExpenseCategory {
    fn from(value: String) -> Self {
        ExpenseCategory::from(value.as_str())
    }
}

impl From<ExpenseCategory> for String {
    fn from(category: ExpenseCategory) -> Self {
        category.as_str().to_string()
    }
}

/// Referencia a la orden: la API la manda como id o como objeto resumido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderRef {
    Id(i64),
    Summary {
        id: i64,
        #[serde(default)]
        order_number: Option<String>,
    },
}

impl OrderRef {
    pub fn id(&self) -> i64 {
        match self {
            OrderRef::Id(id) => *id,
            OrderRef::Summary { id, .. } => *id,
        }
    }

    pub fn order_number(&self) -> Option<&str> {
        match self {
            OrderRef::Id(_) => None,
            OrderRef::Summary { order_number, .. } => order_number.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub order: OrderRef,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub added_by: Option<i64>,
}

impl Expense {
    /// Número de orden si la API lo incluyó (embebido o plano)
    pub fn order_number(&self) -> Option<&str> {
        self.order.order_number()
    }
}

/// Formulario de gasto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseForm {
    pub category: ExpenseCategory,
    #[validate(custom = "validate_not_empty")]
    pub description: String,
    #[validate(custom = "validate_min_amount")]
    pub amount: Decimal,
    pub order: i64,
}
