//! Búsqueda, filtros y paginación de listados
//!
//! La API devuelve listas completas; el portal filtra y pagina localmente.

use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;
use crate::models::order::Order;
use crate::models::transfer::Transfer;
use crate::models::truck::Truck;
use crate::models::user::User;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Filtros de un listado (query string)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub transfer_type: Option<String>,
    pub order: Option<i64>,
    pub owner: Option<i64>,
    #[serde(default)]
    pub page: usize,
    pub per_page: Option<usize>,
}

impl ListQuery {
    /// Tamaño de página; valores fuera de las opciones vuelven al default
    pub fn per_page(&self) -> usize {
        match self.per_page {
            Some(size) if PER_PAGE_OPTIONS.contains(&size) => size,
            _ => DEFAULT_PER_PAGE,
        }
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// `None`, vacío o `"all"` aceptan cualquier valor
fn filter_matches(filter: Option<&str>, value: &str) -> bool {
    match filter.map(str::trim) {
        None | Some("") | Some("all") => true,
        Some(expected) => expected == value,
    }
}

fn id_matches(filter: Option<i64>, value: i64) -> bool {
    filter.map_or(true, |expected| expected == value)
}

/// Entidad listable con búsqueda por texto y filtros propios
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches_filters(&self, _query: &ListQuery) -> bool {
        true
    }

    fn matches(&self, query: &ListQuery) -> bool {
        let text_ok = match query.search_term() {
            Some(term) => self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        };
        text_ok && self.matches_filters(query)
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.order_number.as_str(),
            self.pickup_location.as_str(),
            self.delivery_location.as_str(),
        ];
        if let Some(load_type) = self.load_type.as_deref() {
            fields.push(load_type);
        }
        fields
    }

    fn matches_filters(&self, query: &ListQuery) -> bool {
        filter_matches(query.status.as_deref(), self.status.as_str())
            && id_matches(query.owner, self.owner)
    }
}

impl Searchable for Truck {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.truck_number.as_str(), self.model.as_str(), self.make.as_str()]
    }

    fn matches_filters(&self, query: &ListQuery) -> bool {
        filter_matches(query.status.as_deref(), self.status.as_str())
            && id_matches(query.owner, self.owner)
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.email.as_str(), self.first_name.as_str(), self.last_name.as_str()]
    }

    fn matches_filters(&self, query: &ListQuery) -> bool {
        filter_matches(query.status.as_deref(), self.role.as_str())
    }
}

impl Searchable for Expense {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str()];
        if let Some(number) = self.order_number() {
            fields.push(number);
        }
        fields
    }

    fn matches_filters(&self, query: &ListQuery) -> bool {
        filter_matches(query.category.as_deref(), self.category.as_str())
            && id_matches(query.order, self.order.id())
    }
}

impl Searchable for Transfer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str()];
        if let Some(transaction_id) = self.transaction_id.as_deref() {
            fields.push(transaction_id);
        }
        if let Some(number) = self.order.order_number() {
            fields.push(number);
        }
        fields
    }

    fn matches_filters(&self, query: &ListQuery) -> bool {
        filter_matches(query.transfer_type.as_deref(), self.transfer_type.as_str())
            && filter_matches(query.status.as_deref(), self.status.as_str())
            && id_matches(query.order, self.order.id())
    }
}

/// Página de resultados
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Corta una página; una página fuera de rango queda vacía con los totales correctos
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = (total + per_page - 1) / per_page;
    let start = page.saturating_mul(per_page);

    let items = if start >= total {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(per_page).collect()
    };

    Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}

/// Filtra con la query y pagina el resultado
pub fn apply<T: Searchable>(items: Vec<T>, query: &ListQuery) -> Page<T> {
    let filtered: Vec<T> = items.into_iter().filter(|item| item.matches(query)).collect();
    paginate(filtered, query.page, query.per_page())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::{ExpenseCategory, OrderRef};
    use crate::models::order::OrderStatus;
    use rust_decimal::Decimal;

    fn order(id: i64, number: &str, status: OrderStatus, pickup: &str) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "order_number": number,
            "status": status.as_str(),
            "pickup_location": pickup,
            "delivery_location": "Pune",
            "total_amount": "10000.00",
            "owner": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_paginate_basic_and_out_of_range() {
        let page = paginate((1..=23).collect::<Vec<_>>(), 2, 10);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);

        let past_end = paginate((1..=23).collect::<Vec<_>>(), 7, 10);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 23);

        let huge = paginate(vec![1, 2], usize::MAX, 10);
        assert!(huge.items.is_empty());

        let empty: Page<i32> = paginate(Vec::new(), 0, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_per_page_options() {
        let mut query = ListQuery::default();
        assert_eq!(query.per_page(), 10);
        query.per_page = Some(25);
        assert_eq!(query.per_page(), 25);
        query.per_page = Some(1000);
        assert_eq!(query.per_page(), 10);
    }

    #[test]
    fn test_order_search_and_status_filter() {
        let orders = vec![
            order(1, "TRANS100", OrderStatus::Pending, "Mumbai"),
            order(2, "TRANS200", OrderStatus::InTransit, "Delhi"),
            order(3, "TRANS300", OrderStatus::InTransit, "Mumbai Port"),
        ];

        let query = ListQuery {
            search: Some("mumbai".to_string()),
            ..Default::default()
        };
        let page = apply(orders.clone(), &query);
        assert_eq!(page.items.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 3]);

        let query = ListQuery {
            search: Some("MUMBAI".to_string()),
            status: Some("in_transit".to_string()),
            ..Default::default()
        };
        assert_eq!(apply(orders.clone(), &query).total, 1);

        let query = ListQuery {
            status: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(apply(orders, &query).total, 3);
    }

    #[test]
    fn test_expense_filters() {
        let expense = |id, category: ExpenseCategory, order: i64| Expense {
            id,
            order: OrderRef::Summary {
                id: order,
                order_number: Some(format!("TRANS{}", order)),
            },
            category,
            description: "Highway toll".to_string(),
            amount: Decimal::from(100),
            date: None,
            added_by: None,
        };
        let expenses = vec![
            expense(1, ExpenseCategory::Toll, 7),
            expense(2, ExpenseCategory::Fuel, 7),
            expense(3, ExpenseCategory::Toll, 8),
        ];

        let query = ListQuery {
            category: Some("toll".to_string()),
            order: Some(7),
            ..Default::default()
        };
        let page = apply(expenses.clone(), &query);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 1);

        let by_number = ListQuery {
            search: Some("trans8".to_string()),
            ..Default::default()
        };
        assert_eq!(apply(expenses, &by_number).items[0].id, 3);
    }
}
