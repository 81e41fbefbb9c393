use rust_decimal::Decimal;

use crate::{dto::MAX_COLUMN_VALUE, errors::ServiceError};

// People
pub mod customers;
pub mod employees;
pub mod providers;
pub mod reservations;

// Inventory
pub mod purchases;
pub mod supplies;
pub mod supply_categories;

// Production
pub mod processes;
pub mod production_orders;
pub mod products;
pub mod spec_sheets;

// Expenses
pub mod expense_categories;
pub mod expenses;

// Access control
pub mod accounts;
pub mod roles;
pub mod users;

/// Accepts the result of a checked decimal operation if the columns can store it.
pub(crate) fn within_column_range(
    value: Option<Decimal>,
    what: &str,
) -> Result<Decimal, ServiceError> {
    match value {
        Some(v) if v.abs() <= *MAX_COLUMN_VALUE => Ok(v),
        _ => Err(ServiceError::BadRequest(format!(
            "{} is out of range (max {})",
            what, *MAX_COLUMN_VALUE
        ))),
    }
}
