use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::{validate_decimal_min_zero, validate_decimal_positive};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplyCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSupplyCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplyRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: String,
    #[validate(custom = "validate_decimal_min_zero")]
    pub stock: Option<Decimal>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSupplyRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: Option<String>,
    #[validate(custom = "validate_decimal_min_zero")]
    pub stock: Option<Decimal>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// One purchased lot. The header is found (or opened) from `provider_id` + `category_id`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddPurchaseDetailRequest {
    pub provider_id: i32,
    pub category_id: i32,
    pub supply_id: i32,
    #[validate(custom = "validate_decimal_positive")]
    pub quantity: Decimal,
    #[validate(custom = "validate_decimal_min_zero")]
    pub unit_price: Decimal,
    /// Used only when a new header is opened; defaults to today
    pub purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePurchaseDetailRequest {
    #[validate(custom = "validate_decimal_positive")]
    pub quantity: Option<Decimal>,
    #[validate(custom = "validate_decimal_min_zero")]
    pub unit_price: Option<Decimal>,
}
