use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::validate_decimal_positive;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpenseCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExpenseCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    pub category_id: i32,
    pub employee_id: Option<i32>,
    #[validate(custom = "validate_decimal_positive")]
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExpenseRequest {
    pub category_id: Option<i32>,
    pub employee_id: Option<i32>,
    #[validate(custom = "validate_decimal_positive")]
    pub amount: Option<Decimal>,
    pub expense_date: Option<NaiveDate>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}
