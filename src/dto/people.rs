use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::{validate_decimal_min_zero, validate_document, validate_phone};
use crate::entities::reservation::ReservationStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_document")]
    pub document: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom = "validate_document")]
    pub document: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_document")]
    pub document: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom = "validate_document")]
    pub document: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProviderRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_document")]
    pub document: String,
    #[validate(length(max = 100))]
    pub contact_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProviderRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom = "validate_document")]
    pub document: Option<String>,
    #[validate(length(max = 100))]
    pub contact_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
}

fn validate_reservation_amounts(req: &CreateReservationRequest) -> Result<(), ValidationError> {
    match req.advance_payment {
        Some(advance) if advance > req.total_amount => {
            let mut err = ValidationError::new("advance_exceeds_total");
            err.message = Some("advance_payment cannot exceed total_amount".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_reservation_amounts"))]
pub struct CreateReservationRequest {
    pub customer_id: i32,
    pub event_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 100))]
    pub event_type: String,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 10000))]
    pub number_of_people: i32,
    #[validate(custom = "validate_decimal_min_zero")]
    pub total_amount: Decimal,
    #[validate(custom = "validate_decimal_min_zero")]
    pub advance_payment: Option<Decimal>,
    pub notes: Option<String>,
}

/// Partial update; the amount rule is re-checked against the merged row.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReservationRequest {
    pub customer_id: Option<i32>,
    pub event_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 100))]
    pub event_type: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 10000))]
    pub number_of_people: Option<i32>,
    #[validate(custom = "validate_decimal_min_zero")]
    pub total_amount: Option<Decimal>,
    #[validate(custom = "validate_decimal_min_zero")]
    pub advance_payment: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReservationStatusRequest {
    pub status: ReservationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::flatten_validation_errors;
    use rust_decimal_macros::dec;

    fn reservation() -> CreateReservationRequest {
        CreateReservationRequest {
            customer_id: 1,
            event_date: Utc::now(),
            event_type: "wedding".into(),
            location: None,
            number_of_people: 80,
            total_amount: dec!(1000),
            advance_payment: Some(dec!(250)),
            notes: None,
        }
    }

    #[test]
    fn advance_may_not_exceed_total() {
        let mut req = reservation();
        assert!(req.validate().is_ok());
        req.advance_payment = Some(dec!(1000.01));
        let errors = flatten_validation_errors(&req.validate().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "__all__");
    }

    #[test]
    fn customer_fields_are_checked() {
        let req = CreateCustomerRequest {
            name: String::new(),
            document: "x".into(),
            email: Some("not-an-email".into()),
            phone: None,
            address: None,
            status: None,
        };
        let fields: Vec<_> = flatten_validation_errors(&req.validate().unwrap_err())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["document", "email", "name"]);
    }
}
