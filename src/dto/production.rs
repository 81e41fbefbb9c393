use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{validate_decimal_min_zero, validate_decimal_positive};
use crate::entities::production_order::ProductionOrderStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(custom = "validate_decimal_min_zero")]
    pub price: Decimal,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(custom = "validate_decimal_min_zero")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProcessRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub status: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProcessRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Full recipe aggregate. Used for create and for the wholesale replace on update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SpecSheetRequest {
    pub product_id: i32,
    #[validate(custom = "validate_decimal_positive")]
    pub base_quantity: Decimal,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: String,
    pub date_effective: NaiveDate,
    /// Active on create when omitted; an update keeps the stored flag
    pub status: Option<bool>,
    #[validate(length(min = 1, message = "A spec sheet needs at least one supply"))]
    #[validate]
    pub supplies: Vec<SpecSheetSupplyLine>,
    #[serde(default)]
    #[validate]
    pub processes: Vec<SpecSheetProcessLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpecSheetSupplyLine {
    pub supply_id: i32,
    /// Purchase lot the quantity is costed against; required
    pub purchase_detail_id: Option<i32>,
    #[validate(custom = "validate_decimal_positive")]
    pub quantity: Decimal,
    #[validate(length(min = 1, max = 20))]
    pub unit_of_measure: String,
}

fn validate_process_line(line: &SpecSheetProcessLine) -> Result<(), ValidationError> {
    let has_name = line
        .name_override
        .as_deref()
        .map(|n| !n.trim().is_empty())
        .unwrap_or(false);
    if line.process_id.is_none() && !has_name {
        let mut err = ValidationError::new("process_or_name");
        err.message = Some("A step needs a process_id or a name_override".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_process_line"))]
pub struct SpecSheetProcessLine {
    pub process_id: Option<i32>,
    #[validate(range(min = 1))]
    pub process_order: i32,
    #[validate(length(max = 100))]
    pub name_override: Option<String>,
    pub description_override: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductionOrderRequest {
    pub product_id: i32,
    /// Defaults to the product's active spec sheet
    pub spec_sheet_id: Option<i32>,
    pub employee_id: Option<i32>,
    #[validate(custom = "validate_decimal_positive")]
    pub quantity: Decimal,
    pub order_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductionOrderRequest {
    pub employee_id: Option<i32>,
    #[validate(custom = "validate_decimal_positive")]
    pub quantity: Option<Decimal>,
    pub order_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductionOrderStatusRequest {
    pub status: ProductionOrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::flatten_validation_errors;
    use rust_decimal_macros::dec;

    fn sheet() -> SpecSheetRequest {
        SpecSheetRequest {
            product_id: 1,
            base_quantity: dec!(10),
            unit_of_measure: "kg".into(),
            date_effective: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status: Some(true),
            supplies: vec![SpecSheetSupplyLine {
                supply_id: 1,
                purchase_detail_id: Some(1),
                quantity: dec!(2.5),
                unit_of_measure: "kg".into(),
            }],
            processes: vec![SpecSheetProcessLine {
                process_id: Some(1),
                process_order: 1,
                name_override: None,
                description_override: None,
            }],
        }
    }

    #[test]
    fn valid_sheet_passes() {
        assert!(sheet().validate().is_ok());
    }

    #[test]
    fn nested_line_errors_carry_their_index() {
        let mut req = sheet();
        req.supplies.push(SpecSheetSupplyLine {
            supply_id: 2,
            purchase_detail_id: Some(2),
            quantity: dec!(0),
            unit_of_measure: "kg".into(),
        });
        req.processes[0].process_id = None;

        let fields: Vec<_> = flatten_validation_errors(&req.validate().unwrap_err())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["processes[0].__all__", "supplies[1].quantity"]);
    }

    #[test]
    fn status_is_optional() {
        let json = serde_json::json!({
            "product_id": 1,
            "base_quantity": "10",
            "unit_of_measure": "kg",
            "date_effective": "2024-05-01",
            "supplies": [{"supply_id": 1, "purchase_detail_id": 1, "quantity": "1", "unit_of_measure": "kg"}]
        });
        let req: SpecSheetRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.status, None);
        assert!(req.processes.is_empty());
    }
}
