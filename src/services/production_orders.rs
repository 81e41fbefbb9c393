use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    IntoActiveModel, Set,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::{
    db::with_transaction,
    dto::production::{CreateProductionOrderRequest, UpdateProductionOrderRequest},
    entities::{
        employee, product,
        production_order::{self, ProductionOrderStatus},
        spec_sheet, supply,
    },
    errors::ServiceError,
    repositories::{self, spec_sheet_repository, ListQuery, Page},
    services::within_column_range,
};

/// Stock drawn from one supply by a completed order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyConsumption {
    pub supply_id: i32,
    pub required: Decimal,
    pub remaining: Decimal,
}

#[derive(Clone)]
pub struct ProductionOrderService {
    db: Arc<DatabaseConnection>,
}

impl ProductionOrderService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
        product_id: Option<i32>,
    ) -> Result<Page<production_order::Model>, ServiceError> {
        let condition = Condition::all()
            .add_option(product_id.map(|id| production_order::Column::ProductId.eq(id)));
        repositories::list::<production_order::Entity, _>(self.db.as_ref(), query, condition)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<production_order::Model, ServiceError> {
        repositories::require::<production_order::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        req: CreateProductionOrderRequest,
    ) -> Result<production_order::Model, ServiceError> {
        let db = self.db.as_ref();

        let product = repositories::require_reference::<product::Entity, _>(db, req.product_id)
            .await?;
        if !product.status {
            return Err(ServiceError::BadRequest(format!(
                "Product {} is inactive",
                product.id
            )));
        }

        let sheet = match req.spec_sheet_id {
            Some(sheet_id) => {
                let sheet =
                    repositories::require_reference::<spec_sheet::Entity, _>(db, sheet_id).await?;
                if sheet.product_id != product.id {
                    return Err(ServiceError::BadRequest(format!(
                        "Spec sheet {} does not belong to product {}",
                        sheet_id, product.id
                    )));
                }
                if !sheet.status {
                    return Err(ServiceError::BadRequest(format!(
                        "Spec sheet {} is inactive",
                        sheet_id
                    )));
                }
                sheet
            }
            None => spec_sheet_repository::find_active_for_product(db, product.id)
                .await?
                .ok_or_else(|| {
                    ServiceError::BadRequest(format!(
                        "Product {} has no active spec sheet",
                        product.id
                    ))
                })?,
        };

        if let Some(employee_id) = req.employee_id {
            require_active_employee(db, employee_id).await?;
        }

        let now = Utc::now();
        let model = production_order::ActiveModel {
            product_id: Set(product.id),
            spec_sheet_id: Set(sheet.id),
            employee_id: Set(req.employee_id),
            quantity: Set(req.quantity),
            order_date: Set(req.order_date.unwrap_or_else(|| now.date_naive())),
            status: Set(ProductionOrderStatus::Pending),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(db).await.map_err(|e| {
            error!("Failed to create production order: {}", e);
            ServiceError::from(e)
        })?;

        info!(
            "Production order created: {} (product {}, sheet {})",
            created.id, product.id, sheet.id
        );
        Ok(created)
    }

    /// Only pending orders can be edited.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateProductionOrderRequest,
    ) -> Result<production_order::Model, ServiceError> {
        let existing = self.get(id).await?;
        if existing.status != ProductionOrderStatus::Pending {
            return Err(ServiceError::Conflict(format!(
                "Production order {} is {} and can no longer be edited",
                id, existing.status
            )));
        }

        if let Some(employee_id) = req.employee_id {
            require_active_employee(self.db.as_ref(), employee_id).await?;
        }

        let mut active = existing.into_active_model();
        if let Some(employee_id) = req.employee_id {
            active.employee_id = Set(Some(employee_id));
        }
        if let Some(quantity) = req.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(order_date) = req.order_date {
            active.order_date = Set(order_date);
        }
        if let Some(notes) = req.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Production order updated: {}", id);
        Ok(updated)
    }

    /// Moves the order along its lifecycle. Completion draws the recipe's
    /// supplies from stock; a shortage on any supply aborts the whole move.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i32,
        next: ProductionOrderStatus,
    ) -> Result<production_order::Model, ServiceError> {
        let order = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let existing =
                    repositories::require::<production_order::Entity, _>(txn, id).await?;
                if !existing.status.can_transition_to(next) {
                    warn!(
                        "Rejected production order {} transition {} -> {}",
                        id, existing.status, next
                    );
                    return Err(ServiceError::Conflict(format!(
                        "Production order cannot move from {} to {}",
                        existing.status, next
                    )));
                }

                if next == ProductionOrderStatus::Completed {
                    let consumed = consume_supplies(txn, &existing).await?;
                    info!(
                        production_order_id = id,
                        supplies = consumed.len(),
                        "Supplies consumed"
                    );
                }

                let mut active = existing.into_active_model();
                active.status = Set(next);
                active.updated_at = Set(Utc::now());
                Ok(active.update(txn).await?)
            })
        })
        .await?;

        info!("Production order {} moved to {}", id, next);
        Ok(order)
    }

    /// Only pending or cancelled orders can be deleted.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        if !existing.status.is_deletable() {
            return Err(ServiceError::Conflict(format!(
                "Production order {} is {} and cannot be deleted",
                id, existing.status
            )));
        }

        repositories::delete_by_id::<production_order::Entity, _>(self.db.as_ref(), id).await?;
        info!("Production order deleted: {}", id);
        Ok(())
    }
}

async fn require_active_employee<C>(conn: &C, employee_id: i32) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let employee = repositories::require_reference::<employee::Entity, _>(conn, employee_id).await?;
    if !employee.status {
        return Err(ServiceError::BadRequest(format!(
            "Employee {} is inactive",
            employee_id
        )));
    }
    Ok(())
}

/// Quantity of one recipe line needed for `order_quantity` units, given a
/// recipe that yields `base_quantity` units.
pub fn required_quantity(
    line_quantity: Decimal,
    order_quantity: Decimal,
    base_quantity: Decimal,
) -> Result<Decimal, ServiceError> {
    let scaled = line_quantity.checked_mul(order_quantity);
    let required = if base_quantity.is_zero() {
        scaled
    } else {
        scaled
            .and_then(|q| q.checked_div(base_quantity))
            .map(|q| q.round_dp(3))
    };
    within_column_range(required, "Required quantity")
}

/// Subtracts the sheet's requirements from stock. Every shortage is checked
/// before the first write.
async fn consume_supplies<C>(
    conn: &C,
    order: &production_order::Model,
) -> Result<Vec<SupplyConsumption>, ServiceError>
where
    C: ConnectionTrait,
{
    let sheet = repositories::require::<spec_sheet::Entity, _>(conn, order.spec_sheet_id).await?;
    let lines = spec_sheet_repository::find_supplies(conn, sheet.id).await?;

    let mut needed: BTreeMap<i32, Decimal> = BTreeMap::new();
    for line in &lines {
        let required = required_quantity(line.quantity, order.quantity, sheet.base_quantity)?;
        let total = needed.entry(line.supply_id).or_default();
        *total = within_column_range(
            total.checked_add(required),
            &format!("Required quantity of supply {}", line.supply_id),
        )?;
    }

    let mut plan = Vec::with_capacity(needed.len());
    for (supply_id, required) in needed {
        let supply = repositories::require::<supply::Entity, _>(conn, supply_id).await?;
        if supply.stock < required {
            return Err(ServiceError::InsufficientStock(format!(
                "Supply {} ({}) has {} {} in stock, {} required",
                supply.id, supply.name, supply.stock, supply.unit_of_measure, required
            )));
        }
        plan.push((supply, required));
    }

    let now = Utc::now();
    let mut consumed = Vec::with_capacity(plan.len());
    for (supply, required) in plan {
        let supply_id = supply.id;
        let remaining = supply.stock - required;
        let mut active = supply.into_active_model();
        active.stock = Set(remaining);
        active.updated_at = Set(now);
        active.update(conn).await?;
        consumed.push(SupplyConsumption {
            supply_id,
            required,
            remaining,
        });
    }

    Ok(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn requirement_scales_with_order_size() {
        assert_eq!(required_quantity(dec!(2), dec!(30), dec!(10)).unwrap(), dec!(6));
        assert_eq!(required_quantity(dec!(0.5), dec!(1), dec!(4)).unwrap(), dec!(0.125));
        assert_eq!(required_quantity(dec!(1), dec!(1), dec!(3)).unwrap(), dec!(0.333));
    }

    #[test]
    fn oversized_requirement_is_rejected() {
        assert!(matches!(
            required_quantity(dec!(99999999999), dec!(99999999999), dec!(1)),
            Err(ServiceError::BadRequest(_))
        ));
        assert!(matches!(
            required_quantity(dec!(79228162514264337593543950335), dec!(10), dec!(1)),
            Err(ServiceError::BadRequest(_))
        ));
    }
}
