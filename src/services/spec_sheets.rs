//! Spec sheets (recipes) are written as one aggregate: the header, its supply
//! lines and its process steps commit together or not at all.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, Set,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::with_transaction,
    dto::production::{SpecSheetProcessLine, SpecSheetRequest, SpecSheetSupplyLine},
    entities::{
        process, product, purchase_detail, spec_sheet, spec_sheet_process, spec_sheet_supply,
        supply,
    },
    errors::ServiceError,
    repositories::{self, spec_sheet_repository, ListQuery, Page},
};

/// A spec sheet header with its supply lines and ordered process steps
#[derive(Debug, Clone, Serialize)]
pub struct SpecSheetDetail {
    #[serde(flatten)]
    pub sheet: spec_sheet::Model,
    pub supplies: Vec<spec_sheet_supply::Model>,
    pub processes: Vec<spec_sheet_process::Model>,
}

#[derive(Clone)]
pub struct SpecSheetService {
    db: Arc<DatabaseConnection>,
}

impl SpecSheetService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
        product_id: Option<i32>,
    ) -> Result<Page<spec_sheet::Model>, ServiceError> {
        let condition = Condition::all()
            .add_option(product_id.map(|id| spec_sheet::Column::ProductId.eq(id)));
        repositories::list::<spec_sheet::Entity, _>(self.db.as_ref(), query, condition).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<SpecSheetDetail, ServiceError> {
        let sheet = repositories::require::<spec_sheet::Entity, _>(self.db.as_ref(), id).await?;
        load_detail(self.db.as_ref(), sheet).await
    }

    /// Creates the header and its lines in one transaction. Activating the
    /// new sheet deactivates every other active sheet of the product.
    #[instrument(skip(self, req), fields(product_id = req.product_id))]
    pub async fn create(&self, req: SpecSheetRequest) -> Result<SpecSheetDetail, ServiceError> {
        check_line_sets(&req)?;

        let detail = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                require_active_product(txn, req.product_id).await?;

                let status = req.status.unwrap_or(true);
                if status {
                    let closed = spec_sheet_repository::deactivate_active_for_product(
                        txn,
                        req.product_id,
                        None,
                    )
                    .await?;
                    if closed > 0 {
                        info!(product_id = req.product_id, closed, "Superseded active spec sheets");
                    }
                }

                let now = Utc::now();
                let sheet = spec_sheet::ActiveModel {
                    product_id: Set(req.product_id),
                    base_quantity: Set(req.base_quantity),
                    unit_of_measure: Set(req.unit_of_measure.clone()),
                    date_effective: Set(req.date_effective),
                    end_date: Set(None),
                    status: Set(status),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                write_lines(txn, sheet.id, &req.supplies, &req.processes, now).await?;
                load_detail(txn, sheet).await
            })
        })
        .await?;

        info!(
            "Spec sheet created: {} ({} supplies, {} processes)",
            detail.sheet.id,
            detail.supplies.len(),
            detail.processes.len()
        );
        Ok(detail)
    }

    /// Replaces the header fields and the full set of lines.
    #[instrument(skip(self, req), fields(product_id = req.product_id))]
    pub async fn update(
        &self,
        id: i32,
        req: SpecSheetRequest,
    ) -> Result<SpecSheetDetail, ServiceError> {
        check_line_sets(&req)?;

        let detail = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let existing = repositories::require::<spec_sheet::Entity, _>(txn, id).await?;
                require_active_product(txn, req.product_id).await?;

                let status = req.status.unwrap_or(existing.status);
                if status {
                    spec_sheet_repository::deactivate_active_for_product(
                        txn,
                        req.product_id,
                        Some(id),
                    )
                    .await?;
                }

                let now = Utc::now();
                let end_date = match (existing.status, status) {
                    (_, true) => None,
                    (true, false) => Some(now.date_naive()),
                    (false, false) => existing.end_date,
                };

                let mut active = existing.into_active_model();
                active.product_id = Set(req.product_id);
                active.base_quantity = Set(req.base_quantity);
                active.unit_of_measure = Set(req.unit_of_measure.clone());
                active.date_effective = Set(req.date_effective);
                active.status = Set(status);
                active.end_date = Set(end_date);
                active.updated_at = Set(now);
                let sheet = active.update(txn).await?;

                spec_sheet_repository::delete_children(txn, id).await?;
                write_lines(txn, id, &req.supplies, &req.processes, now).await?;
                load_detail(txn, sheet).await
            })
        })
        .await?;

        info!("Spec sheet updated: {}", id);
        Ok(detail)
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<spec_sheet::Model, ServiceError> {
        let sheet = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let existing = repositories::require::<spec_sheet::Entity, _>(txn, id).await?;
                let now = Utc::now();

                let mut model = existing.clone().into_active_model();
                if active {
                    let product =
                        repositories::require::<product::Entity, _>(txn, existing.product_id)
                            .await?;
                    if !product.status {
                        return Err(ServiceError::Conflict(format!(
                            "Product {} is inactive; its spec sheets cannot be activated",
                            product.id
                        )));
                    }
                    spec_sheet_repository::deactivate_active_for_product(
                        txn,
                        existing.product_id,
                        Some(id),
                    )
                    .await?;
                    model.end_date = Set(None);
                } else if existing.status {
                    model.end_date = Set(Some(now.date_naive()));
                }
                model.status = Set(active);
                model.updated_at = Set(now);

                Ok(model.update(txn).await?)
            })
        })
        .await?;

        info!("Spec sheet {} status set to {}", id, active);
        Ok(sheet)
    }

    /// Refused while production orders still reference the sheet.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                repositories::require::<spec_sheet::Entity, _>(txn, id).await?;

                let orders = spec_sheet_repository::count_production_orders(txn, id).await?;
                if orders > 0 {
                    warn!(spec_sheet_id = id, orders, "Spec sheet still in use");
                    return Err(ServiceError::Conflict(format!(
                        "Spec sheet {} is referenced by {} production order(s)",
                        id, orders
                    )));
                }

                spec_sheet_repository::delete_children(txn, id).await?;
                repositories::delete_by_id::<spec_sheet::Entity, _>(txn, id).await
            })
        })
        .await?;

        info!("Spec sheet deleted: {}", id);
        Ok(())
    }
}

/// Checks that only need the request body: at least one supply line and
/// distinct `process_order` values.
fn check_line_sets(req: &SpecSheetRequest) -> Result<(), ServiceError> {
    if req.supplies.is_empty() {
        return Err(ServiceError::ValidationError(
            "A spec sheet needs at least one supply".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for line in &req.processes {
        if !seen.insert(line.process_order) {
            return Err(ServiceError::ValidationError(format!(
                "process_order {} is used more than once",
                line.process_order
            )));
        }
    }
    Ok(())
}

async fn require_active_product<C>(conn: &C, product_id: i32) -> Result<product::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let product = repositories::require_reference::<product::Entity, _>(conn, product_id).await?;
    if !product.status {
        return Err(ServiceError::BadRequest(format!(
            "Product {} is inactive",
            product_id
        )));
    }
    Ok(product)
}

async fn write_lines<C>(
    conn: &C,
    spec_sheet_id: i32,
    supplies: &[SpecSheetSupplyLine],
    processes: &[SpecSheetProcessLine],
    now: DateTime<Utc>,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let supply_lines = build_supply_lines(conn, spec_sheet_id, supplies, now).await?;
    spec_sheet_repository::insert_supplies(conn, supply_lines).await?;

    let process_lines = build_process_lines(conn, spec_sheet_id, processes, now).await?;
    spec_sheet_repository::insert_processes(conn, process_lines).await
}

async fn build_supply_lines<C>(
    conn: &C,
    spec_sheet_id: i32,
    lines: &[SpecSheetSupplyLine],
    now: DateTime<Utc>,
) -> Result<Vec<spec_sheet_supply::ActiveModel>, ServiceError>
where
    C: ConnectionTrait,
{
    let mut models = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let supply = repositories::require_reference::<supply::Entity, _>(conn, line.supply_id)
            .await?;
        if !supply.status {
            return Err(ServiceError::BadRequest(format!(
                "supplies[{}]: supply {} is inactive",
                index, supply.id
            )));
        }

        let lot_id = line.purchase_detail_id.ok_or_else(|| {
            ServiceError::BadRequest(format!(
                "supplies[{}]: purchase_detail_id is required",
                index
            ))
        })?;
        let lot = purchase_detail::Entity::find_by_id(lot_id)
            .one(conn)
            .await?
            .ok_or_else(|| {
                ServiceError::BadRequest(format!(
                    "supplies[{}]: purchase detail {} does not exist",
                    index, lot_id
                ))
            })?;
        if lot.supply_id != supply.id {
            return Err(ServiceError::BadRequest(format!(
                "supplies[{}]: purchase detail {} is not a lot of supply {}",
                index, lot_id, supply.id
            )));
        }

        models.push(spec_sheet_supply::ActiveModel {
            spec_sheet_id: Set(spec_sheet_id),
            supply_id: Set(supply.id),
            purchase_detail_id: Set(lot.id),
            quantity: Set(line.quantity),
            unit_of_measure: Set(line.unit_of_measure.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }

    Ok(models)
}

async fn build_process_lines<C>(
    conn: &C,
    spec_sheet_id: i32,
    lines: &[SpecSheetProcessLine],
    now: DateTime<Utc>,
) -> Result<Vec<spec_sheet_process::ActiveModel>, ServiceError>
where
    C: ConnectionTrait,
{
    let mut models = Vec::with_capacity(lines.len());

    for line in lines {
        if let Some(process_id) = line.process_id {
            repositories::require_reference::<process::Entity, _>(conn, process_id).await?;
        }

        models.push(spec_sheet_process::ActiveModel {
            spec_sheet_id: Set(spec_sheet_id),
            process_id: Set(line.process_id),
            process_order: Set(line.process_order),
            name_override: Set(line.name_override.clone()),
            description_override: Set(line.description_override.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }

    Ok(models)
}

async fn load_detail<C>(conn: &C, sheet: spec_sheet::Model) -> Result<SpecSheetDetail, ServiceError>
where
    C: ConnectionTrait,
{
    let supplies = spec_sheet_repository::find_supplies(conn, sheet.id).await?;
    let processes = spec_sheet_repository::find_processes(conn, sheet.id).await?;
    Ok(SpecSheetDetail {
        sheet,
        supplies,
        processes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn request(orders: &[i32]) -> SpecSheetRequest {
        SpecSheetRequest {
            product_id: 1,
            base_quantity: dec!(1),
            unit_of_measure: "unit".into(),
            date_effective: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            status: Some(true),
            supplies: vec![SpecSheetSupplyLine {
                supply_id: 1,
                purchase_detail_id: Some(1),
                quantity: dec!(1),
                unit_of_measure: "kg".into(),
            }],
            processes: orders
                .iter()
                .map(|&order| SpecSheetProcessLine {
                    process_id: None,
                    process_order: order,
                    name_override: Some(format!("step {}", order)),
                    description_override: None,
                })
                .collect(),
        }
    }

    #[test]
    fn duplicate_process_order_is_rejected() {
        assert!(check_line_sets(&request(&[1, 2, 3])).is_ok());
        assert_matches!(
            check_line_sets(&request(&[1, 2, 1])),
            Err(ServiceError::ValidationError(msg)) if msg.contains("process_order 1")
        );
    }

    #[test]
    fn empty_supply_list_is_rejected() {
        let mut req = request(&[]);
        req.supplies.clear();
        assert_matches!(check_line_sets(&req), Err(ServiceError::ValidationError(_)));
    }
}
