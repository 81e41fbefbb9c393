//! Purchases group detail lines under one pending header per
//! (provider, supply category). Header totals are re-summed from the details
//! in the same transaction as every detail write.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    db::with_transaction,
    dto::inventory::{AddPurchaseDetailRequest, UpdatePurchaseDetailRequest},
    entities::{
        provider, purchase_detail,
        register_purchase::{self, PurchaseStatus},
        supply, supply_category,
    },
    errors::ServiceError,
    repositories::{self, purchase_repository, ListQuery, Page},
    services::within_column_range,
};

/// A purchase header together with its detail lines
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseWithDetails {
    #[serde(flatten)]
    pub purchase: register_purchase::Model,
    pub details: Vec<purchase_detail::Model>,
}

#[derive(Clone)]
pub struct PurchaseService {
    db: Arc<DatabaseConnection>,
}

impl PurchaseService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
        provider_id: Option<i32>,
    ) -> Result<Page<register_purchase::Model>, ServiceError> {
        let condition = Condition::all()
            .add_option(provider_id.map(|id| register_purchase::Column::ProviderId.eq(id)));
        repositories::list::<register_purchase::Entity, _>(self.db.as_ref(), query, condition)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<PurchaseWithDetails, ServiceError> {
        let purchase =
            repositories::require::<register_purchase::Entity, _>(self.db.as_ref(), id).await?;
        with_details(self.db.as_ref(), purchase).await
    }

    /// Adds a lot to the pending purchase of the (provider, category) pair,
    /// opening a new purchase when none is pending.
    #[instrument(skip(self))]
    pub async fn add_detail(
        &self,
        req: AddPurchaseDetailRequest,
    ) -> Result<PurchaseWithDetails, ServiceError> {
        let result = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let provider =
                    repositories::require_reference::<provider::Entity, _>(txn, req.provider_id)
                        .await?;
                if !provider.status {
                    return Err(ServiceError::BadRequest(format!(
                        "Provider {} is inactive",
                        provider.id
                    )));
                }

                let category = repositories::require_reference::<supply_category::Entity, _>(
                    txn,
                    req.category_id,
                )
                .await?;
                if !category.status {
                    return Err(ServiceError::BadRequest(format!(
                        "Supply category {} is inactive",
                        category.id
                    )));
                }

                let supply =
                    repositories::require_reference::<supply::Entity, _>(txn, req.supply_id)
                        .await?;
                if !supply.status {
                    return Err(ServiceError::BadRequest(format!(
                        "Supply {} is inactive",
                        supply.id
                    )));
                }
                if supply.category_id != Some(category.id) {
                    return Err(ServiceError::BadRequest(format!(
                        "Supply {} does not belong to category {}",
                        supply.id, category.id
                    )));
                }

                let now = Utc::now();
                let header = match purchase_repository::find_pending_header(
                    txn,
                    provider.id,
                    category.id,
                )
                .await?
                {
                    Some(header) => header,
                    None => {
                        let header = register_purchase::ActiveModel {
                            provider_id: Set(provider.id),
                            category_id: Set(category.id),
                            purchase_date: Set(req
                                .purchase_date
                                .unwrap_or_else(|| now.date_naive())),
                            subtotal_amount: Set(Decimal::ZERO),
                            total_amount: Set(Decimal::ZERO),
                            status: Set(PurchaseStatus::Pending),
                            created_at: Set(now),
                            updated_at: Set(now),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        info!("Purchase opened: {}", header.id);
                        header
                    }
                };

                purchase_detail::ActiveModel {
                    register_purchase_id: Set(header.id),
                    supply_id: Set(supply.id),
                    quantity: Set(req.quantity),
                    unit_price: Set(req.unit_price),
                    subtotal: Set(line_subtotal(req.quantity, req.unit_price)?),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                let header = purchase_repository::recompute_totals(txn, header).await?;
                with_details(txn, header).await
            })
        })
        .await?;

        info!(
            "Purchase {} now totals {}",
            result.purchase.id, result.purchase.total_amount
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn update_detail(
        &self,
        detail_id: i32,
        req: UpdatePurchaseDetailRequest,
    ) -> Result<PurchaseWithDetails, ServiceError> {
        let result = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let (detail, header) = editable_detail(txn, detail_id).await?;

                let quantity = req.quantity.unwrap_or(detail.quantity);
                let unit_price = req.unit_price.unwrap_or(detail.unit_price);

                let mut active = detail.into_active_model();
                active.quantity = Set(quantity);
                active.unit_price = Set(unit_price);
                active.subtotal = Set(line_subtotal(quantity, unit_price)?);
                active.updated_at = Set(Utc::now());
                active.update(txn).await?;

                let header = purchase_repository::recompute_totals(txn, header).await?;
                with_details(txn, header).await
            })
        })
        .await?;

        info!("Purchase detail updated: {}", detail_id);
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn delete_detail(&self, detail_id: i32) -> Result<PurchaseWithDetails, ServiceError> {
        let result = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let (detail, header) = editable_detail(txn, detail_id).await?;

                purchase_detail::Entity::delete_by_id(detail.id)
                    .exec(txn)
                    .await?;

                let header = purchase_repository::recompute_totals(txn, header).await?;
                with_details(txn, header).await
            })
        })
        .await?;

        info!("Purchase detail deleted: {}", detail_id);
        Ok(result)
    }

    /// Closes a pending purchase and adds every lot to its supply's stock.
    #[instrument(skip(self))]
    pub async fn complete(&self, id: i32) -> Result<PurchaseWithDetails, ServiceError> {
        let result = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let header = require_pending(txn, id).await?;
                let details = purchase_repository::find_details(txn, id).await?;
                if details.is_empty() {
                    return Err(ServiceError::Conflict(format!(
                        "Purchase {} has no details to receive",
                        id
                    )));
                }

                let now = Utc::now();
                for detail in &details {
                    let supply =
                        repositories::require::<supply::Entity, _>(txn, detail.supply_id).await?;
                    let stock = within_column_range(
                        supply.stock.checked_add(detail.quantity),
                        &format!("Stock of supply {}", supply.id),
                    )?;
                    let mut active = supply.into_active_model();
                    active.stock = Set(stock);
                    active.updated_at = Set(now);
                    active.update(txn).await?;
                }

                let mut active = header.into_active_model();
                active.status = Set(PurchaseStatus::Completed);
                active.updated_at = Set(now);
                let purchase = active.update(txn).await?;

                Ok(PurchaseWithDetails { purchase, details })
            })
        })
        .await?;

        info!(
            "Purchase {} completed; {} lots received into stock",
            id,
            result.details.len()
        );
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: i32) -> Result<PurchaseWithDetails, ServiceError> {
        let header = require_pending(self.db.as_ref(), id).await?;

        let mut active = header.into_active_model();
        active.status = Set(PurchaseStatus::Cancelled);
        active.updated_at = Set(Utc::now());
        let purchase = active.update(self.db.as_ref()).await?;

        info!("Purchase cancelled: {}", id);
        with_details(self.db.as_ref(), purchase).await
    }
}

/// `quantity × unit_price`, rounded to cents
pub fn line_subtotal(quantity: Decimal, unit_price: Decimal) -> Result<Decimal, ServiceError> {
    within_column_range(
        quantity.checked_mul(unit_price).map(|v| v.round_dp(2)),
        "Line subtotal",
    )
}

async fn require_pending<C>(conn: &C, id: i32) -> Result<register_purchase::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let header = repositories::require::<register_purchase::Entity, _>(conn, id).await?;
    if header.status != PurchaseStatus::Pending {
        warn!("Purchase {} is {}", id, header.status);
        return Err(ServiceError::Conflict(format!(
            "Purchase {} is {}, not pending",
            id, header.status
        )));
    }
    Ok(header)
}

/// A detail whose header is still pending
async fn editable_detail<C>(
    conn: &C,
    detail_id: i32,
) -> Result<(purchase_detail::Model, register_purchase::Model), ServiceError>
where
    C: ConnectionTrait,
{
    let detail = purchase_detail::Entity::find_by_id(detail_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Purchase detail", detail_id))?;
    let header = require_pending(conn, detail.register_purchase_id).await?;
    Ok((detail, header))
}

async fn with_details<C>(
    conn: &C,
    purchase: register_purchase::Model,
) -> Result<PurchaseWithDetails, ServiceError>
where
    C: ConnectionTrait,
{
    let details = purchase_repository::find_details(conn, purchase.id).await?;
    Ok(PurchaseWithDetails { purchase, details })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    #[test]
    fn subtotal_is_rounded_to_cents() {
        assert_eq!(line_subtotal(dec!(2.5), dec!(4.00)).unwrap(), dec!(10.00));
        assert_eq!(line_subtotal(dec!(0.333), dec!(3.00)).unwrap(), dec!(1.00));
        assert_eq!(line_subtotal(dec!(1.125), dec!(1.00)).unwrap(), dec!(1.12));
    }

    #[test]
    fn oversized_subtotal_is_rejected() {
        assert_matches!(
            line_subtotal(dec!(79228162514264337593543950335), dec!(2)),
            Err(ServiceError::BadRequest(_))
        );
        assert_matches!(
            line_subtotal(dec!(99999999999), dec!(99999999999)),
            Err(ServiceError::BadRequest(_))
        );
    }
}
