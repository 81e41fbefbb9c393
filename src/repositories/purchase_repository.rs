use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{
    purchase_detail,
    register_purchase::{self, PurchaseStatus},
};
use crate::errors::ServiceError;
use crate::services::within_column_range;

/// The open batch for a (provider, supply category) pair, if any
pub async fn find_pending_header<C>(
    conn: &C,
    provider_id: i32,
    category_id: i32,
) -> Result<Option<register_purchase::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(register_purchase::Entity::find()
        .filter(register_purchase::Column::ProviderId.eq(provider_id))
        .filter(register_purchase::Column::CategoryId.eq(category_id))
        .filter(register_purchase::Column::Status.eq(PurchaseStatus::Pending))
        .order_by_desc(register_purchase::Column::Id)
        .one(conn)
        .await?)
}

pub async fn find_details<C>(
    conn: &C,
    register_purchase_id: i32,
) -> Result<Vec<purchase_detail::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(purchase_detail::Entity::find()
        .filter(purchase_detail::Column::RegisterPurchaseId.eq(register_purchase_id))
        .order_by_asc(purchase_detail::Column::Id)
        .all(conn)
        .await?)
}

/// Sum of the detail subtotals of one header
pub fn sum_subtotals(details: &[purchase_detail::Model]) -> Result<Decimal, ServiceError> {
    let total = details
        .iter()
        .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(d.subtotal));
    within_column_range(total, "Purchase total")
}

/// Re-sums the header's details and persists `subtotal_amount` and `total_amount`.
pub async fn recompute_totals<C>(
    conn: &C,
    header: register_purchase::Model,
) -> Result<register_purchase::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let details = find_details(conn, header.id).await?;
    let subtotal = sum_subtotals(&details)?;

    let mut active = header.into_active_model();
    active.subtotal_amount = Set(subtotal);
    active.total_amount = Set(subtotal);
    active.updated_at = Set(Utc::now());

    Ok(active.update(conn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn detail(subtotal: Decimal) -> purchase_detail::Model {
        purchase_detail::Model {
            id: 1,
            register_purchase_id: 1,
            supply_id: 1,
            quantity: dec!(1),
            unit_price: subtotal,
            subtotal,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sums_detail_subtotals() {
        let details = vec![detail(dec!(12.50)), detail(dec!(7.25)), detail(dec!(0.25))];
        assert_eq!(sum_subtotals(&details).unwrap(), dec!(20.00));
        assert_eq!(sum_subtotals(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn total_beyond_the_column_is_rejected() {
        let details = vec![detail(dec!(60000000000)), detail(dec!(60000000000))];
        assert!(matches!(
            sum_subtotals(&details),
            Err(ServiceError::BadRequest(_))
        ));
    }
}
