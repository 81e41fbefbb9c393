//! Query helpers shared by every service.
//!
//! Functions are generic over [`ConnectionTrait`] so the same query runs on
//! the pool or inside a transaction opened by [`crate::db::with_transaction`].

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::{
    customer, employee, expense, expense_category, process, product, production_order, provider,
    register_purchase, reservation, role, spec_sheet, supply, supply_category, user,
};
use crate::errors::ServiceError;

pub mod purchase_repository;
pub mod role_repository;
pub mod spec_sheet_repository;

/// Normalised list parameters handed down from the HTTP layer
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u64,
    pub per_page: u64,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            ..Default::default()
        }
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    fn status_value(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// One page of rows plus the unpaged total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// An entity with an integer `id` that the API lists, fetches and deletes.
pub trait Catalog: EntityTrait {
    /// Human-readable name used in error messages
    const LABEL: &'static str;

    fn id_column() -> Self::Column;

    /// Column matched by the `search` list parameter
    fn search_column() -> Option<Self::Column> {
        None
    }

    /// Builds the filter for the `status` list parameter.
    fn status_filter(raw: &str) -> Result<SimpleExpr, ServiceError>;
}

/// Catalogue entity carrying an active/inactive `status` flag.
pub trait Flagged: Catalog {
    fn flag_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
}

/// Parses `true/false`, `active/inactive` and `1/0`.
pub fn parse_flag(raw: &str) -> Result<bool, ServiceError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "active" | "1" => Ok(true),
        "false" | "inactive" | "0" => Ok(false),
        other => Err(ServiceError::BadRequest(format!(
            "Invalid status filter '{}'",
            other
        ))),
    }
}

macro_rules! flagged_catalog {
    ($module:ident, $label:literal, $search:expr) => {
        impl Catalog for $module::Entity {
            const LABEL: &'static str = $label;

            fn id_column() -> Self::Column {
                $module::Column::Id
            }

            fn search_column() -> Option<Self::Column> {
                $search
            }

            fn status_filter(raw: &str) -> Result<SimpleExpr, ServiceError> {
                Ok($module::Column::Status.eq(parse_flag(raw)?))
            }
        }

        impl Flagged for $module::Entity {
            fn flag_column() -> Self::Column {
                $module::Column::Status
            }

            fn updated_at_column() -> Self::Column {
                $module::Column::UpdatedAt
            }
        }
    };
}

macro_rules! lifecycle_catalog {
    ($module:ident, $label:literal, $status:ty) => {
        impl Catalog for $module::Entity {
            const LABEL: &'static str = $label;

            fn id_column() -> Self::Column {
                $module::Column::Id
            }

            fn status_filter(raw: &str) -> Result<SimpleExpr, ServiceError> {
                let status = raw.parse::<$status>().map_err(|_| {
                    ServiceError::BadRequest(format!("Invalid status filter '{}'", raw))
                })?;
                Ok($module::Column::Status.eq(status))
            }
        }
    };
}

flagged_catalog!(customer, "Customer", Some(customer::Column::Name));
flagged_catalog!(employee, "Employee", Some(employee::Column::Name));
flagged_catalog!(provider, "Provider", Some(provider::Column::Name));
flagged_catalog!(supply_category, "Supply category", Some(supply_category::Column::Name));
flagged_catalog!(supply, "Supply", Some(supply::Column::Name));
flagged_catalog!(product, "Product", Some(product::Column::Name));
flagged_catalog!(process, "Process", Some(process::Column::Name));
flagged_catalog!(spec_sheet, "Spec sheet", None);
flagged_catalog!(expense_category, "Expense category", Some(expense_category::Column::Name));
flagged_catalog!(expense, "Expense", Some(expense::Column::Description));
flagged_catalog!(role, "Role", Some(role::Column::Name));
flagged_catalog!(user, "User", Some(user::Column::Name));

lifecycle_catalog!(reservation, "Reservation", reservation::ReservationStatus);
lifecycle_catalog!(register_purchase, "Purchase", register_purchase::PurchaseStatus);
lifecycle_catalog!(
    production_order,
    "Production order",
    production_order::ProductionOrderStatus
);

/// Looks a row up by id
pub async fn find_by_id<E, C>(conn: &C, id: i32) -> Result<Option<E::Model>, ServiceError>
where
    E: Catalog,
    C: ConnectionTrait,
{
    Ok(E::find().filter(E::id_column().eq(id)).one(conn).await?)
}

/// Like [`find_by_id`] but a missing row is a `NotFound` error
pub async fn require<E, C>(conn: &C, id: i32) -> Result<E::Model, ServiceError>
where
    E: Catalog,
    C: ConnectionTrait,
{
    find_by_id::<E, C>(conn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(E::LABEL, id))
}

/// Like [`require`] but for a row referenced from a request body: missing is a 400.
pub async fn require_reference<E, C>(conn: &C, id: i32) -> Result<E::Model, ServiceError>
where
    E: Catalog,
    C: ConnectionTrait,
{
    find_by_id::<E, C>(conn, id).await?.ok_or_else(|| {
        ServiceError::BadRequest(format!("{} with ID {} does not exist", E::LABEL, id))
    })
}

/// Paginated listing ordered by id; `extra` narrows the result further.
pub async fn list<E, C>(
    conn: &C,
    query: &ListQuery,
    extra: Condition,
) -> Result<Page<E::Model>, ServiceError>
where
    E: Catalog,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let mut condition = extra;
    if let (Some(term), Some(column)) = (query.search_term(), E::search_column()) {
        condition = condition.add(column.contains(term));
    }
    if let Some(raw) = query.status_value() {
        condition = condition.add(E::status_filter(raw)?);
    }

    let paginator = E::find()
        .filter(condition)
        .order_by_asc(E::id_column())
        .paginate(conn, query.per_page.max(1));

    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(query.page.saturating_sub(1)).await?;

    Ok(Page { items, total })
}

/// Deletes by id; a missing row is `NotFound`, a referenced row surfaces as `Conflict`.
pub async fn delete_by_id<E, C>(conn: &C, id: i32) -> Result<(), ServiceError>
where
    E: Catalog,
    C: ConnectionTrait,
{
    let result = E::delete_many()
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::not_found(E::LABEL, id));
    }
    Ok(())
}

/// Flips the status flag of one row without touching anything else.
pub async fn set_flag<E, C>(conn: &C, id: i32, active: bool) -> Result<(), ServiceError>
where
    E: Flagged,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .col_expr(E::flag_column(), Expr::value(active))
        .col_expr(E::updated_at_column(), Expr::value(Utc::now()))
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::not_found(E::LABEL, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn flag_values() {
        assert!(parse_flag("active").unwrap());
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert_matches!(parse_flag("maybe"), Err(ServiceError::BadRequest(_)));
    }

    #[test]
    fn lifecycle_status_filter_rejects_unknown_values() {
        assert!(<reservation::Entity as Catalog>::status_filter("confirmed").is_ok());
        assert_matches!(
            <production_order::Entity as Catalog>::status_filter("shipped"),
            Err(ServiceError::BadRequest(_))
        );
    }

    #[test]
    fn list_query_ignores_blank_filters() {
        let mut query = ListQuery::new(0, 0);
        assert_eq!((query.page, query.per_page), (1, 1));
        query.search = Some("   ".into());
        query.status = Some("".into());
        assert!(query.search_term().is_none());
        assert!(query.status_value().is_none());
    }
}
