use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::{production_order, spec_sheet, spec_sheet_process, spec_sheet_supply};
use crate::errors::ServiceError;

/// Deactivates every active sheet of `product_id` other than `keep`, closing
/// its effective range at today's date. Returns the number of sheets touched.
pub async fn deactivate_active_for_product<C>(
    conn: &C,
    product_id: i32,
    keep: Option<i32>,
) -> Result<u64, ServiceError>
where
    C: ConnectionTrait,
{
    let mut update = spec_sheet::Entity::update_many()
        .col_expr(spec_sheet::Column::Status, Expr::value(false))
        .col_expr(
            spec_sheet::Column::EndDate,
            Expr::value(Utc::now().date_naive()),
        )
        .col_expr(spec_sheet::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(spec_sheet::Column::ProductId.eq(product_id))
        .filter(spec_sheet::Column::Status.eq(true));

    if let Some(id) = keep {
        update = update.filter(spec_sheet::Column::Id.ne(id));
    }

    Ok(update.exec(conn).await?.rows_affected)
}

pub async fn find_active_for_product<C>(
    conn: &C,
    product_id: i32,
) -> Result<Option<spec_sheet::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(spec_sheet::Entity::find()
        .filter(spec_sheet::Column::ProductId.eq(product_id))
        .filter(spec_sheet::Column::Status.eq(true))
        .order_by_desc(spec_sheet::Column::Id)
        .one(conn)
        .await?)
}

pub async fn insert_supplies<C>(
    conn: &C,
    lines: Vec<spec_sheet_supply::ActiveModel>,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    if lines.is_empty() {
        return Ok(());
    }
    spec_sheet_supply::Entity::insert_many(lines)
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn insert_processes<C>(
    conn: &C,
    lines: Vec<spec_sheet_process::ActiveModel>,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    if lines.is_empty() {
        return Ok(());
    }
    spec_sheet_process::Entity::insert_many(lines)
        .exec(conn)
        .await?;
    Ok(())
}

/// Removes every supply and process line of a sheet
pub async fn delete_children<C>(conn: &C, spec_sheet_id: i32) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    spec_sheet_supply::Entity::delete_many()
        .filter(spec_sheet_supply::Column::SpecSheetId.eq(spec_sheet_id))
        .exec(conn)
        .await?;
    spec_sheet_process::Entity::delete_many()
        .filter(spec_sheet_process::Column::SpecSheetId.eq(spec_sheet_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn find_supplies<C>(
    conn: &C,
    spec_sheet_id: i32,
) -> Result<Vec<spec_sheet_supply::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(spec_sheet_supply::Entity::find()
        .filter(spec_sheet_supply::Column::SpecSheetId.eq(spec_sheet_id))
        .order_by_asc(spec_sheet_supply::Column::Id)
        .all(conn)
        .await?)
}

/// Process lines in execution order
pub async fn find_processes<C>(
    conn: &C,
    spec_sheet_id: i32,
) -> Result<Vec<spec_sheet_process::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(spec_sheet_process::Entity::find()
        .filter(spec_sheet_process::Column::SpecSheetId.eq(spec_sheet_id))
        .order_by_asc(spec_sheet_process::Column::ProcessOrder)
        .all(conn)
        .await?)
}

pub async fn count_production_orders<C>(conn: &C, spec_sheet_id: i32) -> Result<u64, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(production_order::Entity::find()
        .filter(production_order::Column::SpecSheetId.eq(spec_sheet_id))
        .count(conn)
        .await?)
}
