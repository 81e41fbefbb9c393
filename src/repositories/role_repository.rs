use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{privilege, role, role_privilege};
use crate::errors::ServiceError;

pub async fn privileges_for_role<C>(
    conn: &C,
    role: &role::Model,
) -> Result<Vec<privilege::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(role
        .find_related(privilege::Entity)
        .order_by_asc(privilege::Column::Id)
        .all(conn)
        .await?)
}

/// Privilege names granted to a role, as carried in access tokens
pub async fn privilege_names<C>(conn: &C, role: &role::Model) -> Result<Vec<String>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(privileges_for_role(conn, role)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect())
}

pub async fn all_privileges<C>(conn: &C) -> Result<Vec<privilege::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    Ok(privilege::Entity::find()
        .order_by_asc(privilege::Column::Id)
        .all(conn)
        .await?)
}

/// How many of `ids` name an existing privilege
pub async fn count_existing_privileges<C>(conn: &C, ids: &[i32]) -> Result<u64, ServiceError>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }
    Ok(privilege::Entity::find()
        .filter(privilege::Column::Id.is_in(ids.iter().copied()))
        .count(conn)
        .await?)
}

/// Replaces the role's grants with exactly `ids`
pub async fn replace_privileges<C>(conn: &C, role_id: i32, ids: &[i32]) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    role_privilege::Entity::delete_many()
        .filter(role_privilege::Column::RoleId.eq(role_id))
        .exec(conn)
        .await?;

    if ids.is_empty() {
        return Ok(());
    }

    let grants = ids.iter().map(|&privilege_id| role_privilege::ActiveModel {
        role_id: Set(role_id),
        privilege_id: Set(privilege_id),
    });
    role_privilege::Entity::insert_many(grants)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
