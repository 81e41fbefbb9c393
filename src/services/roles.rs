use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    db::with_transaction,
    dto::access::{CreateRoleRequest, UpdateRoleRequest},
    entities::{privilege, role, user},
    errors::ServiceError,
    repositories::{self, role_repository, ListQuery, Page},
};

/// A role with the privileges granted to it
#[derive(Debug, Clone, Serialize)]
pub struct RoleWithPrivileges {
    #[serde(flatten)]
    pub role: role::Model,
    pub privileges: Vec<privilege::Model>,
}

#[derive(Clone)]
pub struct RoleService {
    db: Arc<DatabaseConnection>,
}

impl RoleService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<role::Model>, ServiceError> {
        repositories::list::<role::Entity, _>(self.db.as_ref(), query, Condition::all()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<RoleWithPrivileges, ServiceError> {
        let role = repositories::require::<role::Entity, _>(self.db.as_ref(), id).await?;
        let privileges = role_repository::privileges_for_role(self.db.as_ref(), &role).await?;
        Ok(RoleWithPrivileges { role, privileges })
    }

    /// Every privilege that can be granted
    #[instrument(skip(self))]
    pub async fn list_privileges(&self) -> Result<Vec<privilege::Model>, ServiceError> {
        role_repository::all_privileges(self.db.as_ref()).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, req: CreateRoleRequest) -> Result<role::Model, ServiceError> {
        let now = Utc::now();
        let model = role::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create role: {}", e);
            ServiceError::from(e)
        })?;

        info!("Role created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, req: UpdateRoleRequest) -> Result<role::Model, ServiceError> {
        let existing = repositories::require::<role::Entity, _>(self.db.as_ref(), id).await?;
        let mut active: role::ActiveModel = existing.into();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Role updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<role::Entity, _>(self.db.as_ref(), id).await?;
        info!("Role deleted: {}", id);
        Ok(())
    }

    /// Deactivating a role deactivates every user holding it.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<role::Model, ServiceError> {
        let role = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                repositories::set_flag::<role::Entity, _>(txn, id, active).await?;

                if !active {
                    let users = user::Entity::update_many()
                        .col_expr(user::Column::Status, Expr::value(false))
                        .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
                        .filter(user::Column::RoleId.eq(id))
                        .filter(user::Column::Status.eq(true))
                        .exec(txn)
                        .await?
                        .rows_affected;
                    info!(role_id = id, users, "Users of deactivated role deactivated");
                }

                repositories::require::<role::Entity, _>(txn, id).await
            })
        })
        .await?;

        info!("Role {} status set to {}", id, active);
        Ok(role)
    }

    /// Replaces the role's privileges with exactly `privilege_ids`.
    #[instrument(skip(self))]
    pub async fn set_privileges(
        &self,
        id: i32,
        privilege_ids: Vec<i32>,
    ) -> Result<RoleWithPrivileges, ServiceError> {
        let ids: Vec<i32> = privilege_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let result = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                let role = repositories::require::<role::Entity, _>(txn, id).await?;

                let known = role_repository::count_existing_privileges(txn, &ids).await?;
                if known != ids.len() as u64 {
                    return Err(ServiceError::BadRequest(
                        "One or more privilege ids do not exist".to_string(),
                    ));
                }

                role_repository::replace_privileges(txn, id, &ids).await?;
                let privileges = role_repository::privileges_for_role(txn, &role).await?;
                Ok(RoleWithPrivileges { role, privileges })
            })
        })
        .await?;

        info!(
            "Role {} now holds {} privileges",
            id,
            result.privileges.len()
        );
        Ok(result)
    }
}
