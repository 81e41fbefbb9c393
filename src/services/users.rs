use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    auth::password::hash_password,
    dto::access::{CreateUserRequest, UpdateUserRequest},
    entities::{role, user},
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Back-office accounts
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
        role_id: Option<i32>,
    ) -> Result<Page<user::Model>, ServiceError> {
        let condition =
            Condition::all().add_option(role_id.map(|id| user::Column::RoleId.eq(id)));
        repositories::list::<user::Entity, _>(self.db.as_ref(), query, condition).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<user::Model, ServiceError> {
        repositories::require::<user::Entity, _>(self.db.as_ref(), id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await?)
    }

    async fn require_active_role(&self, role_id: i32) -> Result<role::Model, ServiceError> {
        let role =
            repositories::require_reference::<role::Entity, _>(self.db.as_ref(), role_id).await?;
        if !role.status {
            return Err(ServiceError::BadRequest(format!(
                "Role {} is inactive",
                role_id
            )));
        }
        Ok(role)
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn create(&self, req: CreateUserRequest) -> Result<user::Model, ServiceError> {
        self.require_active_role(req.role_id).await?;
        let password_hash = hash_password(&req.password)?;

        let now = Utc::now();
        let model = user::ActiveModel {
            name: Set(req.name),
            email: Set(req.email.trim().to_lowercase()),
            password_hash: Set(password_hash),
            role_id: Set(req.role_id),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create user: {}", e);
            ServiceError::from(e)
        })?;

        info!("User created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, req))]
    pub async fn update(&self, id: i32, req: UpdateUserRequest) -> Result<user::Model, ServiceError> {
        let existing = self.get(id).await?;
        if let Some(role_id) = req.role_id {
            if role_id != existing.role_id {
                self.require_active_role(role_id).await?;
            }
        }

        let mut active: user::ActiveModel = existing.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(email) = req.email {
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(password) = req.password {
            active.password_hash = Set(hash_password(&password)?);
        }
        if let Some(role_id) = req.role_id {
            active.role_id = Set(role_id);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("User updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<user::Entity, _>(self.db.as_ref(), id).await?;
        info!("User deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<user::Model, ServiceError> {
        repositories::set_flag::<user::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("User {} status set to {}", id, active);
        self.get(id).await
    }
}
