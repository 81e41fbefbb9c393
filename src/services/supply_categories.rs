use chrono::Utc;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    dto::inventory::{CreateSupplyCategoryRequest, UpdateSupplyCategoryRequest},
    entities::supply_category,
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

#[derive(Clone)]
pub struct SupplyCategoryService {
    db: Arc<DatabaseConnection>,
}

impl SupplyCategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<supply_category::Model>, ServiceError> {
        repositories::list::<supply_category::Entity, _>(self.db.as_ref(), query, Condition::all())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<supply_category::Model, ServiceError> {
        repositories::require::<supply_category::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        req: CreateSupplyCategoryRequest,
    ) -> Result<supply_category::Model, ServiceError> {
        let now = Utc::now();
        let model = supply_category::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create supply category: {}", e);
            ServiceError::from(e)
        })?;

        info!("Supply category created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateSupplyCategoryRequest,
    ) -> Result<supply_category::Model, ServiceError> {
        let mut active: supply_category::ActiveModel = self.get(id).await?.into();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Supply category updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<supply_category::Entity, _>(self.db.as_ref(), id).await?;
        info!("Supply category deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i32,
        active: bool,
    ) -> Result<supply_category::Model, ServiceError> {
        repositories::set_flag::<supply_category::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("Supply category {} status set to {}", id, active);
        self.get(id).await
    }
}
