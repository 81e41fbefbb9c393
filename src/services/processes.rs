use chrono::Utc;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    dto::production::{CreateProcessRequest, UpdateProcessRequest},
    entities::process,
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Master production steps referenced by spec sheets
#[derive(Clone)]
pub struct ProcessService {
    db: Arc<DatabaseConnection>,
}

impl ProcessService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<process::Model>, ServiceError> {
        repositories::list::<process::Entity, _>(self.db.as_ref(), query, Condition::all()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<process::Model, ServiceError> {
        repositories::require::<process::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, req: CreateProcessRequest) -> Result<process::Model, ServiceError> {
        let now = Utc::now();
        let model = process::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create process: {}", e);
            ServiceError::from(e)
        })?;

        info!("Process created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateProcessRequest,
    ) -> Result<process::Model, ServiceError> {
        let mut active: process::ActiveModel = self.get(id).await?.into();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Process updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<process::Entity, _>(self.db.as_ref(), id).await?;
        info!("Process deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<process::Model, ServiceError> {
        repositories::set_flag::<process::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("Process {} status set to {}", id, active);
        self.get(id).await
    }
}
