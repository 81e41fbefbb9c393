use chrono::Utc;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    dto::expenses::{CreateExpenseCategoryRequest, UpdateExpenseCategoryRequest},
    entities::expense_category,
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

#[derive(Clone)]
pub struct ExpenseCategoryService {
    db: Arc<DatabaseConnection>,
}

impl ExpenseCategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<expense_category::Model>, ServiceError> {
        repositories::list::<expense_category::Entity, _>(
            self.db.as_ref(),
            query,
            Condition::all(),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<expense_category::Model, ServiceError> {
        repositories::require::<expense_category::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        req: CreateExpenseCategoryRequest,
    ) -> Result<expense_category::Model, ServiceError> {
        let now = Utc::now();
        let model = expense_category::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create expense category: {}", e);
            ServiceError::from(e)
        })?;

        info!("Expense category created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateExpenseCategoryRequest,
    ) -> Result<expense_category::Model, ServiceError> {
        let mut active: expense_category::ActiveModel = self.get(id).await?.into();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Expense category updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<expense_category::Entity, _>(self.db.as_ref(), id).await?;
        info!("Expense category deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i32,
        active: bool,
    ) -> Result<expense_category::Model, ServiceError> {
        repositories::set_flag::<expense_category::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("Expense category {} status set to {}", id, active);
        self.get(id).await
    }
}
