use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    dto::inventory::{CreateSupplyRequest, UpdateSupplyRequest},
    entities::{supply, supply_category},
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Service for managing raw materials and their stock level
#[derive(Clone)]
pub struct SupplyService {
    db: Arc<DatabaseConnection>,
}

impl SupplyService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
        category_id: Option<i32>,
    ) -> Result<Page<supply::Model>, ServiceError> {
        let condition =
            Condition::all().add_option(category_id.map(|id| supply::Column::CategoryId.eq(id)));
        repositories::list::<supply::Entity, _>(self.db.as_ref(), query, condition).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<supply::Model, ServiceError> {
        repositories::require::<supply::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, req: CreateSupplyRequest) -> Result<supply::Model, ServiceError> {
        if let Some(category_id) = req.category_id {
            repositories::require_reference::<supply_category::Entity, _>(
                self.db.as_ref(),
                category_id,
            )
            .await?;
        }

        let now = Utc::now();
        let model = supply::ActiveModel {
            name: Set(req.name),
            category_id: Set(req.category_id),
            unit_of_measure: Set(req.unit_of_measure),
            stock: Set(req.stock.unwrap_or(Decimal::ZERO)),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create supply: {}", e);
            ServiceError::from(e)
        })?;

        info!("Supply created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateSupplyRequest,
    ) -> Result<supply::Model, ServiceError> {
        let mut active: supply::ActiveModel = self.get(id).await?.into();

        if let Some(category_id) = req.category_id {
            repositories::require_reference::<supply_category::Entity, _>(
                self.db.as_ref(),
                category_id,
            )
            .await?;
            active.category_id = Set(Some(category_id));
        }
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(unit) = req.unit_of_measure {
            active.unit_of_measure = Set(unit);
        }
        if let Some(stock) = req.stock {
            active.stock = Set(stock);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Supply updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<supply::Entity, _>(self.db.as_ref(), id).await?;
        info!("Supply deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<supply::Model, ServiceError> {
        repositories::set_flag::<supply::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("Supply {} status set to {}", id, active);
        self.get(id).await
    }
}
