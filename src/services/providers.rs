use chrono::Utc;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    dto::people::{CreateProviderRequest, UpdateProviderRequest},
    entities::provider,
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Service for managing suppliers of raw materials
#[derive(Clone)]
pub struct ProviderService {
    db: Arc<DatabaseConnection>,
}

impl ProviderService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<provider::Model>, ServiceError> {
        repositories::list::<provider::Entity, _>(self.db.as_ref(), query, Condition::all()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<provider::Model, ServiceError> {
        repositories::require::<provider::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        req: CreateProviderRequest,
    ) -> Result<provider::Model, ServiceError> {
        let now = Utc::now();
        let model = provider::ActiveModel {
            name: Set(req.name),
            document: Set(req.document),
            contact_name: Set(req.contact_name),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create provider: {}", e);
            ServiceError::from(e)
        })?;

        info!("Provider created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateProviderRequest,
    ) -> Result<provider::Model, ServiceError> {
        let mut active: provider::ActiveModel = self.get(id).await?.into();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(document) = req.document {
            active.document = Set(document);
        }
        if let Some(contact_name) = req.contact_name {
            active.contact_name = Set(Some(contact_name));
        }
        if let Some(email) = req.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = req.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(address) = req.address {
            active.address = Set(Some(address));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Provider updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<provider::Entity, _>(self.db.as_ref(), id).await?;
        info!("Provider deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<provider::Model, ServiceError> {
        repositories::set_flag::<provider::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("Provider {} status set to {}", id, active);
        self.get(id).await
    }
}
