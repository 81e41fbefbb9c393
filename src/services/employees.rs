use chrono::Utc;
use sea_orm::{ActiveModelTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    dto::people::{CreateEmployeeRequest, UpdateEmployeeRequest},
    entities::employee,
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Service for managing kitchen and event staff
#[derive(Clone)]
pub struct EmployeeService {
    db: Arc<DatabaseConnection>,
}

impl EmployeeService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<employee::Model>, ServiceError> {
        repositories::list::<employee::Entity, _>(self.db.as_ref(), query, Condition::all()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<employee::Model, ServiceError> {
        repositories::require::<employee::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        req: CreateEmployeeRequest,
    ) -> Result<employee::Model, ServiceError> {
        let now = Utc::now();
        let model = employee::ActiveModel {
            name: Set(req.name),
            document: Set(req.document),
            email: Set(req.email),
            phone: Set(req.phone),
            position: Set(req.position),
            hire_date: Set(req.hire_date),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create employee: {}", e);
            ServiceError::from(e)
        })?;

        info!("Employee created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateEmployeeRequest,
    ) -> Result<employee::Model, ServiceError> {
        let mut active: employee::ActiveModel = self.get(id).await?.into();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(document) = req.document {
            active.document = Set(document);
        }
        if let Some(email) = req.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = req.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(position) = req.position {
            active.position = Set(Some(position));
        }
        if let Some(hire_date) = req.hire_date {
            active.hire_date = Set(Some(hire_date));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Employee updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<employee::Entity, _>(self.db.as_ref(), id).await?;
        info!("Employee deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<employee::Model, ServiceError> {
        repositories::set_flag::<employee::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("Employee {} status set to {}", id, active);
        self.get(id).await
    }
}
