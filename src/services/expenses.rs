use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    dto::expenses::{CreateExpenseRequest, UpdateExpenseRequest},
    entities::{employee, expense, expense_category},
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Service for recording operating expenses
#[derive(Clone)]
pub struct ExpenseService {
    db: Arc<DatabaseConnection>,
}

impl ExpenseService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
        category_id: Option<i32>,
    ) -> Result<Page<expense::Model>, ServiceError> {
        let condition =
            Condition::all().add_option(category_id.map(|id| expense::Column::CategoryId.eq(id)));
        repositories::list::<expense::Entity, _>(self.db.as_ref(), query, condition).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<expense::Model, ServiceError> {
        repositories::require::<expense::Entity, _>(self.db.as_ref(), id).await
    }

    async fn check_references(
        &self,
        category_id: Option<i32>,
        employee_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        if let Some(category_id) = category_id {
            let category = repositories::require_reference::<expense_category::Entity, _>(
                self.db.as_ref(),
                category_id,
            )
            .await?;
            if !category.status {
                return Err(ServiceError::BadRequest(format!(
                    "Expense category {} is inactive",
                    category_id
                )));
            }
        }
        if let Some(employee_id) = employee_id {
            repositories::require_reference::<employee::Entity, _>(self.db.as_ref(), employee_id)
                .await?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create(&self, req: CreateExpenseRequest) -> Result<expense::Model, ServiceError> {
        self.check_references(Some(req.category_id), req.employee_id)
            .await?;

        let now = Utc::now();
        let model = expense::ActiveModel {
            category_id: Set(req.category_id),
            employee_id: Set(req.employee_id),
            amount: Set(req.amount),
            expense_date: Set(req.expense_date),
            description: Set(req.description),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create expense: {}", e);
            ServiceError::from(e)
        })?;

        info!("Expense created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateExpenseRequest,
    ) -> Result<expense::Model, ServiceError> {
        let existing = self.get(id).await?;
        let category_change = req.category_id.filter(|&c| c != existing.category_id);
        self.check_references(category_change, req.employee_id)
            .await?;

        let mut active: expense::ActiveModel = existing.into();
        if let Some(category_id) = req.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(employee_id) = req.employee_id {
            active.employee_id = Set(Some(employee_id));
        }
        if let Some(amount) = req.amount {
            active.amount = Set(amount);
        }
        if let Some(expense_date) = req.expense_date {
            active.expense_date = Set(expense_date);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Expense updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<expense::Entity, _>(self.db.as_ref(), id).await?;
        info!("Expense deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<expense::Model, ServiceError> {
        repositories::set_flag::<expense::Entity, _>(self.db.as_ref(), id, active).await?;
        info!("Expense {} status set to {}", id, active);
        self.get(id).await
    }
}
