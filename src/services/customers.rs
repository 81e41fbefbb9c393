use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    db::with_transaction,
    dto::people::{CreateCustomerRequest, UpdateCustomerRequest},
    entities::{
        customer,
        reservation::{self, ReservationStatus},
    },
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<customer::Model>, ServiceError> {
        repositories::list::<customer::Entity, _>(self.db.as_ref(), query, Condition::all()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<customer::Model, ServiceError> {
        repositories::require::<customer::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        req: CreateCustomerRequest,
    ) -> Result<customer::Model, ServiceError> {
        let now = Utc::now();
        let model = customer::ActiveModel {
            name: Set(req.name),
            document: Set(req.document),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create customer: {}", e);
            ServiceError::from(e)
        })?;

        info!("Customer created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateCustomerRequest,
    ) -> Result<customer::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut active: customer::ActiveModel = existing.into();

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
        if let Some(address) = req.address {
            active.address = Set(Some(address));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Customer updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<customer::Entity, _>(self.db.as_ref(), id).await?;
        info!("Customer deleted: {}", id);
        Ok(())
    }

    /// Deactivating a customer also cancels its pending reservations.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<customer::Model, ServiceError> {
        let customer = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                repositories::set_flag::<customer::Entity, _>(txn, id, active).await?;

                if !active {
                    let cancelled = reservation::Entity::update_many()
                        .col_expr(
                            reservation::Column::Status,
                            Expr::value(ReservationStatus::Cancelled),
                        )
                        .col_expr(reservation::Column::UpdatedAt, Expr::value(Utc::now()))
                        .filter(reservation::Column::CustomerId.eq(id))
                        .filter(reservation::Column::Status.eq(ReservationStatus::Pending))
                        .exec(txn)
                        .await?
                        .rows_affected;
                    info!(customer_id = id, cancelled, "Pending reservations cancelled");
                }

                repositories::require::<customer::Entity, _>(txn, id).await
            })
        })
        .await?;

        info!("Customer {} status set to {}", id, active);
        Ok(customer)
    }
}
