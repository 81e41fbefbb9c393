use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, Set};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::{
    dto::people::{CreateReservationRequest, UpdateReservationRequest},
    entities::{
        customer,
        reservation::{self, ReservationStatus},
    },
    errors::ServiceError,
    repositories::{self, ListQuery, Page},
};

/// Service for managing event reservations
#[derive(Clone)]
pub struct ReservationService {
    db: Arc<DatabaseConnection>,
}

impl ReservationService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &ListQuery,
        customer_id: Option<i32>,
    ) -> Result<Page<reservation::Model>, ServiceError> {
        let condition = Condition::all()
            .add_option(customer_id.map(|id| reservation::Column::CustomerId.eq(id)));
        repositories::list::<reservation::Entity, _>(self.db.as_ref(), query, condition).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<reservation::Model, ServiceError> {
        repositories::require::<reservation::Entity, _>(self.db.as_ref(), id).await
    }

    async fn require_active_customer(&self, customer_id: i32) -> Result<(), ServiceError> {
        let customer =
            repositories::require_reference::<customer::Entity, _>(self.db.as_ref(), customer_id)
                .await?;
        if !customer.status {
            return Err(ServiceError::BadRequest(format!(
                "Customer {} is inactive",
                customer_id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        req: CreateReservationRequest,
    ) -> Result<reservation::Model, ServiceError> {
        self.require_active_customer(req.customer_id).await?;

        let advance = req.advance_payment.unwrap_or(Decimal::ZERO);
        ensure_advance_within_total(advance, req.total_amount)?;

        let now = Utc::now();
        let model = reservation::ActiveModel {
            customer_id: Set(req.customer_id),
            event_date: Set(req.event_date),
            event_type: Set(req.event_type),
            location: Set(req.location),
            number_of_people: Set(req.number_of_people),
            total_amount: Set(req.total_amount),
            advance_payment: Set(advance),
            notes: Set(req.notes),
            status: Set(ReservationStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create reservation: {}", e);
            ServiceError::from(e)
        })?;

        info!("Reservation created: {}", created.id);
        Ok(created)
    }

    /// Details are editable until the reservation is completed or cancelled.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateReservationRequest,
    ) -> Result<reservation::Model, ServiceError> {
        let existing = self.get(id).await?;
        if matches!(
            existing.status,
            ReservationStatus::Completed | ReservationStatus::Cancelled
        ) {
            return Err(ServiceError::Conflict(format!(
                "Reservation {} is {} and can no longer be edited",
                id, existing.status
            )));
        }

        if let Some(customer_id) = req.customer_id {
            if customer_id != existing.customer_id {
                self.require_active_customer(customer_id).await?;
            }
        }

        let total = req.total_amount.unwrap_or(existing.total_amount);
        let advance = req.advance_payment.unwrap_or(existing.advance_payment);
        ensure_advance_within_total(advance, total)?;

        let mut active: reservation::ActiveModel = existing.into();
        if let Some(customer_id) = req.customer_id {
            active.customer_id = Set(customer_id);
        }
        if let Some(event_date) = req.event_date {
            active.event_date = Set(event_date);
        }
        if let Some(event_type) = req.event_type {
            active.event_type = Set(event_type);
        }
        if let Some(location) = req.location {
            active.location = Set(Some(location));
        }
        if let Some(people) = req.number_of_people {
            active.number_of_people = Set(people);
        }
        if let Some(notes) = req.notes {
            active.notes = Set(Some(notes));
        }
        active.total_amount = Set(total);
        active.advance_payment = Set(advance);
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Reservation updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<reservation::Entity, _>(self.db.as_ref(), id).await?;
        info!("Reservation deleted: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: i32,
        next: ReservationStatus,
    ) -> Result<reservation::Model, ServiceError> {
        let existing = self.get(id).await?;
        if !existing.status.can_transition_to(next) {
            warn!(
                "Rejected reservation {} transition {} -> {}",
                id, existing.status, next
            );
            return Err(ServiceError::Conflict(format!(
                "Reservation cannot move from {} to {}",
                existing.status, next
            )));
        }

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(next);
        active.updated_at = Set(Utc::now());
        let updated = active.update(self.db.as_ref()).await?;

        info!("Reservation {} moved to {}", id, next);
        Ok(updated)
    }
}

fn ensure_advance_within_total(advance: Decimal, total: Decimal) -> Result<(), ServiceError> {
    if advance > total {
        return Err(ServiceError::ValidationError(
            "advance_payment cannot exceed total_amount".to_string(),
        ));
    }
    Ok(())
}
