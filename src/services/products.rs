use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::{
    db::with_transaction,
    dto::production::{CreateProductRequest, UpdateProductRequest},
    entities::{
        product,
        production_order::{self, ProductionOrderStatus},
    },
    errors::ServiceError,
    repositories::{self, spec_sheet_repository, ListQuery, Page},
};

/// Service for managing sellable products
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<product::Model>, ServiceError> {
        repositories::list::<product::Entity, _>(self.db.as_ref(), query, Condition::all()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<product::Model, ServiceError> {
        repositories::require::<product::Entity, _>(self.db.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, req: CreateProductRequest) -> Result<product::Model, ServiceError> {
        let now = Utc::now();
        let model = product::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            price: Set(req.price),
            status: Set(req.status.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to create product: {}", e);
            ServiceError::from(e)
        })?;

        info!("Product created: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i32,
        req: UpdateProductRequest,
    ) -> Result<product::Model, ServiceError> {
        let mut active: product::ActiveModel = self.get(id).await?.into();

        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = req.price {
            active.price = Set(price);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(self.db.as_ref()).await?;
        info!("Product updated: {}", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        repositories::delete_by_id::<product::Entity, _>(self.db.as_ref(), id).await?;
        info!("Product deleted: {}", id);
        Ok(())
    }

    /// Deactivation closes every active spec sheet of the product and cancels
    /// its pending production orders in the same transaction.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: i32, active: bool) -> Result<product::Model, ServiceError> {
        let product = with_transaction(self.db.as_ref(), move |txn| {
            Box::pin(async move {
                repositories::set_flag::<product::Entity, _>(txn, id, active).await?;

                if !active {
                    let sheets =
                        spec_sheet_repository::deactivate_active_for_product(txn, id, None)
                            .await?;
                    let orders = production_order::Entity::update_many()
                        .col_expr(
                            production_order::Column::Status,
                            Expr::value(ProductionOrderStatus::Cancelled),
                        )
                        .col_expr(production_order::Column::UpdatedAt, Expr::value(Utc::now()))
                        .filter(production_order::Column::ProductId.eq(id))
                        .filter(production_order::Column::Status.eq(ProductionOrderStatus::Pending))
                        .exec(txn)
                        .await?
                        .rows_affected;
                    info!(
                        product_id = id,
                        sheets, orders, "Product deactivation cascaded"
                    );
                }

                repositories::require::<product::Entity, _>(txn, id).await
            })
        })
        .await?;

        info!("Product {} status set to {}", id, active);
        Ok(product)
    }
}
