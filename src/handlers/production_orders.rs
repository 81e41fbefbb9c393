use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::production::{
        CreateProductionOrderRequest, ProductionOrderStatusRequest, UpdateProductionOrderRequest,
    },
    errors::ApiError,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post, put},
    Router,
};

async fn list_production_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state
        .services
        .production_orders
        .list(&query, params.product_id)
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_production_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.services.production_orders.get(id).await?;
    Ok(success_response(order))
}

/// Without `spec_sheet_id` the product's active spec sheet is used
async fn create_production_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductionOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.services.production_orders.create(payload).await?;
    Ok(created_response(order))
}

async fn update_production_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductionOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.services.production_orders.update(id, payload).await?;
    Ok(success_response(order))
}

async fn delete_production_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.production_orders.delete(id).await?;
    Ok(no_content_response())
}

/// `completed` consumes the recipe's supplies; a stock shortage returns 409
async fn set_production_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ProductionOrderStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .production_orders
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(order))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/production-orders", get(list_production_orders))
        .route("/production-orders/:id", get(get_production_order))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/production-orders", post(create_production_order))
        .route(
            "/production-orders/:id",
            put(update_production_order).delete(delete_production_order),
        )
        .route(
            "/production-orders/:id/status",
            patch(set_production_order_status),
        )
}
