use super::common::{
    created_response, success_response, ListParams, PaginatedResponse, ValidatedJson,
};
use crate::{
    dto::inventory::{AddPurchaseDetailRequest, UpdatePurchaseDetailRequest},
    errors::ApiError,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

/// List purchase headers, optionally for one `provider_id`
async fn list_purchases(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state
        .services
        .purchases
        .list(&query, params.provider_id)
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state.services.purchases.get(id).await?;
    Ok(success_response(purchase))
}

/// Adds a lot to the pending purchase of the provider and category
async fn add_purchase_detail(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddPurchaseDetailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state.services.purchases.add_detail(payload).await?;
    Ok(created_response(purchase))
}

async fn update_purchase_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdatePurchaseDetailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state.services.purchases.update_detail(id, payload).await?;
    Ok(success_response(purchase))
}

/// Returns the recomputed purchase
async fn delete_purchase_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state.services.purchases.delete_detail(id).await?;
    Ok(success_response(purchase))
}

async fn complete_purchase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state.services.purchases.complete(id).await?;
    Ok(success_response(purchase))
}

async fn cancel_purchase(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = state.services.purchases.cancel(id).await?;
    Ok(success_response(purchase))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list_purchases))
        .route("/purchases/:id", get(get_purchase))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/purchases/details", post(add_purchase_detail))
        .route(
            "/purchases/details/:id",
            put(update_purchase_detail).delete(delete_purchase_detail),
        )
        .route("/purchases/:id/complete", post(complete_purchase))
        .route("/purchases/:id/cancel", post(cancel_purchase))
}
