use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        inventory::{CreateSupplyRequest, UpdateSupplyRequest},
        StatusRequest,
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

/// List supplies, optionally narrowed to one `category_id`
async fn list_supplies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.supplies.list(&query, params.category_id).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_supply(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let supply = state.services.supplies.get(id).await?;
    Ok(success_response(supply))
}

async fn create_supply(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSupplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supply = state.services.supplies.create(payload).await?;
    Ok(created_response(supply))
}

async fn update_supply(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSupplyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supply = state.services.supplies.update(id, payload).await?;
    Ok(success_response(supply))
}

async fn delete_supply(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.supplies.delete(id).await?;
    Ok(no_content_response())
}

async fn set_supply_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supply = state
        .services
        .supplies
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(supply))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/supplies", get(list_supplies))
        .route("/supplies/:id", get(get_supply))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/supplies", post(create_supply))
        .route("/supplies/:id", put(update_supply).delete(delete_supply))
        .route("/supplies/:id/status", patch(set_supply_status))
}
