use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        inventory::{CreateSupplyCategoryRequest, UpdateSupplyCategoryRequest},
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

async fn list_supply_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.supply_categories.list(&query).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_supply_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let supply_category = state.services.supply_categories.get(id).await?;
    Ok(success_response(supply_category))
}

async fn create_supply_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSupplyCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supply_category = state.services.supply_categories.create(payload).await?;
    Ok(created_response(supply_category))
}

async fn update_supply_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSupplyCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supply_category = state.services.supply_categories.update(id, payload).await?;
    Ok(success_response(supply_category))
}

async fn delete_supply_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.supply_categories.delete(id).await?;
    Ok(no_content_response())
}

async fn set_supply_category_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supply_category = state
        .services
        .supply_categories
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(supply_category))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/supply-categories", get(list_supply_categories))
        .route("/supply-categories/:id", get(get_supply_category))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/supply-categories", post(create_supply_category))
        .route("/supply-categories/:id", put(update_supply_category).delete(delete_supply_category))
        .route("/supply-categories/:id/status", patch(set_supply_category_status))
}
