use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{production::SpecSheetRequest, StatusRequest},
    errors::ApiError,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post, put},
    Router,
};
use tracing::info;

/// List spec sheet headers, optionally for one `product_id`
async fn list_spec_sheets(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state
        .services
        .spec_sheets
        .list(&query, params.product_id)
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

/// Header with its supply lines and ordered process steps
async fn get_spec_sheet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let sheet = state.services.spec_sheets.get(id).await?;
    Ok(success_response(sheet))
}

async fn create_spec_sheet(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SpecSheetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sheet = state.services.spec_sheets.create(payload).await?;
    info!("Spec sheet {} created for product {}", sheet.sheet.id, sheet.sheet.product_id);
    Ok(created_response(sheet))
}

/// Replaces the header and every line of the sheet
async fn update_spec_sheet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SpecSheetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sheet = state.services.spec_sheets.update(id, payload).await?;
    Ok(success_response(sheet))
}

async fn delete_spec_sheet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.spec_sheets.delete(id).await?;
    Ok(no_content_response())
}

async fn set_spec_sheet_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sheet = state
        .services
        .spec_sheets
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(sheet))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/spec-sheets", get(list_spec_sheets))
        .route("/spec-sheets/:id", get(get_spec_sheet))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/spec-sheets", post(create_spec_sheet))
        .route(
            "/spec-sheets/:id",
            put(update_spec_sheet).delete(delete_spec_sheet),
        )
        .route("/spec-sheets/:id/status", patch(set_spec_sheet_status))
}
