use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        people::{CreateProviderRequest, UpdateProviderRequest},
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

/// List providers; `search` matches the provider name
async fn list_providers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.providers.list(&query).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state.services.providers.get(id).await?;
    Ok(success_response(provider))
}

async fn create_provider(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProviderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state.services.providers.create(payload).await?;
    Ok(created_response(provider))
}

async fn update_provider(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProviderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state.services.providers.update(id, payload).await?;
    Ok(success_response(provider))
}

async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.providers.delete(id).await?;
    Ok(no_content_response())
}

async fn set_provider_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = state
        .services
        .providers
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(provider))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/providers", get(list_providers))
        .route("/providers/:id", get(get_provider))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/providers", post(create_provider))
        .route("/providers/:id", put(update_provider).delete(delete_provider))
        .route("/providers/:id/status", patch(set_provider_status))
}
