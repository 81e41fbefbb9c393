use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        production::{CreateProcessRequest, UpdateProcessRequest},
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

async fn list_processes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.processes.list(&query).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_process(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let process = state.services.processes.get(id).await?;
    Ok(success_response(process))
}

async fn create_process(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProcessRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let process = state.services.processes.create(payload).await?;
    Ok(created_response(process))
}

async fn update_process(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProcessRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let process = state.services.processes.update(id, payload).await?;
    Ok(success_response(process))
}

async fn delete_process(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.processes.delete(id).await?;
    Ok(no_content_response())
}

async fn set_process_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let process = state
        .services
        .processes
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(process))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/processes", get(list_processes))
        .route("/processes/:id", get(get_process))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/processes", post(create_process))
        .route("/processes/:id", put(update_process).delete(delete_process))
        .route("/processes/:id/status", patch(set_process_status))
}
