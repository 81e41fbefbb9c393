use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        people::{CreateEmployeeRequest, UpdateEmployeeRequest},
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

async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.employees.list(&query).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state.services.employees.get(id).await?;
    Ok(success_response(employee))
}

async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state.services.employees.create(payload).await?;
    Ok(created_response(employee))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state.services.employees.update(id, payload).await?;
    Ok(success_response(employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.employees.delete(id).await?;
    Ok(no_content_response())
}

async fn set_employee_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state
        .services
        .employees
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(employee))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/:id", get(get_employee))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", post(create_employee))
        .route("/employees/:id", put(update_employee).delete(delete_employee))
        .route("/employees/:id/status", patch(set_employee_status))
}
