use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        people::{CreateCustomerRequest, UpdateCustomerRequest},
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

/// List customers with pagination, name search and status filter
async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.customers.list(&query).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.services.customers.get(id).await?;
    Ok(success_response(customer))
}

async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.services.customers.create(payload).await?;
    Ok(created_response(customer))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.services.customers.update(id, payload).await?;
    Ok(success_response(customer))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.customers.delete(id).await?;
    Ok(no_content_response())
}

/// Deactivating a customer cancels its pending reservations
async fn set_customer_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state
        .services
        .customers
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(customer))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/:id", get(get_customer))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/:id", put(update_customer).delete(delete_customer))
        .route("/customers/:id/status", patch(set_customer_status))
}
