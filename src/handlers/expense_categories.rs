use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        expenses::{CreateExpenseCategoryRequest, UpdateExpenseCategoryRequest},
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

async fn list_expense_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.expense_categories.list(&query).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_expense_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_category = state.services.expense_categories.get(id).await?;
    Ok(success_response(expense_category))
}

async fn create_expense_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateExpenseCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_category = state.services.expense_categories.create(payload).await?;
    Ok(created_response(expense_category))
}

async fn update_expense_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateExpenseCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_category = state.services.expense_categories.update(id, payload).await?;
    Ok(success_response(expense_category))
}

async fn delete_expense_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.expense_categories.delete(id).await?;
    Ok(no_content_response())
}

async fn set_expense_category_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense_category = state
        .services
        .expense_categories
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(expense_category))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/expense-categories", get(list_expense_categories))
        .route("/expense-categories/:id", get(get_expense_category))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/expense-categories", post(create_expense_category))
        .route("/expense-categories/:id", put(update_expense_category).delete(delete_expense_category))
        .route("/expense-categories/:id/status", patch(set_expense_category_status))
}
