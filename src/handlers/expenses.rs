use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        expenses::{CreateExpenseRequest, UpdateExpenseRequest},
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

async fn list_expenses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.expenses.list(&query, params.category_id).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = state.services.expenses.get(id).await?;
    Ok(success_response(expense))
}

async fn create_expense(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = state.services.expenses.create(payload).await?;
    Ok(created_response(expense))
}

async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = state.services.expenses.update(id, payload).await?;
    Ok(success_response(expense))
}

async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.expenses.delete(id).await?;
    Ok(no_content_response())
}

async fn set_expense_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = state
        .services
        .expenses
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(expense))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses/:id", get(get_expense))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(create_expense))
        .route("/expenses/:id", put(update_expense).delete(delete_expense))
        .route("/expenses/:id/status", patch(set_expense_status))
}
