use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::people::{CreateReservationRequest, ReservationStatusRequest, UpdateReservationRequest},
    errors::ApiError,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post, put},
    Router,
};

/// List reservations; `status` takes a lifecycle value such as `pending`
async fn list_reservations(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state
        .services
        .reservations
        .list(&query, params.customer_id)
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state.services.reservations.get(id).await?;
    Ok(success_response(reservation))
}

async fn create_reservation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state.services.reservations.create(payload).await?;
    Ok(created_response(reservation))
}

async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state.services.reservations.update(id, payload).await?;
    Ok(success_response(reservation))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.reservations.delete(id).await?;
    Ok(no_content_response())
}

async fn set_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ReservationStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reservation = state
        .services
        .reservations
        .set_status(id, payload.status)
        .await?;
    Ok(success_response(reservation))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list_reservations))
        .route("/reservations/:id", get(get_reservation))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(create_reservation))
        .route(
            "/reservations/:id",
            put(update_reservation).delete(delete_reservation),
        )
        .route("/reservations/:id/status", patch(set_reservation_status))
}
