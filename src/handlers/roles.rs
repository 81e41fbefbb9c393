use super::common::{
    created_response, no_content_response, success_response, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::{
    dto::{
        access::{CreateRoleRequest, RolePrivilegesRequest, UpdateRoleRequest},
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

async fn list_roles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.to_query(&state.config);
    let page = state.services.roles.list(&query).await?;
    Ok(success_response(PaginatedResponse::from_page(page, &query)))
}

/// Role with its granted privileges
async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let role = state.services.roles.get(id).await?;
    Ok(success_response(role))
}

/// Catalog of grantable privileges
async fn list_privileges(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let privileges = state.services.roles.list_privileges().await?;
    Ok(success_response(privileges))
}

async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = state.services.roles.create(payload).await?;
    Ok(created_response(role))
}

async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = state.services.roles.update(id, payload).await?;
    Ok(success_response(role))
}

async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.roles.delete(id).await?;
    Ok(no_content_response())
}

/// Deactivating a role deactivates its users
async fn set_role_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = state.services.roles.set_status(id, payload.status).await?;
    Ok(success_response(role))
}

async fn set_role_privileges(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<RolePrivilegesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = state
        .services
        .roles
        .set_privileges(id, payload.privilege_ids)
        .await?;
    Ok(success_response(role))
}

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(list_roles))
        .route("/roles/:id", get(get_role))
        .route("/privileges", get(list_privileges))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", post(create_role))
        .route("/roles/:id", put(update_role).delete(delete_role))
        .route("/roles/:id/status", patch(set_role_status))
        .route("/roles/:id/privileges", put(set_role_privileges))
}
