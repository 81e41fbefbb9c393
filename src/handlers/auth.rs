use super::common::{no_content_response, success_response, ValidatedJson};
use crate::{
    auth::{AuthRouterExt, AuthUser},
    dto::access::LoginRequest,
    entities::user,
    errors::ApiError,
    AppState,
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tracing::info;

/// Authenticated user as returned by `/auth/me`
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    #[serde(flatten)]
    pub user: user::Model,
    pub role: String,
    pub permissions: Vec<String>,
}

/// Exchange email and password for a bearer token
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state
        .services
        .accounts
        .login(&payload.email, &payload.password)
        .await?;
    Ok(success_response(token))
}

async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.services.accounts.profile(auth_user.user_id).await?;
    Ok(success_response(CurrentUser {
        user,
        role: auth_user.role,
        permissions: auth_user.permissions,
    }))
}

/// Revokes the presented token until it expires
async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> impl IntoResponse {
    state
        .auth
        .revoke(&auth_user.token_id, auth_user.expires_at)
        .await;
    info!(user_id = auth_user.user_id, "User logged out");
    no_content_response()
}

pub fn auth_routes() -> Router<AppState> {
    let session = Router::new()
        .route("/me", get(me))
        .route("/logout", post(logout))
        .with_auth();

    Router::new().route("/login", post(login)).merge(session)
}
