//! Login and first-run provisioning of the administrator account.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        password::{hash_password, verify_password},
        AuthService, TokenResponse, TokenSubject, ADMIN_ROLE,
    },
    entities::{role, user},
    errors::ServiceError,
    repositories::{self, role_repository},
};

#[derive(Clone)]
pub struct AccountService {
    db: Arc<DatabaseConnection>,
    auth: Arc<AuthService>,
}

impl AccountService {
    pub fn new(db: Arc<DatabaseConnection>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Verifies the credentials and issues an access token. Inactive users
    /// and users of inactive roles cannot log in.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ServiceError> {
        let invalid = || ServiceError::Unauthorized("Invalid email or password".to_string());

        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash) {
            warn!(user_id = user.id, "Failed login attempt");
            return Err(invalid());
        }
        if !user.status {
            return Err(ServiceError::Unauthorized("Account is inactive".to_string()));
        }

        let role = repositories::require::<role::Entity, _>(self.db.as_ref(), user.role_id).await?;
        if !role.status {
            return Err(ServiceError::Unauthorized(format!(
                "Role {} is inactive",
                role.name
            )));
        }

        let permissions = role_repository::privilege_names(self.db.as_ref(), &role).await?;
        let token = self
            .auth
            .generate_token(&TokenSubject {
                user_id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
                role: role.name.clone(),
                permissions,
            })
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;

        info!(user_id = user.id, role = %role.name, "User logged in");
        Ok(token)
    }

    /// Current record of the authenticated user
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: i32) -> Result<user::Model, ServiceError> {
        repositories::require::<user::Entity, _>(self.db.as_ref(), user_id).await
    }

    /// Creates an administrator when the users table is empty.
    pub async fn bootstrap_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        bootstrap_admin(self.db.as_ref(), email, password).await
    }
}

/// Creates an administrator bound to the seeded `admin` role when the
/// users table is empty. Returns `None` when users already exist.
#[instrument(skip(db, password))]
pub async fn bootstrap_admin<C: ConnectionTrait>(
    db: &C,
    email: &str,
    password: &str,
) -> Result<Option<user::Model>, ServiceError> {
    let existing = user::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(None);
    }

    let admin_role = role::Entity::find()
        .filter(role::Column::Name.eq(ADMIN_ROLE))
        .one(db)
        .await?
        .ok_or_else(|| {
            ServiceError::InternalError(format!("Seeded role '{}' is missing", ADMIN_ROLE))
        })?;

    let now = Utc::now();
    let admin = user::ActiveModel {
        name: Set("Administrator".to_string()),
        email: Set(email.trim().to_lowercase()),
        password_hash: Set(hash_password(password)?),
        role_id: Set(admin_role.id),
        status: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = admin.id, "Bootstrap administrator created");
    Ok(Some(admin))
}
