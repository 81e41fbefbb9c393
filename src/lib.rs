//! Catering API Library
//!
//! Administrative backend for a catering business: customers and their event
//! reservations, employees, providers, supplies and purchases, products with
//! their spec sheets (recipes), production orders, expenses, and role-based
//! access control.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{response::Json, routing::get, Extension, Router};
use http::HeaderValue;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

use crate::auth::consts as perm;
use crate::auth::{AuthConfig, AuthRouterExt, AuthService};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wires the auth service and every domain service onto one connection pool
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let auth = Arc::new(AuthService::new(AuthConfig::from(&config)));
        let services = handlers::AppServices::new(db.clone(), auth.clone());
        Self {
            db,
            config,
            services,
            auth,
        }
    }
}

/// Versioned API. Every resource exposes a read router gated by
/// `<resource>:read` and a write router gated by `<resource>:write`.
pub fn api_v1_routes() -> Router<AppState> {
    let customers = handlers::customers::read_routes()
        .with_permission(perm::CUSTOMERS_READ)
        .merge(handlers::customers::write_routes().with_permission(perm::CUSTOMERS_WRITE));

    let reservations = handlers::reservations::read_routes()
        .with_permission(perm::RESERVATIONS_READ)
        .merge(handlers::reservations::write_routes().with_permission(perm::RESERVATIONS_WRITE));

    let employees = handlers::employees::read_routes()
        .with_permission(perm::EMPLOYEES_READ)
        .merge(handlers::employees::write_routes().with_permission(perm::EMPLOYEES_WRITE));

    let providers = handlers::providers::read_routes()
        .with_permission(perm::PROVIDERS_READ)
        .merge(handlers::providers::write_routes().with_permission(perm::PROVIDERS_WRITE));

    let supply_categories = handlers::supply_categories::read_routes()
        .with_permission(perm::SUPPLY_CATEGORIES_READ)
        .merge(
            handlers::supply_categories::write_routes()
                .with_permission(perm::SUPPLY_CATEGORIES_WRITE),
        );

    let supplies = handlers::supplies::read_routes()
        .with_permission(perm::SUPPLIES_READ)
        .merge(handlers::supplies::write_routes().with_permission(perm::SUPPLIES_WRITE));

    let purchases = handlers::purchases::read_routes()
        .with_permission(perm::PURCHASES_READ)
        .merge(handlers::purchases::write_routes().with_permission(perm::PURCHASES_WRITE));

    let products = handlers::products::read_routes()
        .with_permission(perm::PRODUCTS_READ)
        .merge(handlers::products::write_routes().with_permission(perm::PRODUCTS_WRITE));

    let processes = handlers::processes::read_routes()
        .with_permission(perm::PROCESSES_READ)
        .merge(handlers::processes::write_routes().with_permission(perm::PROCESSES_WRITE));

    let spec_sheets = handlers::spec_sheets::read_routes()
        .with_permission(perm::SPEC_SHEETS_READ)
        .merge(handlers::spec_sheets::write_routes().with_permission(perm::SPEC_SHEETS_WRITE));

    let production_orders = handlers::production_orders::read_routes()
        .with_permission(perm::PRODUCTION_ORDERS_READ)
        .merge(
            handlers::production_orders::write_routes()
                .with_permission(perm::PRODUCTION_ORDERS_WRITE),
        );

    let expense_categories = handlers::expense_categories::read_routes()
        .with_permission(perm::EXPENSE_CATEGORIES_READ)
        .merge(
            handlers::expense_categories::write_routes()
                .with_permission(perm::EXPENSE_CATEGORIES_WRITE),
        );

    let expenses = handlers::expenses::read_routes()
        .with_permission(perm::EXPENSES_READ)
        .merge(handlers::expenses::write_routes().with_permission(perm::EXPENSES_WRITE));

    let roles = handlers::roles::read_routes()
        .with_permission(perm::ROLES_READ)
        .merge(handlers::roles::write_routes().with_permission(perm::ROLES_WRITE));

    let users = handlers::users::read_routes()
        .with_permission(perm::USERS_READ)
        .merge(handlers::users::write_routes().with_permission(perm::USERS_WRITE));

    Router::new()
        .route("/status", get(api_status))
        // People
        .merge(customers)
        .merge(reservations)
        .merge(employees)
        .merge(providers)
        // Inventory
        .merge(supply_categories)
        .merge(supplies)
        .merge(purchases)
        // Production
        .merge(products)
        .merge(processes)
        .merge(spec_sheets)
        .merge(production_orders)
        // Expenses
        .merge(expense_categories)
        .merge(expenses)
        // Access control
        .merge(roles)
        .merge(users)
}

async fn api_status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "catering-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// CORS from config: explicit origins when configured, permissive in
/// development or when opted in, same-origin only otherwise.
pub fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.should_allow_permissive_cors() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    }
}

/// Full application router: health probes, `/auth`, `/api/v1` and the
/// shared middleware stack.
pub fn build_router(state: AppState) -> Router {
    let auth_service = state.auth.clone();
    let timeout = state.config.request_timeout();
    let cors = cors_layer(&state.config);

    Router::<AppState>::new()
        .route("/", get(|| async { "catering-api up" }))
        .nest("/health", handlers::health::health_routes())
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/api/v1", api_v1_routes())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        // Inject AuthService into request extensions for auth middleware
        .layer(Extension(auth_service))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}

pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::db::*;
    pub use crate::errors::*;
    pub use crate::repositories::{ListQuery, Page};
    pub use crate::{build_router, AppState};
}
