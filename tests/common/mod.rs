#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use catering_api::{build_router, config::AppConfig, db, AppState};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@catering.test";
pub const ADMIN_PASSWORD: &str = "Admin-pass-2024";

const TEST_SECRET: &str = "k3Jq9vX2mZr7Tn4Wb8Ls1Hd6Fy0Pc5Ge-catering-signing-key-QuVoNiRaXeTu";

/// Helper harness for spinning up the application on an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
}

/// Ids of a small bakery recipe setup: one provider, one supply category,
/// flour (10 kg) and sugar (4 kg) received through a completed purchase,
/// and an active product without a spec sheet.
pub struct RecipeFixture {
    pub provider_id: i32,
    pub category_id: i32,
    pub flour_id: i32,
    pub sugar_id: i32,
    pub flour_lot: i32,
    pub sugar_lot: i32,
    pub product_id: i32,
}

impl TestApp {
    /// Construct a new test application with fresh database state and a
    /// logged-in administrator.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_SECRET.to_string(),
            3600,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.api_default_page_size = 10;
        cfg.api_max_page_size = 50;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        state
            .services
            .accounts
            .bootstrap_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("bootstrap admin")
            .expect("admin created on empty database");
        let token = state
            .services
            .accounts
            .login(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("admin login")
            .access_token;

        let router = build_router(state.clone());

        Self {
            router,
            state,
            token,
        }
    }

    /// Bearer token of the bootstrap administrator
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Request as `token`, returning the status and the decoded body (`Null` when empty).
    pub async fn send_as(
        &self,
        token: Option<&str>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body, token).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    /// Request as the administrator.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send_as(Some(self.token()), method, uri, body).await
    }

    /// POST as the administrator, asserting `201 Created`, and return the new id.
    pub async fn create(&self, uri: &str, body: Value) -> i32 {
        let (status, json) = self.send(Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "POST {} failed: {}", uri, json);
        json["id"].as_i64().expect("created id") as i32
    }

    /// Creates a role holding exactly `privileges`, a user in it, and logs
    /// that user in.
    pub async fn token_with_privileges(&self, email: &str, privileges: &[&str]) -> String {
        let role_id = self
            .create("/api/v1/roles", json!({ "name": format!("role-{}", email) }))
            .await;

        let (status, catalog) = self.send(Method::GET, "/api/v1/privileges", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = catalog
            .as_array()
            .expect("privilege list")
            .iter()
            .filter(|p| privileges.contains(&p["name"].as_str().unwrap_or_default()))
            .map(|p| p["id"].as_i64().expect("privilege id"))
            .collect();
        assert_eq!(ids.len(), privileges.len(), "unknown privilege requested");

        let (status, _) = self
            .send(
                Method::PUT,
                &format!("/api/v1/roles/{}/privileges", role_id),
                Some(json!({ "privilege_ids": ids })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        self.create(
            "/api/v1/users",
            json!({
                "name": "Staff member",
                "email": email,
                "password": "Staff-pass-2024",
                "role_id": role_id,
            }),
        )
        .await;

        self.login(email, "Staff-pass-2024").await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send_as(
                None,
                Method::POST,
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    pub async fn create_customer(&self, document: &str) -> i32 {
        self.create(
            "/api/v1/customers",
            json!({
                "name": format!("Customer {}", document),
                "document": document,
                "email": format!("{}@clients.test", document.to_lowercase()),
                "phone": "+57 300 555 1234",
            }),
        )
        .await
    }

    pub async fn create_reservation(&self, customer_id: i32) -> i32 {
        self.create(
            "/api/v1/reservations",
            json!({
                "customer_id": customer_id,
                "event_date": "2030-06-15T18:00:00Z",
                "event_type": "Wedding",
                "location": "Main hall",
                "number_of_people": 120,
                "total_amount": "4000.00",
                "advance_payment": "1000.00",
            }),
        )
        .await
    }

    pub async fn create_supply(&self, category_id: i32, name: &str) -> i32 {
        self.create(
            "/api/v1/supplies",
            json!({
                "name": name,
                "category_id": category_id,
                "unit_of_measure": "kg",
            }),
        )
        .await
    }

    /// Adds a purchase line and returns the purchase with its details.
    pub async fn add_lot(
        &self,
        provider_id: i32,
        category_id: i32,
        supply_id: i32,
        quantity: &str,
        unit_price: &str,
    ) -> Value {
        let (status, purchase) = self
            .send(
                Method::POST,
                "/api/v1/purchases/details",
                Some(json!({
                    "provider_id": provider_id,
                    "category_id": category_id,
                    "supply_id": supply_id,
                    "quantity": quantity,
                    "unit_price": unit_price,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "add lot failed: {}", purchase);
        purchase
    }

    pub async fn recipe_fixture(&self) -> RecipeFixture {
        let provider_id = self
            .create(
                "/api/v1/providers",
                json!({ "name": "Molinos del Valle", "document": "900123-4" }),
            )
            .await;
        let category_id = self
            .create("/api/v1/supply-categories", json!({ "name": "Dry goods" }))
            .await;
        let flour_id = self.create_supply(category_id, "Flour").await;
        let sugar_id = self.create_supply(category_id, "Sugar").await;

        self.add_lot(provider_id, category_id, flour_id, "10", "1.50")
            .await;
        let purchase = self
            .add_lot(provider_id, category_id, sugar_id, "4", "2.25")
            .await;

        let lot_of = |supply_id: i32| {
            purchase["details"]
                .as_array()
                .expect("purchase details")
                .iter()
                .find(|d| d["supply_id"].as_i64() == Some(supply_id as i64))
                .and_then(|d| d["id"].as_i64())
                .expect("lot for supply") as i32
        };
        let flour_lot = lot_of(flour_id);
        let sugar_lot = lot_of(sugar_id);

        let purchase_id = purchase["id"].as_i64().expect("purchase id");
        let (status, _) = self
            .send(
                Method::POST,
                &format!("/api/v1/purchases/{}/complete", purchase_id),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let product_id = self
            .create(
                "/api/v1/products",
                json!({ "name": "Vanilla cake", "price": "25.00" }),
            )
            .await;

        RecipeFixture {
            provider_id,
            category_id,
            flour_id,
            sugar_id,
            flour_lot,
            sugar_lot,
            product_id,
        }
    }

    /// Spec sheet body for the fixture's product: a 4-unit batch using
    /// 2 kg of flour and 0.5 kg of sugar.
    pub fn cake_sheet(&self, fixture: &RecipeFixture, active: bool) -> Value {
        json!({
            "product_id": fixture.product_id,
            "base_quantity": "4",
            "unit_of_measure": "unit",
            "date_effective": "2024-01-01",
            "status": active,
            "supplies": [
                {
                    "supply_id": fixture.flour_id,
                    "purchase_detail_id": fixture.flour_lot,
                    "quantity": "2",
                    "unit_of_measure": "kg"
                },
                {
                    "supply_id": fixture.sugar_id,
                    "purchase_detail_id": fixture.sugar_lot,
                    "quantity": "0.5",
                    "unit_of_measure": "kg"
                }
            ],
            "processes": [
                { "process_order": 1, "name_override": "Mix" },
                { "process_order": 2, "name_override": "Bake" }
            ]
        })
    }

    pub async fn stock_of(&self, supply_id: i32) -> Decimal {
        let (status, supply) = self
            .send(Method::GET, &format!("/api/v1/supplies/{}", supply_id), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        decimal(&supply["stock"])
    }
}

/// Decodes a JSON body, `Null` for empty bodies.
pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("json response")
}

/// Reads a decimal serialized either as a JSON string or a number.
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("expected a decimal, got {}", other),
    }
}
