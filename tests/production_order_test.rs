mod common;

use axum::http::{Method, StatusCode};
use common::{decimal, RecipeFixture, TestApp};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

async fn with_active_sheet(app: &TestApp) -> (RecipeFixture, i32) {
    let fixture = app.recipe_fixture().await;
    let sheet_id = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;
    (fixture, sheet_id)
}

async fn move_to(app: &TestApp, order_id: i32, status: &str) -> (StatusCode, Value) {
    app.send(
        Method::PATCH,
        &format!("/api/v1/production-orders/{}/status", order_id),
        Some(json!({ "status": status })),
    )
    .await
}

#[tokio::test]
async fn new_orders_use_the_active_sheet_and_start_pending() {
    let app = TestApp::new().await;
    let (fixture, sheet_id) = with_active_sheet(&app).await;

    let (status, order) = app
        .send(
            Method::POST,
            "/api/v1/production-orders",
            Some(json!({ "product_id": fixture.product_id, "quantity": "8" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", order);
    assert_eq!(order["spec_sheet_id"], sheet_id);
    assert_eq!(order["status"], "pending");
    assert_eq!(decimal(&order["quantity"]), dec!(8));
}

#[tokio::test]
async fn completing_an_order_draws_the_recipe_from_stock() {
    let app = TestApp::new().await;
    let (fixture, _) = with_active_sheet(&app).await;
    let order_id = app
        .create(
            "/api/v1/production-orders",
            json!({ "product_id": fixture.product_id, "quantity": "8" }),
        )
        .await;

    // Completion needs the order to be in progress first.
    let (status, _) = move_to(&app, order_id, "completed").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = move_to(&app, order_id, "in_progress").await;
    assert_eq!(status, StatusCode::OK);
    let (status, order) = move_to(&app, order_id, "completed").await;
    assert_eq!(status, StatusCode::OK, "{}", order);
    assert_eq!(order["status"], "completed");

    // 8 units of a 4-unit recipe: 4 kg flour, 1 kg sugar.
    assert_eq!(app.stock_of(fixture.flour_id).await, dec!(6));
    assert_eq!(app.stock_of(fixture.sugar_id).await, dec!(3));

    let (status, _) = move_to(&app, order_id, "cancelled").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn a_shortage_on_any_supply_consumes_nothing() {
    let app = TestApp::new().await;
    let (fixture, _) = with_active_sheet(&app).await;
    // 24 units need 12 kg flour (10 in stock) and 3 kg sugar (4 in stock).
    let order_id = app
        .create(
            "/api/v1/production-orders",
            json!({ "product_id": fixture.product_id, "quantity": "24" }),
        )
        .await;
    move_to(&app, order_id, "in_progress").await;

    let (status, error) = move_to(&app, order_id, "completed").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["message"].as_str().unwrap().contains("Flour"));

    assert_eq!(app.stock_of(fixture.flour_id).await, dec!(10));
    assert_eq!(app.stock_of(fixture.sugar_id).await, dec!(4));
    let (_, order) = app
        .send(
            Method::GET,
            &format!("/api/v1/production-orders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(order["status"], "in_progress");
}

#[tokio::test]
async fn orders_need_an_active_sheet_for_their_product() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;

    let (status, error) = app
        .send(
            Method::POST,
            "/api/v1/production-orders",
            Some(json!({ "product_id": fixture.product_id, "quantity": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("no active spec sheet"));

    let inactive = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, false))
        .await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/production-orders",
            Some(json!({
                "product_id": fixture.product_id,
                "spec_sheet_id": inactive,
                "quantity": "1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn orders_in_progress_are_locked() {
    let app = TestApp::new().await;
    let (fixture, _) = with_active_sheet(&app).await;
    let order_id = app
        .create(
            "/api/v1/production-orders",
            json!({ "product_id": fixture.product_id, "quantity": "2" }),
        )
        .await;

    let (status, edited) = app
        .send(
            Method::PUT,
            &format!("/api/v1/production-orders/{}", order_id),
            Some(json!({ "quantity": "3", "notes": "Extra tray" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["notes"], "Extra tray");

    move_to(&app, order_id, "in_progress").await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/production-orders/{}", order_id),
            Some(json!({ "quantity": "5" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/production-orders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = move_to(&app, order_id, "cancelled").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/production-orders/{}", order_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_status_values_are_rejected() {
    let app = TestApp::new().await;
    let (fixture, _) = with_active_sheet(&app).await;
    let order_id = app
        .create(
            "/api/v1/production-orders",
            json!({ "product_id": fixture.product_id, "quantity": "1" }),
        )
        .await;

    let (status, _) = move_to(&app, order_id, "shipped").await;
    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::NOT_FOUND);
}
