//! Deactivating a parent record closes the work that still depends on it.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

async fn set_status(app: &TestApp, uri: &str, active: bool) -> StatusCode {
    let (status, body) = app
        .send(Method::PATCH, uri, Some(json!({ "status": active })))
        .await;
    assert!(status.is_success() || status.is_client_error(), "{}", body);
    status
}

#[tokio::test]
async fn deactivating_a_customer_cancels_only_pending_reservations() {
    let app = TestApp::new().await;
    let customer = app.create_customer("CC-1001").await;
    let pending = app.create_reservation(customer).await;
    let confirmed = app.create_reservation(customer).await;

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/v1/reservations/{}/status", confirmed),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let status = set_status(&app, &format!("/api/v1/customers/{}/status", customer), false).await;
    assert_eq!(status, StatusCode::OK);

    let (_, first) = app
        .send(Method::GET, &format!("/api/v1/reservations/{}", pending), None)
        .await;
    assert_eq!(first["status"], "cancelled");
    let (_, second) = app
        .send(Method::GET, &format!("/api/v1/reservations/{}", confirmed), None)
        .await;
    assert_eq!(second["status"], "confirmed");

    // No new bookings for an inactive customer.
    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "customer_id": customer,
                "event_date": "2031-01-10T12:00:00Z",
                "event_type": "Birthday",
                "number_of_people": 30,
                "total_amount": "800.00"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deactivating_a_product_closes_its_sheets_and_pending_orders() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;
    let sheet = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;
    let pending = app
        .create(
            "/api/v1/production-orders",
            json!({ "product_id": fixture.product_id, "quantity": "4" }),
        )
        .await;
    let running = app
        .create(
            "/api/v1/production-orders",
            json!({ "product_id": fixture.product_id, "quantity": "4" }),
        )
        .await;
    app.send(
        Method::PATCH,
        &format!("/api/v1/production-orders/{}/status", running),
        Some(json!({ "status": "in_progress" })),
    )
    .await;

    let status = set_status(
        &app,
        &format!("/api/v1/products/{}/status", fixture.product_id),
        false,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, stored_sheet) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", sheet), None)
        .await;
    assert_eq!(stored_sheet["status"], false);
    assert!(!stored_sheet["end_date"].is_null());

    let (_, first) = app
        .send(
            Method::GET,
            &format!("/api/v1/production-orders/{}", pending),
            None,
        )
        .await;
    assert_eq!(first["status"], "cancelled");
    let (_, second) = app
        .send(
            Method::GET,
            &format!("/api/v1/production-orders/{}", running),
            None,
        )
        .await;
    assert_eq!(second["status"], "in_progress");

    // Sheets of an inactive product stay closed.
    let status = set_status(&app, &format!("/api/v1/spec-sheets/{}/status", sheet), true).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn deactivating_a_role_locks_out_its_users() {
    let app = TestApp::new().await;
    let token = app
        .token_with_privileges("cook@catering.test", &["customers:read"])
        .await;
    let (status, _) = app
        .send_as(Some(&token), Method::GET, "/api/v1/customers", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, users) = app
        .send(Method::GET, "/api/v1/users?search=Staff", None)
        .await;
    let staff = &users["data"][0];
    let role_id = staff["role_id"].as_i64().unwrap();

    let status = set_status(&app, &format!("/api/v1/roles/{}/status", role_id), false).await;
    assert_eq!(status, StatusCode::OK);

    let (_, user) = app
        .send(Method::GET, &format!("/api/v1/users/{}", staff["id"]), None)
        .await;
    assert_eq!(user["status"], false);

    let (status, _) = app
        .send_as(
            None,
            Method::POST,
            "/auth/login",
            Some(json!({ "email": "cook@catering.test", "password": "Staff-pass-2024" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reactivation_does_not_resurrect_cancelled_work() {
    let app = TestApp::new().await;
    let customer = app.create_customer("CC-2002").await;
    let reservation = app.create_reservation(customer).await;

    set_status(&app, &format!("/api/v1/customers/{}/status", customer), false).await;
    set_status(&app, &format!("/api/v1/customers/{}/status", customer), true).await;

    let (_, stored) = app
        .send(
            Method::GET,
            &format!("/api/v1/reservations/{}", reservation),
            None,
        )
        .await;
    assert_eq!(stored["status"], "cancelled");

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/reservations/{}", reservation),
            Some(json!({ "number_of_people": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
