//! Spec sheets are written as one aggregate: header, supply lines and
//! process steps change together or not at all.

mod common;

use axum::http::{Method, StatusCode};
use common::{decimal, TestApp};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn create_returns_header_with_lines_in_process_order() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;

    let mut body = app.cake_sheet(&fixture, true);
    body["processes"] = json!([
        { "process_order": 2, "name_override": "Bake" },
        { "process_order": 1, "name_override": "Mix" }
    ]);

    let (status, sheet) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", sheet);
    assert_eq!(sheet["product_id"], fixture.product_id);
    assert_eq!(sheet["status"], true);
    assert!(sheet["end_date"].is_null());
    assert_eq!(decimal(&sheet["base_quantity"]), dec!(4));
    assert_eq!(sheet["supplies"].as_array().unwrap().len(), 2);

    let steps: Vec<&str> = sheet["processes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name_override"].as_str().unwrap())
        .collect();
    assert_eq!(steps, vec!["Mix", "Bake"]);
}

#[tokio::test]
async fn activating_a_sheet_supersedes_the_previous_one() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;

    let first = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;
    let second = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;

    let (_, old) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", first), None)
        .await;
    assert_eq!(old["status"], false);
    assert!(!old["end_date"].is_null(), "superseded sheet gets an end date");

    let (status, active) = app
        .send(
            Method::GET,
            &format!(
                "/api/v1/spec-sheets?product_id={}&status=active",
                fixture.product_id
            ),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["pagination"]["total"], 1);
    assert_eq!(active["data"][0]["id"], second);

    // Re-activating the first sheet flips them back.
    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/v1/spec-sheets/{}/status", first),
            Some(json!({ "status": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, second_sheet) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", second), None)
        .await;
    assert_eq!(second_sheet["status"], false);
}

#[tokio::test]
async fn inactive_sheet_does_not_touch_the_active_one() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;

    let active = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;
    app.create("/api/v1/spec-sheets", app.cake_sheet(&fixture, false))
        .await;

    let (_, sheet) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", active), None)
        .await;
    assert_eq!(sheet["status"], true);
}

#[tokio::test]
async fn update_replaces_the_full_set_of_lines() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;
    let id = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;

    let body = json!({
        "product_id": fixture.product_id,
        "base_quantity": "2",
        "unit_of_measure": "unit",
        "date_effective": "2024-02-01",
        "supplies": [{
            "supply_id": fixture.flour_id,
            "purchase_detail_id": fixture.flour_lot,
            "quantity": "1.5",
            "unit_of_measure": "kg"
        }]
    });
    let (status, sheet) = app
        .send(Method::PUT, &format!("/api/v1/spec-sheets/{}", id), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", sheet);

    let (_, stored) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", id), None)
        .await;
    assert_eq!(decimal(&stored["base_quantity"]), dec!(2));
    let supplies = stored["supplies"].as_array().unwrap();
    assert_eq!(supplies.len(), 1);
    assert_eq!(supplies[0]["supply_id"], fixture.flour_id);
    assert_eq!(decimal(&supplies[0]["quantity"]), dec!(1.5));
    assert!(stored["processes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn failed_update_leaves_the_sheet_untouched() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;
    let id = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;

    let mut body = app.cake_sheet(&fixture, true);
    body["base_quantity"] = json!("8");
    body["supplies"][1]["supply_id"] = json!(9999);

    let (status, error) = app
        .send(Method::PUT, &format!("/api/v1/spec-sheets/{}", id), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("9999"));

    let (_, stored) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", id), None)
        .await;
    assert_eq!(decimal(&stored["base_quantity"]), dec!(4));
    assert_eq!(stored["supplies"].as_array().unwrap().len(), 2);
    assert_eq!(stored["processes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_create_writes_nothing() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;

    // Sugar line pointing at the flour lot.
    let mut body = app.cake_sheet(&fixture, true);
    body["supplies"][1]["purchase_detail_id"] = json!(fixture.flour_lot);

    let (status, error) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("is not a lot of supply"));

    let (_, list) = app.send(Method::GET, "/api/v1/spec-sheets", None).await;
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn failed_active_create_keeps_the_current_sheet() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;
    let current = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;

    let mut body = app.cake_sheet(&fixture, true);
    body["supplies"][1]["purchase_detail_id"] = json!(fixture.flour_lot);
    let (status, _) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", current), None)
        .await;
    assert_eq!(stored["status"], true);
    assert!(stored["end_date"].is_null());

    let (_, list) = app.send(Method::GET, "/api/v1/spec-sheets", None).await;
    assert_eq!(list["pagination"]["total"], 1);
}

#[tokio::test]
async fn update_without_status_keeps_the_stored_flag() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;
    let active = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;
    let draft = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, false))
        .await;

    let mut body = app.cake_sheet(&fixture, false);
    body.as_object_mut().unwrap().remove("status");
    body["base_quantity"] = json!("6");
    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/v1/spec-sheets/{}", draft),
            Some(body),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    assert_eq!(updated["status"], false);
    assert_eq!(decimal(&updated["base_quantity"]), dec!(6));

    let (_, current) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", active), None)
        .await;
    assert_eq!(current["status"], true);
    assert!(current["end_date"].is_null());
}

#[tokio::test]
async fn line_sets_are_validated() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;

    let mut empty = app.cake_sheet(&fixture, true);
    empty["supplies"] = json!([]);
    let (status, error) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(empty))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = error["errors"]
        .as_array()
        .expect("field errors")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"supplies"));

    let mut duplicated = app.cake_sheet(&fixture, true);
    duplicated["processes"][1]["process_order"] = json!(1);
    let (status, _) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(duplicated))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unnamed = app.cake_sheet(&fixture, true);
    unnamed["processes"] = json!([{ "process_order": 1 }]);
    let (status, _) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(unnamed))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn process_steps_can_reference_catalog_processes() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;
    let process_id = app
        .create(
            "/api/v1/processes",
            json!({ "name": "Proofing", "description": "Let the dough rest" }),
        )
        .await;

    let mut body = app.cake_sheet(&fixture, true);
    body["processes"] = json!([{ "process_id": process_id, "process_order": 1 }]);
    let (status, sheet) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", sheet);
    assert_eq!(sheet["processes"][0]["process_id"], process_id);

    let mut missing = app.cake_sheet(&fixture, true);
    missing["processes"] = json!([{ "process_id": 4242, "process_order": 1 }]);
    let (status, _) = app
        .send(Method::POST, "/api/v1/spec-sheets", Some(missing))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sheet_in_use_cannot_be_deleted() {
    let app = TestApp::new().await;
    let fixture = app.recipe_fixture().await;
    let used = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, true))
        .await;
    app.create(
        "/api/v1/production-orders",
        json!({ "product_id": fixture.product_id, "quantity": "4" }),
    )
    .await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/spec-sheets/{}", used), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let unused = app
        .create("/api/v1/spec-sheets", app.cake_sheet(&fixture, false))
        .await;
    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/spec-sheets/{}", unused), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app
        .send(Method::GET, &format!("/api/v1/spec-sheets/{}", unused), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
