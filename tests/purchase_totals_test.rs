mod common;

use axum::http::{Method, StatusCode};
use common::{decimal, TestApp};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

struct Setup {
    provider_id: i32,
    category_id: i32,
    rice_id: i32,
    beans_id: i32,
}

async fn setup(app: &TestApp) -> Setup {
    let provider_id = app
        .create(
            "/api/v1/providers",
            json!({ "name": "Granos SAS", "document": "800456-1", "contact_name": "Lucia" }),
        )
        .await;
    let category_id = app
        .create("/api/v1/supply-categories", json!({ "name": "Grains" }))
        .await;
    let rice_id = app.create_supply(category_id, "Rice").await;
    let beans_id = app.create_supply(category_id, "Beans").await;
    Setup {
        provider_id,
        category_id,
        rice_id,
        beans_id,
    }
}

fn detail_for(purchase: &Value, supply_id: i32) -> i64 {
    purchase["details"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["supply_id"] == supply_id)
        .and_then(|d| d["id"].as_i64())
        .expect("detail for supply")
}

#[tokio::test]
async fn lines_for_the_same_provider_and_category_share_one_pending_purchase() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    let first = app
        .add_lot(s.provider_id, s.category_id, s.rice_id, "10", "1.50")
        .await;
    let second = app
        .add_lot(s.provider_id, s.category_id, s.beans_id, "4", "2.25")
        .await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["status"], "pending");
    assert_eq!(second["details"].as_array().unwrap().len(), 2);
    assert_eq!(decimal(&second["subtotal_amount"]), dec!(24));
    assert_eq!(decimal(&second["total_amount"]), dec!(24));

    let beans = &second["details"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["supply_id"] == s.beans_id)
        .unwrap()
        .clone();
    assert_eq!(decimal(&beans["subtotal"]), dec!(9));
}

#[tokio::test]
async fn editing_and_removing_lines_recomputes_the_totals() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    app.add_lot(s.provider_id, s.category_id, s.rice_id, "10", "1.50")
        .await;
    let purchase = app
        .add_lot(s.provider_id, s.category_id, s.beans_id, "4", "2.25")
        .await;
    let rice_line = detail_for(&purchase, s.rice_id);
    let beans_line = detail_for(&purchase, s.beans_id);

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/v1/purchases/details/{}", rice_line),
            Some(json!({ "quantity": "20" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    // 20 × 1.50 + 4 × 2.25
    assert_eq!(decimal(&updated["total_amount"]), dec!(39));

    let (status, after_delete) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/purchases/details/{}", beans_line),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after_delete["details"].as_array().unwrap().len(), 1);
    assert_eq!(decimal(&after_delete["total_amount"]), dec!(30));
    assert_eq!(decimal(&after_delete["subtotal_amount"]), dec!(30));
}

#[tokio::test]
async fn completing_adds_every_lot_to_stock_and_freezes_the_purchase() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    app.add_lot(s.provider_id, s.category_id, s.rice_id, "10", "1.50")
        .await;
    let purchase = app
        .add_lot(s.provider_id, s.category_id, s.beans_id, "4", "2.25")
        .await;
    let purchase_id = purchase["id"].as_i64().unwrap();
    let rice_line = detail_for(&purchase, s.rice_id);

    let (status, completed) = app
        .send(
            Method::POST,
            &format!("/api/v1/purchases/{}/complete", purchase_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["status"], "completed");
    assert_eq!(app.stock_of(s.rice_id).await, dec!(10));
    assert_eq!(app.stock_of(s.beans_id).await, dec!(4));

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/purchases/details/{}", rice_line),
            Some(json!({ "quantity": "1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/v1/purchases/{}/complete", purchase_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The next line opens a fresh purchase.
    let next = app
        .add_lot(s.provider_id, s.category_id, s.rice_id, "5", "1.50")
        .await;
    assert_ne!(next["id"].as_i64().unwrap(), purchase_id);
    assert_eq!(decimal(&next["total_amount"]), dec!(7.5));
}

#[tokio::test]
async fn an_empty_purchase_cannot_be_completed_but_can_be_cancelled() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    let purchase = app
        .add_lot(s.provider_id, s.category_id, s.rice_id, "10", "1.50")
        .await;
    let purchase_id = purchase["id"].as_i64().unwrap();
    let line = detail_for(&purchase, s.rice_id);
    app.send(
        Method::DELETE,
        &format!("/api/v1/purchases/details/{}", line),
        None,
    )
    .await;

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/v1/purchases/{}/complete", purchase_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, cancelled) = app
        .send(
            Method::POST,
            &format!("/api/v1/purchases/{}/cancel", purchase_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(app.stock_of(s.rice_id).await, dec!(0));

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/v1/purchases/{}/cancel", purchase_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn lines_must_reference_consistent_active_records() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    let other_category = app
        .create("/api/v1/supply-categories", json!({ "name": "Dairy" }))
        .await;
    let milk = app.create_supply(other_category, "Milk").await;

    let line = |provider_id: i32, category_id: i32, supply_id: i32| {
        json!({
            "provider_id": provider_id,
            "category_id": category_id,
            "supply_id": supply_id,
            "quantity": "1",
            "unit_price": "1.00",
        })
    };

    // Supply outside the category.
    let (status, error) = app
        .send(
            Method::POST,
            "/api/v1/purchases/details",
            Some(line(s.provider_id, s.category_id, milk)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("does not belong"));

    // Unknown provider.
    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/purchases/details",
            Some(line(777, s.category_id, s.rice_id)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Inactive provider.
    app.send(
        Method::PATCH,
        &format!("/api/v1/providers/{}/status", s.provider_id),
        Some(json!({ "status": false })),
    )
    .await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/purchases/details",
            Some(line(s.provider_id, s.category_id, s.rice_id)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive quantity never reaches the service.
    let mut zero = line(s.provider_id, s.category_id, s.rice_id);
    zero["quantity"] = json!("0");
    let (status, error) = app
        .send(Method::POST, "/api/v1/purchases/details", Some(zero))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["errors"][0]["field"], "quantity");

    let (_, list) = app.send(Method::GET, "/api/v1/purchases", None).await;
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn purchases_can_be_filtered_by_provider_and_status() {
    let app = TestApp::new().await;
    let s = setup(&app).await;
    let other_provider = app
        .create(
            "/api/v1/providers",
            json!({ "name": "Lacteos Norte", "document": "811222-5" }),
        )
        .await;

    let first = app
        .add_lot(s.provider_id, s.category_id, s.rice_id, "1", "1.00")
        .await;
    app.add_lot(other_provider, s.category_id, s.rice_id, "1", "1.00")
        .await;
    app.send(
        Method::POST,
        &format!("/api/v1/purchases/{}/complete", first["id"]),
        None,
    )
    .await;

    let (_, by_provider) = app
        .send(
            Method::GET,
            &format!("/api/v1/purchases?provider_id={}", s.provider_id),
            None,
        )
        .await;
    assert_eq!(by_provider["pagination"]["total"], 1);

    let (_, pending) = app
        .send(Method::GET, "/api/v1/purchases?status=pending", None)
        .await;
    assert_eq!(pending["pagination"]["total"], 1);
    assert_eq!(pending["data"][0]["provider_id"], other_provider);

    let (status, _) = app
        .send(Method::GET, "/api/v1/purchases?status=shipped", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn amounts_beyond_the_columns_are_bad_requests() {
    let app = TestApp::new().await;
    let s = setup(&app).await;

    let line = |quantity: &str, unit_price: &str| {
        json!({
            "provider_id": s.provider_id,
            "category_id": s.category_id,
            "supply_id": s.rice_id,
            "quantity": quantity,
            "unit_price": unit_price,
        })
    };

    // Rejected by the field bounds.
    let (status, error) = app
        .send(
            Method::POST,
            "/api/v1/purchases/details",
            Some(line("79228162514264337593543950335", "2")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["errors"][0]["field"], "quantity");

    // Each field fits but their product does not.
    let (status, error) = app
        .send(
            Method::POST,
            "/api/v1/purchases/details",
            Some(line("99999999999", "99999999999")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"]
        .as_str()
        .unwrap()
        .contains("Line subtotal is out of range"));

    let (_, list) = app.send(Method::GET, "/api/v1/purchases", None).await;
    assert_eq!(list["pagination"]["total"], 0);
}
