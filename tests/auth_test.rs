mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn login_issues_a_bearer_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_as(
            None,
            Method::POST,
            "/auth/login",
            Some(json!({ "email": "ADMIN@catering.test", "password": ADMIN_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["expires_in"].as_i64().unwrap() > 0);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_credentials_are_rejected_alike() {
    let app = TestApp::new().await;

    let (status, wrong_password) = app
        .send_as(
            None,
            Method::POST,
            "/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": "not-the-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = app
        .send_as(
            None,
            Method::POST,
            "/auth/login",
            Some(json!({ "email": "ghost@catering.test", "password": "whatever-123" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["message"], unknown_user["message"]);
}

#[tokio::test]
async fn me_describes_the_token_holder() {
    let app = TestApp::new().await;

    let (status, me) = app.send(Method::GET, "/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], ADMIN_EMAIL);
    assert_eq!(me["role"], "admin");
    assert!(me.get("password_hash").is_none());

    let permissions: Vec<&str> = me["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap())
        .collect();
    assert!(permissions.contains(&"spec_sheets:write"));
    assert!(permissions.contains(&"users:read"));
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = TestApp::new().await;
    let token = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, _) = app
        .send_as(Some(&token), Method::POST, "/auth/logout", None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send_as(Some(&token), Method::GET, "/auth/me", None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_REVOKED_TOKEN");

    // Other sessions are unaffected.
    let (status, _) = app.send(Method::GET, "/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn inactive_users_cannot_log_in() {
    let app = TestApp::new().await;
    app.token_with_privileges("waiter@catering.test", &["reservations:read"])
        .await;

    let (_, users) = app
        .send(Method::GET, "/api/v1/users?search=Staff", None)
        .await;
    let user_id = users["data"][0]["id"].as_i64().unwrap();

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/v1/users/{}/status", user_id),
            Some(json!({ "status": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send_as(
            None,
            Method::POST,
            "/auth/login",
            Some(json!({ "email": "waiter@catering.test", "password": "Staff-pass-2024" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Account is inactive"));
}

#[tokio::test]
async fn user_emails_are_unique_and_passwords_are_hashed() {
    let app = TestApp::new().await;
    let role = app
        .create("/api/v1/roles", json!({ "name": "kitchen" }))
        .await;

    let body = json!({
        "name": "Chef",
        "email": "chef@catering.test",
        "password": "Chef-pass-2024",
        "role_id": role,
    });
    let (status, created) = app
        .send(Method::POST, "/api/v1/users", Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let (status, _) = app.send(Method::POST, "/api/v1/users", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A role with users cannot be deleted.
    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/roles/{}", role), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
