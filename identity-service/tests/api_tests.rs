mod common;

use chrono::Duration;
use common::TestApp;
use common::JWT_SECRET;
use reqwest::StatusCode;
use serde_json::json;

async fn token_from(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["token"]
        .as_str()
        .expect("token missing from response")
        .to_string()
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("Ana", "Lee", "ana@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    let token = body["data"]["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let identity = app.token_service.validate(token).expect("Token should validate");
    assert_eq!(identity.subject, "ana@x.com");
    assert_eq!(identity.role.as_deref(), Some("USER"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.register("Ana", "Lee", "ana@x.com", "pw123").await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.register("Ana", "Other", "ana@x.com", "other").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = second.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already registered"));
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_concurrent_duplicates() {
    let app = TestApp::spawn().await;

    let (a, b) = tokio::join!(
        app.register("Ana", "Lee", "race@x.com", "pw123"),
        app.register("Ana", "Lee", "race@x.com", "pw456"),
    );

    let statuses = [a.status(), b.status()];
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::CONFLICT)
            .count(),
        1
    );
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("Ana", "Lee", "not-an-email", "pw123").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_empty_fields() {
    let app = TestApp::spawn().await;

    let empty_name = app.register("", "Lee", "ana@x.com", "pw123").await;
    assert_eq!(empty_name.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let empty_password = app.register("Ana", "Lee", "ana@x.com", "").await;
    assert_eq!(empty_password.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_rejects_bad_bodies_in_envelope() {
    let app = TestApp::spawn().await;

    let missing_field = app
        .post("/api/v1/auth/register")
        .json(&json!({ "lastName": "Lee", "email": "ana@x.com", "password": "pw123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing_field.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = missing_field.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 422);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("firstName"));

    let broken_json = app
        .post("/api/v1/auth/authenticate")
        .header("Content-Type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(broken_json.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = broken_json.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
    assert!(body["data"]["message"].is_string());

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_authenticate_success() {
    let app = TestApp::spawn().await;
    app.register("Ana", "Lee", "ana@x.com", "pw123").await;

    let response = app.authenticate("ana@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = token_from(response).await;
    let identity = app.token_service.validate(&token).expect("Token should validate");
    assert_eq!(identity.subject, "ana@x.com");
}

#[tokio::test]
async fn test_authenticate_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Ana", "Lee", "ana@x.com", "pw123").await;

    let wrong_password = app.authenticate("ana@x.com", "wrong").await;
    let unknown_email = app.authenticate("ghost@x.com", "pw123").await;
    let malformed_email = app.authenticate("ghost", "pw123").await;
    let other_case = app.authenticate("ANA@x.com", "pw123").await;

    let mut bodies = Vec::new();
    for response in [wrong_password, unknown_email, malformed_email, other_case] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        bodies.push(body);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(bodies[0]["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let missing = app
        .get("/api/v1/demo-controller")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .get_authenticated("/api/v1/demo-controller", "invalid")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let wrong_scheme = app
        .get("/api/v1/demo-controller")
        .header("Authorization", "Basic YW5hOnB3MTIz")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_foreign_and_expired_tokens() {
    let app = TestApp::spawn().await;

    let foreign = auth::TokenService::new(
        b"some-other-secret-key-for-jwt-signing-32b",
        Duration::hours(24),
    )
    .issue("ana@x.com", "USER")
    .unwrap();
    let response = app
        .get_authenticated("/api/v1/demo-controller", &foreign.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let expired = auth::TokenService::new(JWT_SECRET, Duration::seconds(-5))
        .issue("ana@x.com", "USER")
        .unwrap();
    let response = app
        .get_authenticated("/api/v1/demo-controller", &expired.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_full_workflow() {
    let app = TestApp::spawn().await;

    // 1. Register
    let register_response = app.register("Ana", "Lee", "ana@x.com", "pw123").await;
    assert_eq!(register_response.status(), StatusCode::OK);
    let registration_token = token_from(register_response).await;
    assert_eq!(
        app.token_service
            .validate(&registration_token)
            .unwrap()
            .subject,
        "ana@x.com"
    );

    // 2. Wrong password
    let rejected = app.authenticate("ana@x.com", "wrong").await;
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

    // 3. Login
    let login_response = app.authenticate("ana@x.com", "pw123").await;
    assert_eq!(login_response.status(), StatusCode::OK);
    let token = token_from(login_response).await;

    // 4. Access protected endpoint
    let response = app
        .get_authenticated("/api/v1/demo-controller", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status_code": 200, "data": "Hello from secure controller" }));
}
