//! Permission fetch failures end the session.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use backoffice_auth::AuthDecision;
use backoffice_core::traits::SessionStore;

use crate::helpers::{TestApp, live_token, user, viewable};

#[tokio::test]
async fn test_server_error_signs_out() {
    let app = TestApp::new().await;
    app.fail_permissions("1", 500).await;
    let token = live_token();
    let mut layout = app.layout(Some(&token), Some(user("admin", 1)));

    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.path, "/login");
    assert_eq!(outcome.decision, AuthDecision::AuthorizedAuthRoute);
    assert_eq!(layout.store().get_item("accessToken"), None);
    assert!(layout.gate().snapshot().is_none());
}

#[tokio::test]
async fn test_rejected_token_signs_out() {
    let app = TestApp::new().await;
    app.fail_permissions("1", 401).await;
    let mut layout = app.layout(Some(&live_token()), Some(user("admin", 1)));

    let outcome = layout.navigate("/leads").await;

    assert_eq!(outcome.path, "/login");
    assert_eq!(layout.store().get_item("accessToken"), None);
}

#[tokio::test]
async fn test_malformed_body_signs_out() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/api/rolePermissions/roles/1/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&app.server)
        .await;
    let mut layout = app.layout(Some(&live_token()), Some(user("admin", 1)));

    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.path, "/login");
}

#[tokio::test]
async fn test_missing_role_id_signs_out_without_request() {
    let app = TestApp::new().await;
    let mut layout = app.layout(Some(&live_token()), Some(json!({ "role": "admin" })));

    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.path, "/login");
    assert_eq!(layout.store().get_item("accessToken"), None);
    assert!(app.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recovers_after_signing_in_again() {
    let app = TestApp::new().await;
    let first = live_token();
    // Same claims within the same second would produce the same token.
    let second = format!("{first}x");
    Mock::given(method("GET"))
        .and(path("/api/rolePermissions/roles/1/permissions"))
        .and(header("authorization", format!("Bearer {first}")))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&app.server)
        .await;
    app.expect_permissions("1", &second, viewable(&["Dashboard"]), 1)
        .await;
    let mut layout = app.layout(Some(&first), Some(user("admin", 1)));

    assert_eq!(layout.navigate("/").await.path, "/login");

    layout.sign_in(&second, &user("admin", 1).to_string());
    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.path, "/");
    assert_eq!(outcome.decision, AuthDecision::AuthorizedProtected);
}
