//! Token expiry, public routes, and signing back in.

use chrono::Duration;

use backoffice_auth::AuthDecision;
use backoffice_core::traits::SessionStore;

use crate::helpers::{TestApp, live_token, token_expiring_in, user, viewable};

#[tokio::test]
async fn test_expired_token_sends_to_login_without_fetching() {
    let app = TestApp::new().await;
    let token = token_expiring_in(-Duration::minutes(1));
    app.expect_permissions("1", &token, viewable(&["Leads"]), 0)
        .await;
    let mut layout = app.layout(Some(&token), Some(user("admin", 1)));

    let outcome = layout.navigate("/leads").await;

    assert_eq!(outcome.path, "/login");
    assert_eq!(outcome.decision, AuthDecision::AuthorizedAuthRoute);
    assert_eq!(outcome.redirects, vec!["/login".to_string()]);
    assert_eq!(layout.store().get_item("accessToken"), None);
    assert!(layout.store().get_item("user").is_some());
}

#[tokio::test]
async fn test_missing_token_on_guarded_route_sends_to_login() {
    let app = TestApp::new().await;
    let mut layout = app.layout(None, None);

    let outcome = layout.navigate("/settings").await;

    assert_eq!(outcome.path, "/login");
    assert!(layout.gate().session_id().is_none());
}

#[tokio::test]
async fn test_public_route_needs_no_session() {
    let app = TestApp::new().await;
    let mut layout = app.layout(None, None);

    for path in ["/support", "/privacy-policy", "/terms"] {
        let outcome = layout.navigate(path).await;
        assert_eq!(outcome.path, path);
        assert_eq!(outcome.decision, AuthDecision::AuthorizedPublic);
    }
    assert!(app.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_public_route_with_expired_token_is_not_signed_out() {
    let app = TestApp::new().await;
    let token = token_expiring_in(-Duration::hours(2));
    let mut layout = app.layout(Some(&token), Some(user("admin", 1)));

    let outcome = layout.navigate("/support").await;

    assert_eq!(outcome.decision, AuthDecision::AuthorizedPublic);
    assert_eq!(layout.store().get_item("accessToken"), Some(token));
}

#[tokio::test]
async fn test_login_route_renders_with_live_session() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions("1", &token, viewable(&["Dashboard"]), 0)
        .await;
    let mut layout = app.layout(Some(&token), Some(user("admin", 1)));

    let outcome = layout.navigate("/login").await;

    assert_eq!(outcome.decision, AuthDecision::AuthorizedAuthRoute);
}

#[tokio::test]
async fn test_signing_in_again_starts_a_new_session() {
    let app = TestApp::new().await;
    let expired = token_expiring_in(-Duration::seconds(30));
    let fresh = live_token();
    app.expect_permissions("1", &fresh, viewable(&["Dashboard"]), 1)
        .await;
    let mut layout = app.layout(Some(&expired), Some(user("admin", 1)));

    assert_eq!(layout.navigate("/").await.path, "/login");
    assert!(layout.gate().session_id().is_none());

    layout.sign_in(&fresh, &user("admin", 1).to_string());
    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.decision, AuthDecision::AuthorizedProtected);
    assert!(layout.gate().session_id().is_some());
    assert_eq!(layout.history().first().map(String::as_str), Some("/"));
}
