//! Redirects and access decisions for signed-in users.

use serde_json::json;

use backoffice_auth::AuthDecision;

use crate::helpers::{TestApp, live_token, user, viewable};

#[tokio::test]
async fn test_admin_redirected_from_denied_route_to_dashboard() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions("1", &token, viewable(&["Dashboard", "Leads"]), 1)
        .await;
    let mut layout = app.layout(Some(&token), Some(user("Admin", 1)));

    let outcome = layout.navigate("/roles").await;

    assert_eq!(outcome.path, "/");
    assert_eq!(outcome.decision, AuthDecision::AuthorizedProtected);
    assert_eq!(outcome.redirects, vec!["/".to_string()]);
}

#[tokio::test]
async fn test_sales_executive_lands_on_leads() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions("5", &token, viewable(&["Leads", "Bookings"]), 1)
        .await;
    let mut layout = app.layout(Some(&token), Some(user("sales executive", 5)));

    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.path, "/leads");
    assert_eq!(outcome.decision, AuthDecision::AuthorizedProtected);
}

#[tokio::test]
async fn test_falls_back_to_first_viewable_route() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions("5", &token, viewable(&["Reports", "Bookings"]), 1)
        .await;
    let mut layout = app.layout(Some(&token), Some(user("sales executive", 5)));

    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.path, "/bookings");
    assert_eq!(outcome.decision, AuthDecision::AuthorizedProtected);
}

#[tokio::test]
async fn test_role_name_matched_case_insensitively() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions("8", &token, viewable(&["Collection", "Leads"]), 1)
        .await;
    let blob = json!({ "roleName": "  CRM Executive ", "role_id": "8" });
    let mut layout = app.layout(Some(&token), Some(blob));

    let outcome = layout.navigate("/users").await;

    assert_eq!(outcome.path, "/collection");
}

#[tokio::test]
async fn test_nothing_viewable_is_unauthorized() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions("5", &token, json!({ "permissions": [] }), 1)
        .await;
    let mut layout = app.layout(Some(&token), Some(user("sales executive", 5)));

    let outcome = layout.navigate("/leads").await;

    assert_eq!(outcome.path, "/leads");
    assert_eq!(outcome.decision, AuthDecision::Unauthorized);
    assert!(outcome.redirects.is_empty());
}

#[tokio::test]
async fn test_permissions_fetched_once_across_navigation() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions(
        "1",
        &token,
        viewable(&["Dashboard", "Leads", "Bookings", "Reports"]),
        1,
    )
    .await;
    let mut layout = app.layout(Some(&token), Some(user("admin", 1)));

    for path in ["/", "/leads", "/bookings", "/reports", "/leads", "/"] {
        let outcome = layout.navigate(path).await;
        assert_eq!(outcome.path, path);
        assert_eq!(outcome.decision, AuthDecision::AuthorizedProtected);
    }
    assert_eq!(layout.refresh().await.decision, AuthDecision::AuthorizedProtected);
}

#[tokio::test]
async fn test_unguarded_path_is_allowed_once_signed_in() {
    let app = TestApp::new().await;
    let token = live_token();
    app.expect_permissions("1", &token, viewable(&["Dashboard"]), 1)
        .await;
    let mut layout = app.layout(Some(&token), Some(user("admin", 1)));

    let outcome = layout.navigate("/profile").await;

    assert_eq!(outcome.decision, AuthDecision::AuthorizedProtected);
    assert!(outcome.redirects.is_empty());
}

#[tokio::test]
async fn test_view_requires_view_code_not_any_code() {
    let app = TestApp::new().await;
    let token = live_token();
    let body = json!({
        "permissions": [
            { "pageName": "Dashboard", "permissionIds": [4, 22] },
            { "pageName": "Leads", "permissionIds": [17] }
        ]
    });
    app.expect_permissions("1", &token, body, 1).await;
    let mut layout = app.layout(Some(&token), Some(user("admin", 1)));

    let outcome = layout.navigate("/").await;

    assert_eq!(outcome.path, "/leads");
    let index = layout.gate().index().unwrap();
    assert!(!index.has_view_permission("Dashboard"));
}
