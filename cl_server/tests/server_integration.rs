//! End-to-end router tests over the in-memory store.
//!
//! Each test drives the real router with `tower::ServiceExt::oneshot`,
//! carrying the session cookie between requests the way a browser would.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use casino_ledger::auth::AuthManager;
use casino_ledger::db::MemoryStore;
use casino_ledger::ledger::LedgerManager;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cl_server::api::{AppState, create_router};

const FORM: &str = "application/x-www-form-urlencoded";

fn test_router() -> Router {
    let store = Arc::new(MemoryStore::new());
    let auth = Arc::new(AuthManager::new(
        store.clone(),
        store.clone(),
        "integration-test-pepper".to_string(),
    ));
    let ledger = Arc::new(LedgerManager::new(store));
    create_router(AppState { auth, ledger })
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, FORM);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Pull the session cookie pair (`sid=...`) out of a response.
fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid=") && !v.starts_with("sid=;"))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Pull the flash cookie pair (`flash=...`) out of a response.
fn flash_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("flash=") && !v.starts_with("flash=;"))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Sign up and return the session cookie pair.
async fn signup(app: &Router, name: &str, password: &str) -> String {
    let response = post_form(
        app,
        "/signup",
        &format!("name={name}&password={password}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    session_cookie(&response).expect("signup sets a session cookie")
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = test_router();
    let response = get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn signup_and_login_forms_render() {
    let app = test_router();

    let response = get(&app, "/signup", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(r#"action="/signup""#));

    let response = get(&app, "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(r#"action="/login""#));
}

#[tokio::test]
async fn signup_opens_a_session_and_the_dashboard_shows_the_opening_balance() {
    let app = test_router();
    let cookie = signup(&app, "alice", "hunter2").await;

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("alice"));
    assert!(body.contains("250.00"));
}

#[tokio::test]
async fn duplicate_signup_bounces_back_with_an_error_flash() {
    let app = test_router();
    signup(&app, "alice", "hunter2").await;

    let response = post_form(&app, "/signup", "name=alice&password=other", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signup");
    assert!(session_cookie(&response).is_none());
    assert!(flash_cookie(&response).is_some());
}

#[tokio::test]
async fn login_requires_the_correct_password() {
    let app = test_router();
    signup(&app, "alice", "hunter2").await;

    let response = post_form(&app, "/login", "name=alice&password=wrong", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(session_cookie(&response).is_none());

    let response = post_form(&app, "/login", "name=alice&password=hunter2", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn unauthenticated_requests_are_redirected_to_login() {
    let app = test_router();

    for uri in ["/dashboard", "/logout"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    let response = post_form(&app, "/bet", "game=poker&amount=10", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn bets_and_wins_move_the_balance_and_appear_in_history() {
    let app = test_router();
    let cookie = signup(&app, "alice", "hunter2").await;

    let response = post_form(&app, "/bet", "game=poker&amount=50", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = post_form(
        &app,
        "/win",
        "game=poker&amount=20",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    let body = body_string(response).await;
    assert!(body.contains("220.00"));
    assert!(body.contains("50.00"));
    assert!(body.contains("20.00"));
}

#[tokio::test]
async fn an_oversized_bet_leaves_the_balance_untouched() {
    let app = test_router();
    let cookie = signup(&app, "alice", "hunter2").await;

    let response = post_form(&app, "/bet", "game=poker&amount=1000", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert!(flash_cookie(&response).is_some());

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    let body = body_string(response).await;
    assert!(body.contains("250.00"));
}

#[tokio::test]
async fn invalid_game_and_missing_amount_become_flash_errors() {
    let app = test_router();
    let cookie = signup(&app, "alice", "hunter2").await;

    let response = post_form(&app, "/bet", "game=slots&amount=10", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(flash_cookie(&response).is_some());

    let response = post_form(&app, "/bet", "game=poker", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(flash_cookie(&response).is_some());

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert!(body_string(response).await.contains("250.00"));
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = test_router();
    let cookie = signup(&app, "alice", "hunter2").await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn the_root_redirects_to_the_dashboard() {
    let app = test_router();
    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
}
