//! HTTP surface for the casino tracker.
//!
//! Form-posting HTML endpoints built with Axum. Mutations respond with a
//! redirect plus a one-shot flash cookie rather than structured statuses;
//! protected routes sit behind the session middleware, so handlers always
//! receive a resolved account.
//!
//! # Endpoints
//!
//! ```text
//! GET  /health      - JSON health status (public)
//! GET  /signup      - signup form (public)
//! POST /signup      - create account, open session   -> /dashboard
//! GET  /login       - login form (public)
//! POST /login       - verify credentials, open session -> /dashboard
//! GET  /logout      - destroy session                 -> /login
//! GET  /dashboard   - wallet, totals, history (auth required)
//! POST /bet         - debit wallet, append history    -> /dashboard
//! POST /win         - credit wallet, append history   -> /dashboard
//! ```

pub mod auth;
pub mod cookies;
pub mod flash;
pub mod middleware;
pub mod request_id;
pub mod views;
pub mod wallet;

use axum::{
    Router,
    response::{IntoResponse, Json, Redirect},
    routing::{get, post},
};
use casino_ledger::auth::AuthManager;
use casino_ledger::ledger::LedgerManager;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers.
///
/// Cloned per request; both managers are cheap `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthManager>,
    pub ledger: Arc<LedgerManager>,
}

/// Create the complete router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/health", get(health_check))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login));

    let protected_routes = Router::new()
        .route("/dashboard", get(wallet::dashboard))
        .route("/bet", post(wallet::place_bet))
        .route("/win", post(wallet::record_win))
        .route("/logout", get(auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
