//! Authentication page handlers: signup, login, logout.
//!
//! All mutations follow the post/redirect pattern: success establishes the
//! session cookie and lands on the dashboard; failure queues a flash message
//! and returns to the originating form. Raw error details never reach the
//! browser; `client_message()` decides what the user sees.

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    http::header::SET_COOKIE,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use casino_ledger::money::format_cents;
use serde::Deserialize;

use super::AppState;
use super::cookies::{SESSION_COOKIE, clear_session_cookie, cookie_value, session_cookie};
use super::flash::{Flash, clear_flash_cookie, take_flash};
use super::views;
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// GET /signup
pub async fn signup_page(headers: HeaderMap) -> Response {
    let flash = take_flash(&headers);
    (
        AppendHeaders([(SET_COOKIE, clear_flash_cookie())]),
        Html(views::signup_page(flash.as_ref())),
    )
        .into_response()
}

/// POST /signup
///
/// Creates the account with the opening balance, establishes a session, and
/// redirects to the dashboard. Missing or taken names bounce back to the
/// form with an error flash.
pub async fn signup(
    State(state): State<AppState>,
    Form(payload): Form<CredentialsPayload>,
) -> Response {
    let name = payload.name.as_deref().unwrap_or("");
    let password = payload.password.as_deref().unwrap_or("");

    match state.auth.signup(name, password).await {
        Ok((account, session)) => {
            metrics::signups_total();
            tracing::info!(account_id = account.id, "signup");
            (
                AppendHeaders([
                    (SET_COOKIE, session_cookie(&session.token)),
                    (
                        SET_COOKIE,
                        Flash::success(format!(
                            "Welcome! Your wallet starts at {}",
                            format_cents(account.balance_cents)
                        ))
                        .cookie(),
                    ),
                ]),
                Redirect::to("/dashboard"),
            )
                .into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "signup rejected");
            (
                AppendHeaders([(SET_COOKIE, Flash::error(e.client_message()).cookie())]),
                Redirect::to("/signup"),
            )
                .into_response()
        }
    }
}

/// GET /login
pub async fn login_page(headers: HeaderMap) -> Response {
    let flash = take_flash(&headers);
    (
        AppendHeaders([(SET_COOKIE, clear_flash_cookie())]),
        Html(views::login_page(flash.as_ref())),
    )
        .into_response()
}

/// POST /login
///
/// Verifies the password against the stored hash; existence of the account
/// alone is never enough.
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<CredentialsPayload>,
) -> Response {
    let name = payload.name.as_deref().unwrap_or("");
    let password = payload.password.as_deref().unwrap_or("");

    match state.auth.login(name, password).await {
        Ok((account, session)) => {
            metrics::logins_total("ok");
            tracing::info!(account_id = account.id, "login");
            (
                AppendHeaders([(SET_COOKIE, session_cookie(&session.token))]),
                Redirect::to("/dashboard"),
            )
                .into_response()
        }
        Err(e) => {
            metrics::logins_total("failed");
            tracing::debug!(error = %e, "login rejected");
            (
                AppendHeaders([(SET_COOKIE, Flash::error(e.client_message()).cookie())]),
                Redirect::to("/login"),
            )
                .into_response()
        }
    }
}

/// GET /logout
///
/// Destroys the server-side session and clears the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_value(&headers, SESSION_COOKIE) {
        if let Err(e) = state.auth.logout(&token).await {
            tracing::error!(error = %e, "logout failed");
        }
    }

    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/login"),
    )
        .into_response()
}
