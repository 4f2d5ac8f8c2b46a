//! Session middleware for protected pages.
//!
//! Resolves the session cookie to an account before any protected handler
//! runs and injects it into request extensions. Requests without a valid
//! session are redirected to the login page; handlers never see an
//! unauthenticated caller.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use casino_ledger::auth::{Account, AuthError};

use super::AppState;
use super::cookies::{SESSION_COOKIE, cookie_value};

/// The authenticated account for the current request.
///
/// Extract in handlers with `Extension(CurrentAccount(account))`.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Resolve the session cookie and gate access to protected routes.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let account = match cookie_value(request.headers(), SESSION_COOKIE) {
        Some(token) => match state.auth.resolve(&token).await {
            Ok(account) => Some(account),
            // A storage failure is not "no session"; log it before bouncing
            // the request to the login page.
            Err(e @ AuthError::Store(_)) => {
                tracing::error!(error = %e, "session resolution failed");
                None
            }
            Err(_) => None,
        },
        None => None,
    };

    match account {
        Some(account) => {
            request.extensions_mut().insert(CurrentAccount(account));
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}
