//! Session cookie helpers.
//!
//! The session token is an opaque UUID carried in an HttpOnly cookie; the
//! value itself is never interpreted here, only ferried to the auth manager.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sid";

/// Extract a cookie value by name from the request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                (key == name).then(|| value.to_string())
            })
        })
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value destroying the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
