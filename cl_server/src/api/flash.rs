//! One-shot flash messages carried in a short-lived cookie.
//!
//! Mutation endpoints respond with a redirect plus a `flash` cookie; the next
//! page render consumes the cookie and clears it. The message is
//! form-urlencoded so arbitrary text survives the cookie value grammar.

use super::cookies::cookie_value;
use axum::http::HeaderMap;
use url::form_urlencoded;

/// Cookie carrying the pending flash message.
pub const FLASH_COOKIE: &str = "flash";

/// Visual category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value queueing this flash for the next page view.
    pub fn cookie(&self) -> String {
        let value: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("kind", self.kind.as_str())
            .append_pair("msg", &self.message)
            .finish();
        format!("{FLASH_COOKIE}={value}; Path=/; HttpOnly; Max-Age=60")
    }
}

/// `Set-Cookie` value clearing any pending flash.
pub fn clear_flash_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

/// Read the pending flash from the request, if any.
pub fn take_flash(headers: &HeaderMap) -> Option<Flash> {
    let raw = cookie_value(headers, FLASH_COOKIE)?;
    let mut kind = None;
    let mut message = None;
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "kind" => {
                kind = match value.as_ref() {
                    "success" => Some(FlashKind::Success),
                    "error" => Some(FlashKind::Error),
                    _ => None,
                }
            }
            "msg" => message = Some(value.into_owned()),
            _ => {}
        }
    }
    Some(Flash {
        kind: kind?,
        message: message?,
    })
}
