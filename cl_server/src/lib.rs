//! Casino tracker web server.
//!
//! Thin HTTP shell over the `casino_ledger` library: session-cookie
//! authentication, form-posting endpoints that redirect with flash messages,
//! and a server-rendered dashboard.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
