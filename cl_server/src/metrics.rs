//! Prometheus metrics for monitoring the tracker server.
//!
//! Counters are recorded through the `metrics` facade; `init_metrics` stands
//! up an exporter that serves them at `http://<addr>/metrics`.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter on the given address.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))
}

/// Record a completed signup.
pub fn signups_total() {
    metrics::counter!("signups_total").increment(1);
}

/// Record a login attempt with its outcome.
pub fn logins_total(outcome: &'static str) {
    metrics::counter!("logins_total", "outcome" => outcome).increment(1);
}

/// Record an applied bet for a game.
pub fn bets_total(game: &str) {
    metrics::counter!("bets_total", "game" => game.to_string()).increment(1);
}

/// Record an applied win for a game.
pub fn wins_total(game: &str) {
    metrics::counter!("wins_total", "game" => game.to_string()).increment(1);
}
