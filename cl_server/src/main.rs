//! Casino tracker web server binary.
//!
//! Wires the PostgreSQL-backed stores into the auth and ledger managers and
//! serves the HTML frontend.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use casino_ledger::auth::AuthManager;
use casino_ledger::db::{Database, PgAccountStore, PgSessionStore};
use casino_ledger::ledger::LedgerManager;
use chrono::Duration;
use pico_args::Arguments;

use cl_server::{api, config::ServerConfig, logging, metrics};

const HELP: &str = "\
Run the casino tracker web server

USAGE:
  cl_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:4000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:4000)
  DATABASE_URL             PostgreSQL connection string
  PASSWORD_PEPPER          Password hashing pepper (required)
  SESSION_TTL_HOURS        Session lifetime in hours   [default: 24]
  OPENING_BALANCE_CENTS    New-account wallet balance  [default: 25000]
  METRICS_BIND             Prometheus exporter address (optional)
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let db_url_override: Option<String> = pargs.opt_value_from_str("--db-url")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, db_url_override)
        .context("invalid configuration")?;

    tracing::info!(bind = %config.bind, "starting casino tracker server");

    let db = Database::new(&config.database)
        .await
        .context("failed to connect to database")?;
    db.migrate().await.context("failed to run migrations")?;
    tracing::info!("database connected");

    let accounts = Arc::new(PgAccountStore::new(db.pool().clone()));
    let sessions = Arc::new(PgSessionStore::new(db.pool().clone()));

    let auth = Arc::new(
        AuthManager::new(accounts.clone(), sessions, config.security.password_pepper.clone())
            .with_session_ttl(Duration::hours(config.security.session_ttl_hours))
            .with_opening_balance(config.wallet.opening_balance_cents),
    );
    let ledger = Arc::new(LedgerManager::new(accounts));

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!(bind = %metrics_bind, "metrics exporter listening");
    }

    let app = api::create_router(api::AppState { auth, ledger });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind))?;

    tracing::info!("server running at http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutting down");
    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
