//! Wallet page handlers: dashboard, bet, win.

use axum::{
    Extension, Form,
    extract::State,
    http::HeaderMap,
    http::header::SET_COOKIE,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use casino_ledger::ledger::LedgerError;
use casino_ledger::money::format_cents;
use casino_ledger::stats::compute_totals;
use serde::Deserialize;

use super::AppState;
use super::flash::{Flash, clear_flash_cookie, take_flash};
use super::middleware::CurrentAccount;
use super::views;
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct TransactionPayload {
    pub game: Option<String>,
    pub amount: Option<String>,
}

/// GET /dashboard
///
/// Renders the wallet balance, per-game totals, grand totals, and the full
/// history newest first.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    headers: HeaderMap,
) -> Response {
    let history = match state.ledger.history(account.id).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!(account_id = account.id, error = %e, "failed to load history");
            return (
                AppendHeaders([(SET_COOKIE, Flash::error(e.client_message()).cookie())]),
                Redirect::to("/login"),
            )
                .into_response();
        }
    };

    let totals = compute_totals(&history);
    let flash = take_flash(&headers);

    (
        AppendHeaders([(SET_COOKIE, clear_flash_cookie())]),
        Html(views::dashboard_page(&account, &totals, &history, flash.as_ref())),
    )
        .into_response()
}

/// POST /bet
///
/// Applies a bet and redirects to the dashboard with the outcome as a flash
/// message. Validation failures and insufficient funds leave the wallet and
/// history untouched.
pub async fn place_bet(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Form(payload): Form<TransactionPayload>,
) -> Response {
    let game = payload.game.as_deref().unwrap_or("");
    let amount = payload.amount.as_deref().unwrap_or("");

    let flash = match state.ledger.apply_bet(account.id, game, amount).await {
        Ok(balance) => {
            metrics::bets_total(game);
            Flash::success(format!("Bet placed. Balance: {}", format_cents(balance)))
        }
        Err(e) => transaction_error(&account.name, "bet", &e),
    };

    (
        AppendHeaders([(SET_COOKIE, flash.cookie())]),
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// POST /win
///
/// Credits a win and redirects to the dashboard with the outcome as a flash
/// message.
pub async fn record_win(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Form(payload): Form<TransactionPayload>,
) -> Response {
    let game = payload.game.as_deref().unwrap_or("");
    let amount = payload.amount.as_deref().unwrap_or("");

    let flash = match state.ledger.apply_win(account.id, game, amount).await {
        Ok(balance) => {
            metrics::wins_total(game);
            Flash::success(format!("Win recorded. Balance: {}", format_cents(balance)))
        }
        Err(e) => transaction_error(&account.name, "win", &e),
    };

    (
        AppendHeaders([(SET_COOKIE, flash.cookie())]),
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// Build the error flash, logging storage failures at error level and
/// ordinary validation failures at debug.
fn transaction_error(name: &str, op: &str, err: &LedgerError) -> Flash {
    match err {
        LedgerError::Store(_) => {
            tracing::error!(account = name, op, error = %err, "transaction failed");
        }
        _ => {
            tracing::debug!(account = name, op, error = %err, "transaction rejected");
        }
    }
    Flash::error(err.client_message())
}
