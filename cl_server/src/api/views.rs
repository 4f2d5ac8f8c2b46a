//! Server-rendered HTML views.
//!
//! Presentation is deliberately minimal: plain forms and tables built with
//! `format!`. The interesting data (balances, totals, history) comes
//! pre-computed from the library; this module only lays it out.

use casino_ledger::auth::Account;
use casino_ledger::ledger::{Game, LedgerEntry};
use casino_ledger::money::format_cents;
use casino_ledger::stats::TotalsReport;

use super::flash::{Flash, FlashKind};

/// Escape text for interpolation into HTML.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => {
            let class = match flash.kind {
                FlashKind::Success => "flash-success",
                FlashKind::Error => "flash-error",
            };
            format!(
                r#"<p class="{class}">{}</p>"#,
                escape(&flash.message)
            )
        }
        None => String::new(),
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
{body}
</body>
</html>
"#
    )
}

fn game_options() -> String {
    Game::ALL
        .iter()
        .map(|game| format!(r#"<option value="{game}">{game}</option>"#))
        .collect()
}

/// Signup form.
pub fn signup_page(flash: Option<&Flash>) -> String {
    let banner = flash_banner(flash);
    page(
        "Sign up",
        &format!(
            r#"<h1>Sign up</h1>
{banner}
<form method="post" action="/signup">
  <label>Name <input name="name" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Create account</button>
</form>
<p><a href="/login">Already have an account? Log in</a></p>"#
        ),
    )
}

/// Login form.
pub fn login_page(flash: Option<&Flash>) -> String {
    let banner = flash_banner(flash);
    page(
        "Log in",
        &format!(
            r#"<h1>Log in</h1>
{banner}
<form method="post" action="/login">
  <label>Name <input name="name" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Log in</button>
</form>
<p><a href="/signup">New here? Sign up</a></p>"#
        ),
    )
}

/// Dashboard: wallet, bet/win forms, per-game totals, and history.
pub fn dashboard_page(
    account: &Account,
    totals: &TotalsReport,
    history: &[LedgerEntry],
    flash: Option<&Flash>,
) -> String {
    let banner = flash_banner(flash);
    let options = game_options();

    let totals_rows: String = Game::ALL
        .iter()
        .map(|game| {
            let row = totals.game(*game);
            format!(
                "<tr><td>{game}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                format_cents(row.spent_cents),
                format_cents(row.won_cents),
                format_cents(row.net_cents),
            )
        })
        .collect();

    let history_rows: String = history
        .iter()
        .map(|entry| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                entry.game,
                entry.kind,
                format_cents(entry.amount_cents),
            )
        })
        .collect();

    page(
        "Dashboard",
        &format!(
            r#"<h1>Welcome, {name}</h1>
{banner}
<p>Wallet balance: <strong id="balance">{balance}</strong></p>
<p><a href="/logout">Log out</a></p>

<h2>Record a transaction</h2>
<form method="post" action="/bet">
  <select name="game">{options}</select>
  <input name="amount" placeholder="Amount">
  <button type="submit">Bet</button>
</form>
<form method="post" action="/win">
  <select name="game">{options}</select>
  <input name="amount" placeholder="Amount">
  <button type="submit">Win</button>
</form>

<h2>Totals</h2>
<table>
<tr><th>Game</th><th>Spent</th><th>Won</th><th>Net</th></tr>
{totals_rows}<tr><th>Total</th><th>{total_spent}</th><th>{total_won}</th><th></th></tr>
</table>

<h2>History</h2>
<table>
<tr><th>When</th><th>Game</th><th>Kind</th><th>Amount</th></tr>
{history_rows}</table>"#,
            name = escape(&account.name),
            balance = format_cents(account.balance_cents),
            total_spent = format_cents(totals.total_spent_cents),
            total_won = format_cents(totals.total_won_cents),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn forms_offer_every_game() {
        let html = signup_page(None);
        assert!(html.contains(r#"action="/signup""#));

        let options = game_options();
        for game in Game::ALL {
            assert!(options.contains(&game.to_string()));
        }
    }

    #[test]
    fn flash_banner_is_escaped() {
        let flash = Flash::error("<script>alert(1)</script>");
        let html = login_page(Some(&flash));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
