//! Cent-precision money handling.
//!
//! Wallet balances and ledger amounts are integer cents (`i64`). User input
//! is parsed to cents exactly once, at the boundary, with half-away-from-zero
//! rounding; everything downstream is exact integer arithmetic, so repeated
//! small transactions cannot accumulate floating-point drift.

/// Amount in cents.
pub type Cents = i64;

/// Largest accepted single-transaction amount: one billion, in cents.
pub const MAX_AMOUNT_CENTS: Cents = 100_000_000_000;

/// Parse a user-supplied decimal amount into positive cents.
///
/// Rejects missing, non-numeric, zero, negative, and absurdly large values.
/// The error string is suitable for direct display to the user.
pub fn parse_amount(raw: &str) -> Result<Cents, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("amount is required".to_string());
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("'{trimmed}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{trimmed}' is not a number"));
    }

    // Round the parsed value to the nearest cent, half away from zero.
    let cents = (value * 100.0).round() as Cents;
    if cents <= 0 {
        return Err("amount must be greater than zero".to_string());
    }
    if cents > MAX_AMOUNT_CENTS {
        return Err("amount is too large".to_string());
    }

    Ok(cents)
}

/// Format cents as a two-decimal currency string, e.g. `150.01` or `-30.00`.
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
