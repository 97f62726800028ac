//! Canonical decimal-string rendering for amounts, quantities and prices.
//!
//! Source documents carry numbers with inconsistent precision (`"100000.00"`,
//! `"1"`, `"1.0000"`, occasionally exponent notation). The sheet contract
//! wants one canonical spelling per value: trailing zeros trimmed, sign kept,
//! never scientific notation, never a bare trailing point. Two renderings
//! exist: *collapsed* (integral values lose the point entirely, used for
//! quantities) and *plain* (at least one fractional digit survives, used for
//! money).

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a raw numeric string. Accepts plain and exponent notation; returns
/// `None` for anything else (empty, garbage, out of range).
pub fn parse(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Render a value in plain mode: trailing zeros trimmed, but integral values
/// keep one fractional digit (`100000` → `"100000.0"`).
pub fn render(value: Decimal) -> String {
    let s = value.normalize().to_string();
    if s.contains('.') { s } else { format!("{s}.0") }
}

/// Render a value in collapsed mode: integral values become bare integers
/// (`100000.00` → `"100000"`), fractional values render as in plain mode.
/// `normalize` already strips the scale, so integral values print bare.
pub fn render_collapsed(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Normalize a raw string in plain mode, substituting `default` (returned
/// verbatim) when the input does not parse. Never fails.
pub fn normalize(raw: &str, default: &str) -> String {
    match parse(raw) {
        Some(value) => render(value),
        None => default.to_string(),
    }
}

/// Normalize a raw string in collapsed mode, substituting `default` when the
/// input does not parse. Never fails.
pub fn normalize_collapsed(raw: &str, default: &str) -> String {
    match parse(raw) {
        Some(value) => render_collapsed(value),
        None => default.to_string(),
    }
}
