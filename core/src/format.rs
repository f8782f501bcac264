//! Presentation formatting for dates and money.
//!
//! Dates render as `DD Mon YYYY` (optionally with `HH:MM`), amounts as
//! Indian-grouped rupees (`₹12,34,567.89`). Amounts round half away from
//! zero to two decimal places before display; all arithmetic stays in
//! `Decimal` so display never inherits binary-float artifacts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Parses a server timestamp. Accepts RFC 3339 (`2024-03-01T10:00:00Z`),
/// a naive datetime without offset (`2024-03-01T10:00:00.123456`, treated
/// as UTC), or a bare date (`2024-03-01`, midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// Serde adapter over [`parse_timestamp`] for response DTO fields.
pub(crate) fn de_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp format: {raw}")))
}

/// `05 Mar 2024`
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d %b %Y").to_string()
}

/// `05 Mar 2024 14:30`
pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format("%d %b %Y %H:%M").to_string()
}

/// Parses a user-entered amount. Rejects empty input, thousands separators
/// and anything else that is not a plain decimal number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Decimal>().ok()
}

/// Formats an amount as Indian-grouped rupees: two decimal places, the last
/// three integer digits grouped together and pairs of digits before that,
/// e.g. `₹12,34,567.89`.
pub fn format_currency(amount: &Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let text = rounded.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("{sign}\u{20b9}{}.{frac_part}", group_indian(int_part))
}

/// Indian digit grouping: `1234567` becomes `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (next, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = next;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
