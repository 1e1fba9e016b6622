//! Locale-aware date and money formatting.
//!
//! DESIGN
//! ======
//! Formatting is done in Rust rather than through `Intl` so that the browser
//! and native builds print identical strings. Dates keep the calendar day of
//! the input itself; a bare `YYYY-MM-DD` never shifts across a time-zone
//! boundary.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format a date string as day-month-year for `locale`.
///
/// Empty input yields an empty string; input that does not parse is returned
/// unchanged.
pub fn format_date(input: &str, locale: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_date(trimmed) {
        Some(date) => date.format(date_pattern(locale)).to_string(),
        None => input.to_owned(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn date_pattern(locale: &str) -> &'static str {
    match locale_language(locale).as_str() {
        "en-us" => "%m/%d/%Y",
        "uk" | "uk-ua" | "de" | "de-de" | "ru" | "ru-ru" | "pl" | "pl-pl" => "%d.%m.%Y",
        _ => "%d/%m/%Y",
    }
}

fn locale_language(locale: &str) -> String {
    locale.trim().replace('_', "-").to_ascii_lowercase()
}

// =============================================================================
// CURRENCY
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NumberStyle {
    group: char,
    decimal: char,
    symbol_first: bool,
}

fn number_style(locale: &str) -> NumberStyle {
    match locale_language(locale).as_str() {
        "en" | "en-us" | "en-gb" => NumberStyle { group: ',', decimal: '.', symbol_first: true },
        "de" | "de-de" => NumberStyle { group: '.', decimal: ',', symbol_first: false },
        _ => NumberStyle { group: '\u{a0}', decimal: ',', symbol_first: false },
    }
}

fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "UAH" => "₴".to_owned(),
        "USD" => "$".to_owned(),
        "EUR" => "€".to_owned(),
        "GBP" => "£".to_owned(),
        other => other.to_owned(),
    }
}

/// ISO 4217 minor units: zero for currencies without subunits, two otherwise.
fn fraction_digits(code: &str) -> usize {
    match code.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "PYG" | "UGX" | "XAF" | "XOF" => 0,
        _ => 2,
    }
}

/// Format `amount` as money in `currency` with `locale` conventions.
///
/// Two fraction digits, except zero for currencies without minor units
/// (JPY, KRW, ...). Codes without a known symbol are printed as-is.
pub fn format_currency(amount: f64, currency: &str, locale: &str) -> String {
    let style = number_style(locale);
    let symbol = currency_symbol(currency);
    let number = group_digits(amount.abs(), fraction_digits(currency), style);
    let sign = if amount < 0.0 && number.chars().any(|c| c.is_ascii_digit() && c != '0') { "-" } else { "" };
    if style.symbol_first {
        format!("{sign}{symbol}{number}")
    } else {
        format!("{sign}{number}\u{a0}{symbol}")
    }
}

fn group_digits(value: f64, fraction: usize, style: NumberStyle) -> String {
    let fixed = format!("{value:.fraction$}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(style.group);
        }
        grouped.push(*ch);
    }
    if !frac_part.is_empty() {
        grouped.push(style.decimal);
        grouped.push_str(frac_part);
    }
    grouped
}
