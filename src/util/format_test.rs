use super::*;

// =============================================================
// Dates
// =============================================================

#[test]
fn format_date_empty_is_empty() {
    assert_eq!(format_date("", "en-GB"), "");
    assert_eq!(format_date("   ", "en-GB"), "");
}

#[test]
fn format_date_plain_iso_date_en_gb() {
    assert_eq!(format_date("2024-03-05", "en-GB"), "05/03/2024");
}

#[test]
fn format_date_rfc3339_keeps_own_offset_day() {
    assert_eq!(format_date("2024-12-31T23:30:00-05:00", "en-GB"), "31/12/2024");
    assert_eq!(format_date("2024-01-02T00:10:00Z", "en-GB"), "02/01/2024");
}

#[test]
fn format_date_local_datetime_variants() {
    assert_eq!(format_date("2024-07-09T08:15:30", "en-GB"), "09/07/2024");
    assert_eq!(format_date("2024-07-09T08:15:30.123", "en-GB"), "09/07/2024");
    assert_eq!(format_date("2024-07-09T08:15", "en-GB"), "09/07/2024");
    assert_eq!(format_date("2024-07-09 08:15:30", "en-GB"), "09/07/2024");
}

#[test]
fn format_date_locale_patterns() {
    assert_eq!(format_date("2024-03-05", "uk-UA"), "05.03.2024");
    assert_eq!(format_date("2024-03-05", "de_DE"), "05.03.2024");
    assert_eq!(format_date("2024-03-05", "en-US"), "03/05/2024");
    assert_eq!(format_date("2024-03-05", "fr-FR"), "05/03/2024");
}

#[test]
fn format_date_unparseable_returned_unchanged() {
    assert_eq!(format_date("yesterday", "en-GB"), "yesterday");
    assert_eq!(format_date("2024-13-40", "en-GB"), "2024-13-40");
}

// =============================================================
// Currency
// =============================================================

#[test]
fn format_currency_uk_ua_hryvnia() {
    assert_eq!(format_currency(1234.5, "UAH", "uk-UA"), "1\u{a0}234,50\u{a0}₴");
}

#[test]
fn format_currency_small_amount_has_no_group_separator() {
    assert_eq!(format_currency(5.0, "UAH", "uk-UA"), "5,00\u{a0}₴");
    assert_eq!(format_currency(999.999, "UAH", "uk-UA"), "1\u{a0}000,00\u{a0}₴");
}

#[test]
fn format_currency_large_amount_groups_by_thousands() {
    assert_eq!(format_currency(1_234_567.891, "EUR", "uk-UA"), "1\u{a0}234\u{a0}567,89\u{a0}€");
}

#[test]
fn format_currency_en_us_symbol_first() {
    assert_eq!(format_currency(1234.5, "USD", "en-US"), "$1,234.50");
    assert_eq!(format_currency(-42.0, "GBP", "en-GB"), "-£42.00");
}

#[test]
fn format_currency_de_de() {
    assert_eq!(format_currency(1234.5, "EUR", "de-DE"), "1.234,50\u{a0}€");
}

#[test]
fn format_currency_unknown_code_printed_verbatim() {
    assert_eq!(format_currency(10.0, "pln", "uk-UA"), "10,00\u{a0}PLN");
}

#[test]
fn format_currency_negative_zero_has_no_sign() {
    assert_eq!(format_currency(-0.001, "UAH", "uk-UA"), "0,00\u{a0}₴");
    assert_eq!(format_currency(-3.25, "UAH", "uk-UA"), "-3,25\u{a0}₴");
}

#[test]
fn format_currency_zero_decimal_codes_drop_fraction() {
    assert_eq!(format_currency(1234.6, "JPY", "en-US"), "JPY1,235");
    assert_eq!(format_currency(1_500_000.0, "krw", "uk-UA"), "1\u{a0}500\u{a0}000\u{a0}KRW");
    assert_eq!(format_currency(-0.4, "JPY", "de-DE"), "0\u{a0}JPY");
}
