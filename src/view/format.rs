use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// Day-first, dot separated, zero padded: `02.03.2024`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Renders a decimal with exactly two fractional digits, rounding half up.
pub fn format_two_places(value: &BigDecimal) -> String {
    value.round(2).with_scale(2).to_string()
}
