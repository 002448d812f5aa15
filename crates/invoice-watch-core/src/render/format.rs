use std::borrow::Cow;

use chrono::{DateTime, Local};

use crate::records::Invoice;

/// Placeholder shown for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Label shown before the first successful fetch.
pub const NEVER_UPDATED: &str = "never";

/// Format an optional amount as `$` plus two decimals.
///
/// Zero and NaN render as "N/A", the same as an absent balance.
pub fn format_currency(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value != 0.0 && !value.is_nan() => format!("${}", to_fixed_2(value)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Above this, `magnitude * 100` is no longer exact in an `f64`.
const MAX_EXACT_CENTS: f64 = 1e13;

/// Two-decimal fixed notation where an exact tie rounds away from zero.
///
/// `{:.2}` rounds exact binary ties (0.125, 0.375, ...) to even. A value sits
/// exactly halfway between two cents only when eight times its magnitude is
/// an odd integer.
fn to_fixed_2(value: f64) -> String {
    let magnitude = value.abs();
    let eighths = magnitude * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0;

    if is_tie && magnitude < MAX_EXACT_CENTS {
        let cents = (magnitude * 100.0).ceil() as u64;
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    } else {
        format!("{:.2}", value)
    }
}

/// Customer display name, or "N/A" when the reference or its `name` is missing.
pub fn customer_display_name(invoice: &Invoice) -> Cow<'_, str> {
    invoice
        .customer_name()
        .unwrap_or(Cow::Borrowed(NOT_AVAILABLE))
}

/// Time-of-day of the last snapshot replacement in local time.
pub fn format_last_updated(last_updated: Option<DateTime<Local>>) -> String {
    match last_updated {
        Some(at) => at.format("%H:%M:%S").to_string(),
        None => NEVER_UPDATED.to_string(),
    }
}

/// The readout shown above and below the table.
pub fn last_updated_label(last_updated: Option<DateTime<Local>>) -> String {
    format!("Last updated: {}", format_last_updated(last_updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordFields;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn invoice(value: Value) -> Invoice {
        let map = value.as_object().cloned().unwrap();
        Invoice::from_map(map, &RecordFields::default())
    }

    #[test]
    fn test_currency_two_decimals() {
        assert_eq!(format_currency(Some(12.5)), "$12.50");
        assert_eq!(format_currency(Some(100.0)), "$100.00");
        assert_eq!(format_currency(Some(0.1)), "$0.10");
    }

    #[test]
    fn test_currency_exact_ties_round_up() {
        assert_eq!(format_currency(Some(0.125)), "$0.13");
        assert_eq!(format_currency(Some(0.625)), "$0.63");
        assert_eq!(format_currency(Some(2.375)), "$2.38");
        assert_eq!(format_currency(Some(-0.125)), "$-0.13");
    }

    #[test]
    fn test_currency_near_ties_follow_exact_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(format_currency(Some(1.005)), "$1.00");
        assert_eq!(format_currency(Some(0.115)), "$0.12");
        assert_eq!(format_currency(Some(19.99)), "$19.99");
    }

    #[test]
    fn test_currency_null_is_placeholder() {
        assert_eq!(format_currency(None), "N/A");
    }

    // Regression: zero is shown as "N/A", not "$0.00".
    #[test]
    fn test_currency_zero_is_placeholder() {
        assert_eq!(format_currency(Some(0.0)), "N/A");
        assert_eq!(format_currency(Some(-0.0)), "N/A");
    }

    #[test]
    fn test_currency_nan_and_negative() {
        assert_eq!(format_currency(Some(f64::NAN)), "N/A");
        assert_eq!(format_currency(Some(-5.0)), "$-5.00");
    }

    #[test]
    fn test_customer_name_present() {
        let inv = invoice(json!({"customerRef": {"name": "Acme"}}));
        assert_eq!(customer_display_name(&inv), "Acme");
        let numeric = invoice(json!({"customerRef": {"name": 42}}));
        assert_eq!(customer_display_name(&numeric), "42");
    }

    #[test]
    fn test_customer_name_fallback() {
        assert_eq!(customer_display_name(&invoice(json!({"customerRef": {}}))), "N/A");
        assert_eq!(customer_display_name(&invoice(json!({}))), "N/A");
        assert_eq!(
            customer_display_name(&invoice(json!({"customerRef": {"name": 0}}))),
            "N/A"
        );
    }

    #[test]
    fn test_last_updated_label() {
        let at = Local
            .with_ymd_and_hms(2026, 1, 2, 14, 5, 9)
            .single()
            .unwrap();
        assert_eq!(last_updated_label(Some(at)), "Last updated: 14:05:09");
        assert_eq!(last_updated_label(None), "Last updated: never");
    }
}
