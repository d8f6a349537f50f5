//! Coercion of untyped caller input.
//!
//! Form fields arrive as JSON numbers or strings. Amounts and counts that
//! are not numbers, including blank or non-numeric text, are treated as
//! absent rather than as an error. YOS inputs and dates keep "present but
//! unparseable" apart from "absent" through [`FieldInput`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use crate::calculation::parse_pebd;
use crate::models::FieldInput;

/// Parses text as a decimal, accepting plain and scientific notation.
fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    // Digit separators are not numbers to a form field.
    if text.is_empty() || text.contains('_') {
        return None;
    }
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Coerces a JSON value to a decimal amount.
///
/// Numbers and numeric strings convert; `null`, blank or non-numeric text,
/// booleans, arrays and objects are absent.
///
/// # Examples
///
/// ```
/// use reserve_offset_engine::coerce::coerce_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal(Some(&json!("1808.45"))), Some(Decimal::new(180845, 2)));
/// assert_eq!(coerce_decimal(Some(&json!("abc"))), None);
/// assert_eq!(coerce_decimal(None), None);
/// ```
pub fn coerce_decimal(value: Option<&Value>) -> Option<Decimal> {
    coerce_decimal_field(value).value()
}

/// Returns `true` for an omitted field, `null`, or blank text.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Coerces a JSON value to a decimal, keeping unparseable input apart from
/// absent input.
///
/// # Examples
///
/// ```
/// use reserve_offset_engine::coerce::coerce_decimal_field;
/// use reserve_offset_engine::models::FieldInput;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal_field(Some(&json!(6))), FieldInput::Valid(Decimal::from(6)));
/// assert_eq!(coerce_decimal_field(Some(&json!(" "))), FieldInput::Absent);
/// assert_eq!(coerce_decimal_field(Some(&json!("six"))), FieldInput::Invalid);
/// ```
pub fn coerce_decimal_field(value: Option<&Value>) -> FieldInput<Decimal> {
    if is_blank(value) {
        return FieldInput::Absent;
    }
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s),
        _ => None,
    };
    parsed.map_or(FieldInput::Invalid, FieldInput::Valid)
}

/// Coerces a JSON value to a day count, truncating toward zero.
///
/// Absent or non-numeric input counts as zero. Negative values are kept;
/// the estimator floors them at zero. Values beyond the `i64` range saturate.
pub fn coerce_count(value: Option<&Value>) -> i64 {
    coerce_decimal(value)
        .map(|d| {
            let whole = d.trunc();
            whole.to_i64().unwrap_or(if whole.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            })
        })
        .unwrap_or(0)
}

/// Coerces a JSON value to a `YYYY-MM-DD` date.
pub fn coerce_date(value: Option<&Value>) -> Option<NaiveDate> {
    coerce_date_field(value).value()
}

/// Coerces a JSON value to a `YYYY-MM-DD` date, keeping unparseable input
/// apart from absent input.
pub fn coerce_date_field(value: Option<&Value>) -> FieldInput<NaiveDate> {
    if is_blank(value) {
        return FieldInput::Absent;
    }
    let parsed = match value {
        Some(Value::String(s)) => parse_pebd(s),
        _ => None,
    };
    parsed.map_or(FieldInput::Invalid, FieldInput::Valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_decimal_from_json_number() {
        assert_eq!(coerce_decimal(Some(&json!(1808.45))), Some(dec("1808.45")));
        assert_eq!(coerce_decimal(Some(&json!(48))), Some(dec("48")));
    }

    #[test]
    fn test_decimal_from_numeric_string_with_whitespace() {
        assert_eq!(coerce_decimal(Some(&json!(" 6.4 "))), Some(dec("6.4")));
    }

    #[test]
    fn test_decimal_from_scientific_string() {
        assert_eq!(coerce_decimal(Some(&json!("1.5e3"))), Some(dec("1500")));
    }

    #[test]
    fn test_non_numeric_values_are_absent() {
        assert_eq!(coerce_decimal(Some(&json!("six"))), None);
        assert_eq!(coerce_decimal(Some(&json!(""))), None);
        assert_eq!(coerce_decimal(Some(&json!(null))), None);
        assert_eq!(coerce_decimal(Some(&json!(true))), None);
        assert_eq!(coerce_decimal(Some(&json!([1]))), None);
    }

    #[test]
    fn test_digit_separators_are_not_numeric() {
        assert_eq!(coerce_decimal(Some(&json!("1_000"))), None);
        assert_eq!(coerce_decimal(Some(&json!("236_.88"))), None);
        assert_eq!(coerce_count(Some(&json!("1_4"))), 0);
    }

    #[test]
    fn test_decimal_field_separates_blank_from_invalid() {
        assert_eq!(coerce_decimal_field(None), FieldInput::Absent);
        assert_eq!(coerce_decimal_field(Some(&json!(null))), FieldInput::Absent);
        assert_eq!(coerce_decimal_field(Some(&json!("  "))), FieldInput::Absent);
        assert_eq!(
            coerce_decimal_field(Some(&json!("6.4"))),
            FieldInput::Valid(dec("6.4"))
        );
        assert_eq!(coerce_decimal_field(Some(&json!("six"))), FieldInput::Invalid);
        assert_eq!(coerce_decimal_field(Some(&json!("1_000"))), FieldInput::Invalid);
        assert_eq!(coerce_decimal_field(Some(&json!(false))), FieldInput::Invalid);
    }

    #[test]
    fn test_count_truncates_toward_zero() {
        assert_eq!(coerce_count(Some(&json!(14.9))), 14);
        assert_eq!(coerce_count(Some(&json!("-2.7"))), -2);
    }

    #[test]
    fn test_count_absent_is_zero() {
        assert_eq!(coerce_count(None), 0);
        assert_eq!(coerce_count(Some(&json!("n/a"))), 0);
    }

    #[test]
    fn test_count_saturates_out_of_range() {
        assert_eq!(coerce_count(Some(&json!("1e25"))), i64::MAX);
        assert_eq!(coerce_count(Some(&json!("-1e25"))), i64::MIN);
    }

    #[test]
    fn test_date_parses_iso_strings_only() {
        assert_eq!(
            coerce_date(Some(&json!("2019-09-16"))),
            NaiveDate::from_ymd_opt(2019, 9, 16)
        );
        assert_eq!(coerce_date(Some(&json!("16/09/2019"))), None);
        assert_eq!(coerce_date(Some(&json!(20190916))), None);
    }

    #[test]
    fn test_date_field_separates_blank_from_invalid() {
        assert_eq!(coerce_date_field(Some(&json!(""))), FieldInput::Absent);
        assert_eq!(coerce_date_field(Some(&json!(null))), FieldInput::Absent);
        assert_eq!(coerce_date_field(Some(&json!("03/01/2026"))), FieldInput::Invalid);
        assert_eq!(coerce_date_field(Some(&json!(20260301))), FieldInput::Invalid);
        assert_eq!(
            coerce_date_field(Some(&json!("2026-03-01"))),
            FieldInput::Valid(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
        );
    }
}
