//! Creditable years of service derivation.
//!
//! This module derives YOS from a Pay Entry Base Date (PEBD) or a direct
//! override. The reference date is always passed in; nothing here reads the
//! clock.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, FieldInput};

/// Days per year used to convert elapsed days into years of service.
pub fn days_per_year() -> Decimal {
    Decimal::new(36525, 2)
}

/// Parses a PEBD in `YYYY-MM-DD` form, returning `None` for anything else.
///
/// # Examples
///
/// ```
/// use reserve_offset_engine::calculation::parse_pebd;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_pebd("2019-09-16"), NaiveDate::from_ymd_opt(2019, 9, 16));
/// assert_eq!(parse_pebd("09/16/2019"), None);
/// ```
pub fn parse_pebd(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Returns the creditable years of service between `pebd` and `as_of`.
///
/// A PEBD after `as_of` yields zero.
///
/// # Examples
///
/// ```
/// use reserve_offset_engine::calculation::years_of_service;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let pebd = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// assert_eq!(years_of_service(pebd, as_of), Decimal::ZERO);
/// ```
pub fn years_of_service(pebd: NaiveDate, as_of: NaiveDate) -> Decimal {
    let days = (as_of - pebd).num_days().max(0);
    Decimal::from(days) / days_per_year()
}

/// The result of deriving YOS, including the audit step.
#[derive(Debug, Clone)]
pub struct YosDerivationResult {
    /// The derived YOS, or `None` when YOS is unknown.
    pub years: Option<Decimal>,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives creditable YOS for a table lookup.
///
/// `as_of` is `None` when the caller's reference date could not be parsed.
///
/// Priority:
/// 1. Without a reference date, YOS is unknown
/// 2. An unparseable override makes YOS unknown, even when a PEBD is given
/// 3. A parsed override is used, clamped at zero
/// 4. Otherwise a parsed PEBD is measured to `as_of`
/// 5. Otherwise YOS is unknown
pub fn derive_years_of_service(
    override_years: FieldInput<Decimal>,
    pebd: FieldInput<NaiveDate>,
    as_of: Option<NaiveDate>,
    step_number: u32,
) -> YosDerivationResult {
    let input = serde_json::json!({
        "override_years": override_years,
        "pebd": pebd,
        "as_of": as_of.map(|d| d.to_string())
    });

    let (years, source, reasoning) = match (as_of, override_years, pebd) {
        (None, _, _) => (
            None,
            "invalid_as_of",
            "as_of is not a YYYY-MM-DD date; YOS is unknown".to_string(),
        ),
        (Some(_), FieldInput::Invalid, _) => (
            None,
            "invalid_override",
            "YOS override is not a number; YOS is unknown".to_string(),
        ),
        (Some(_), FieldInput::Valid(years), _) => {
            let years = years.max(Decimal::ZERO);
            (
                Some(years),
                "override",
                format!("Using creditable YOS override {}", years.normalize()),
            )
        }
        (Some(as_of), FieldInput::Absent, FieldInput::Valid(pebd)) => {
            let years = years_of_service(pebd, as_of);
            (
                Some(years),
                "pebd",
                format!(
                    "{} days from PEBD {} to {} / 365.25 = {} years",
                    (as_of - pebd).num_days().max(0),
                    pebd,
                    as_of,
                    years.round_dp(2)
                ),
            )
        }
        (Some(_), FieldInput::Absent, FieldInput::Invalid) => (
            None,
            "invalid_pebd",
            "PEBD is not a YYYY-MM-DD date; YOS is unknown".to_string(),
        ),
        (Some(_), FieldInput::Absent, FieldInput::Absent) => (
            None,
            "unknown",
            "No YOS override or PEBD supplied; YOS is unknown".to_string(),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "years_of_service".to_string(),
        rule_name: "Creditable Years of Service".to_string(),
        input,
        output: serde_json::json!({
            "years": years.map(|y| y.round_dp(4).to_string()),
            "source": source
        }),
        reasoning,
    };

    YosDerivationResult { years, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_years_of_service_for_exact_julian_years() {
        // 1461 days is four 365.25-day years
        let pebd = date(2020, 1, 1);
        let as_of = pebd + chrono::Duration::days(1461);
        assert_eq!(years_of_service(pebd, as_of), dec("4"));
    }

    #[test]
    fn test_years_of_service_same_day_is_zero() {
        let d = date(2026, 5, 1);
        assert_eq!(years_of_service(d, d), Decimal::ZERO);
    }

    #[test]
    fn test_future_pebd_yields_zero_not_negative() {
        assert_eq!(
            years_of_service(date(2027, 1, 1), date(2026, 1, 1)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_years_of_service_fractional() {
        let yos = years_of_service(date(2019, 9, 16), date(2026, 1, 31));
        assert!(yos > dec("6.37") && yos < dec("6.38"), "got {}", yos);
    }

    #[test]
    fn test_parse_pebd_accepts_iso_date_with_whitespace() {
        assert_eq!(parse_pebd(" 2019-09-16 "), Some(date(2019, 9, 16)));
    }

    #[test]
    fn test_parse_pebd_rejects_invalid_dates() {
        assert_eq!(parse_pebd(""), None);
        assert_eq!(parse_pebd("2019-02-30"), None);
        assert_eq!(parse_pebd("not a date"), None);
    }

    #[test]
    fn test_override_takes_precedence_over_pebd() {
        let result = derive_years_of_service(
            FieldInput::Valid(dec("6.4")),
            FieldInput::Valid(date(2000, 1, 1)),
            Some(date(2026, 1, 1)),
            1,
        );
        assert_eq!(result.years, Some(dec("6.4")));
        assert_eq!(result.audit_step.output["source"], "override");
    }

    #[test]
    fn test_negative_override_is_clamped_to_zero() {
        let result = derive_years_of_service(
            FieldInput::Valid(dec("-2")),
            FieldInput::Absent,
            Some(date(2026, 1, 1)),
            1,
        );
        assert_eq!(result.years, Some(Decimal::ZERO));
    }

    #[test]
    fn test_pebd_used_when_no_override() {
        let result = derive_years_of_service(
            FieldInput::Absent,
            FieldInput::Valid(date(2022, 1, 1)),
            Some(date(2026, 1, 1)),
            3,
        );
        let years = result.years.unwrap();
        assert!(years > dec("3.99") && years < dec("4.01"), "got {}", years);
        assert_eq!(result.audit_step.output["source"], "pebd");
        assert_eq!(result.audit_step.step_number, 3);
        assert!(result.audit_step.reasoning.contains("1461 days"));
    }

    #[test]
    fn test_unknown_when_no_inputs() {
        let result = derive_years_of_service(
            FieldInput::Absent,
            FieldInput::Absent,
            Some(date(2026, 1, 1)),
            1,
        );
        assert_eq!(result.years, None);
        assert_eq!(result.audit_step.output["source"], "unknown");
        assert!(result.audit_step.output["years"].is_null());
    }

    #[test]
    fn test_unparseable_override_does_not_fall_back_to_pebd() {
        let result = derive_years_of_service(
            FieldInput::Invalid,
            FieldInput::Valid(date(2019, 9, 16)),
            Some(date(2026, 3, 1)),
            1,
        );
        assert_eq!(result.years, None);
        assert_eq!(result.audit_step.output["source"], "invalid_override");
        assert_eq!(result.audit_step.input["override_years"]["state"], "invalid");
    }

    #[test]
    fn test_unparseable_pebd_is_unknown() {
        let result = derive_years_of_service(
            FieldInput::Absent,
            FieldInput::Invalid,
            Some(date(2026, 3, 1)),
            1,
        );
        assert_eq!(result.years, None);
        assert_eq!(result.audit_step.output["source"], "invalid_pebd");
    }

    #[test]
    fn test_override_ignores_unparseable_pebd() {
        let result = derive_years_of_service(
            FieldInput::Valid(dec("4")),
            FieldInput::Invalid,
            Some(date(2026, 3, 1)),
            1,
        );
        assert_eq!(result.years, Some(dec("4")));
    }

    #[test]
    fn test_missing_reference_date_is_unknown_even_with_override() {
        let result = derive_years_of_service(
            FieldInput::Valid(dec("6.4")),
            FieldInput::Absent,
            None,
            1,
        );
        assert_eq!(result.years, None);
        assert_eq!(result.audit_step.output["source"], "invalid_as_of");
        assert!(result.audit_step.input["as_of"].is_null());
    }
}
