//! Request types for the offset engine API.
//!
//! Numeric form fields are accepted as JSON numbers or strings and kept as
//! raw values here; [`crate::coerce`] turns them into typed inputs, treating
//! non-numeric amounts as absent. Dates are raw values too, so a malformed
//! date never rejects the whole request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce::{coerce_date_field, coerce_decimal, coerce_decimal_field};
use crate::error::{EngineError, EngineResult};
use crate::models::{FieldInput, MilitaryPayBasis, PayGrade};

/// Request body for the `/estimate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Monthly VA compensation.
    #[serde(default)]
    pub va_monthly: Option<Value>,
    /// How the per-period military pay is determined.
    pub military_pay: MilitaryPayRequest,
    /// Paid drill periods (UTAs).
    #[serde(default)]
    pub uta_count: Option<Value>,
    /// Active duty days.
    #[serde(default)]
    pub active_duty_days: Option<Value>,
    /// Reference date for YOS and rate schedule selection; defaults to today.
    #[serde(default)]
    pub as_of: Option<Value>,
}

impl EstimateRequest {
    /// Returns the reference date, `today` when none was given, or `None`
    /// when `as_of` is not a `YYYY-MM-DD` date.
    pub fn reference_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        reference_date(self.as_of.as_ref(), today)
    }
}

/// Military pay source in an estimate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MilitaryPayRequest {
    /// Per-period pay entered by the caller.
    Direct {
        /// The per-period amount.
        #[serde(default)]
        amount: Option<Value>,
    },
    /// Per-period pay looked up in the drill pay table.
    Table {
        /// The pay grade code (e.g., "E-4").
        grade: String,
        /// Creditable YOS override.
        #[serde(default)]
        yos_override: Option<Value>,
        /// Pay Entry Base Date, `YYYY-MM-DD`.
        #[serde(default)]
        pebd: Option<Value>,
    },
}

/// Request body for the `/resolve-pay` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvePayRequest {
    /// The pay grade code (e.g., "E-4").
    pub grade: String,
    /// Creditable YOS override.
    #[serde(default)]
    pub yos_override: Option<Value>,
    /// Pay Entry Base Date, `YYYY-MM-DD`.
    #[serde(default)]
    pub pebd: Option<Value>,
    /// Reference date for YOS and rate schedule selection; defaults to today.
    #[serde(default)]
    pub as_of: Option<Value>,
}

impl ResolvePayRequest {
    /// Returns the reference date, `today` when none was given, or `None`
    /// when `as_of` is not a `YYYY-MM-DD` date.
    pub fn reference_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        reference_date(self.as_of.as_ref(), today)
    }
}

fn reference_date(as_of: Option<&Value>, today: NaiveDate) -> Option<NaiveDate> {
    match coerce_date_field(as_of) {
        FieldInput::Absent => Some(today),
        FieldInput::Valid(date) => Some(date),
        FieldInput::Invalid => None,
    }
}

fn parse_grade(grade: &str) -> EngineResult<PayGrade> {
    grade.parse()
}

impl TryFrom<MilitaryPayRequest> for MilitaryPayBasis {
    type Error = EngineError;

    fn try_from(req: MilitaryPayRequest) -> EngineResult<Self> {
        match req {
            MilitaryPayRequest::Direct { amount } => {
                Ok(MilitaryPayBasis::Direct(coerce_decimal(amount.as_ref())))
            }
            MilitaryPayRequest::Table {
                grade,
                yos_override,
                pebd,
            } => Ok(MilitaryPayBasis::Table {
                grade: parse_grade(&grade)?,
                years_override: coerce_decimal_field(yos_override.as_ref()),
                pebd: coerce_date_field(pebd.as_ref()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_deserialize_direct_estimate_request() {
        let json = r#"{
            "va_monthly": "1808.45",
            "military_pay": { "source": "direct", "amount": 236.88 },
            "uta_count": 48,
            "active_duty_days": "14"
        }"#;

        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.reference_date(today()), Some(today()));
        let basis: MilitaryPayBasis = request.military_pay.try_into().unwrap();
        assert_eq!(basis, MilitaryPayBasis::Direct(Some(Decimal::new(23688, 2))));
    }

    #[test]
    fn test_deserialize_table_estimate_request() {
        let json = r#"{
            "va_monthly": 1808.45,
            "military_pay": {
                "source": "table",
                "grade": "E-4",
                "pebd": "2019-09-16",
                "yos_override": ""
            },
            "as_of": "2026-03-01"
        }"#;

        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.reference_date(today()),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        let basis: MilitaryPayBasis = request.military_pay.try_into().unwrap();
        assert_eq!(
            basis,
            MilitaryPayBasis::Table {
                grade: PayGrade::E4,
                years_override: FieldInput::Absent,
                pebd: NaiveDate::from_ymd_opt(2019, 9, 16).into(),
            }
        );
    }

    #[test]
    fn test_malformed_as_of_still_deserializes() {
        let json = r#"{
            "military_pay": { "source": "table", "grade": "E-4", "pebd": "2019-09-16" },
            "as_of": "03/01/2026"
        }"#;

        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.reference_date(today()), None);
    }

    #[test]
    fn test_null_or_blank_as_of_defaults_to_today() {
        for as_of in [json!(null), json!(""), json!("  ")] {
            let request = ResolvePayRequest {
                grade: "E-4".to_string(),
                yos_override: None,
                pebd: None,
                as_of: Some(as_of),
            };
            assert_eq!(request.reference_date(today()), Some(today()));
        }
    }

    #[test]
    fn test_unparseable_override_is_kept_apart_from_absent() {
        let req = MilitaryPayRequest::Table {
            grade: "E-4".to_string(),
            yos_override: Some(json!("six")),
            pebd: Some(json!("2019-09-16")),
        };
        let basis: MilitaryPayBasis = req.try_into().unwrap();
        assert_eq!(
            basis,
            MilitaryPayBasis::Table {
                grade: PayGrade::E4,
                years_override: FieldInput::Invalid,
                pebd: NaiveDate::from_ymd_opt(2019, 9, 16).into(),
            }
        );
    }

    #[test]
    fn test_unknown_grade_fails_conversion() {
        let req = MilitaryPayRequest::Table {
            grade: "E-12".to_string(),
            yos_override: None,
            pebd: None,
        };
        let result: EngineResult<MilitaryPayBasis> = req.try_into();
        assert!(matches!(result, Err(EngineError::UnknownGrade { .. })));
    }

    #[test]
    fn test_non_numeric_direct_amount_is_absent() {
        let req = MilitaryPayRequest::Direct {
            amount: Some(Value::String("lots".to_string())),
        };
        let basis: MilitaryPayBasis = req.try_into().unwrap();
        assert_eq!(basis, MilitaryPayBasis::Direct(None));
    }

    #[test]
    fn test_missing_military_pay_source_is_rejected() {
        let json = r#"{ "va_monthly": 100, "military_pay": { "amount": 5 } }"#;
        assert!(serde_json::from_str::<EstimateRequest>(json).is_err());
    }

    #[test]
    fn test_deserialize_resolve_request_with_defaults() {
        let request: ResolvePayRequest = serde_json::from_str(r#"{"grade": "O-1E"}"#).unwrap();
        assert_eq!(request.grade, "O-1E");
        assert!(request.yos_override.is_none());
        assert!(request.pebd.is_none());
        assert!(request.as_of.is_none());
        assert_eq!(request.reference_date(today()), Some(today()));
    }
}
