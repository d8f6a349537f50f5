//! Offset estimate models.
//!
//! This module contains the inputs to the offset estimator and the
//! [`OffsetResult`] record it produces.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FieldInput, PayGrade};

/// The estimator's recommendation for the overlapping days.
///
/// # Example
///
/// ```
/// use reserve_offset_engine::models::Recommendation;
///
/// let json = serde_json::to_string(&Recommendation::WaiveMilitaryPay).unwrap();
/// assert_eq!(json, "\"waive_military_pay\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Military pay for the days exceeds the VA amount recouped for them.
    TakeMilitaryPay,
    /// The VA amount for the days exceeds the military pay earned.
    WaiveMilitaryPay,
    /// The two are within one cent of each other.
    Either,
}

impl Recommendation {
    /// Returns a short human-readable description of the recommendation.
    pub fn description(self) -> &'static str {
        match self {
            Recommendation::TakeMilitaryPay => "Take military pay (VA will recoup later)",
            Recommendation::WaiveMilitaryPay => "Waive military pay (keep VA for those days)",
            Recommendation::Either => "Either (about break-even)",
        }
    }
}

/// Where the per-period military pay figure comes from.
///
/// The estimator only needs an amount; the drill pay table is one way of
/// producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilitaryPayBasis {
    /// An amount supplied directly by the caller, if one was given.
    Direct(Option<Decimal>),
    /// "1 Drill" pay resolved from the table for a grade and YOS.
    Table {
        /// The member's pay grade.
        grade: PayGrade,
        /// Creditable YOS entered directly, taking precedence over `pebd`.
        years_override: FieldInput<Decimal>,
        /// Pay Entry Base Date to measure YOS from.
        pebd: FieldInput<NaiveDate>,
    },
}

/// Inputs to the offset estimator.
///
/// Day counts are raw caller values: the estimator treats a negative count
/// as zero rather than rejecting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetInputs {
    /// Monthly VA disability compensation.
    pub va_monthly: Decimal,
    /// Military base pay for one drill period or one active duty day.
    pub military_pay: Decimal,
    /// Paid drill periods (UTAs).
    pub uta_count: i64,
    /// Active duty days (AT, ADOS and similar orders).
    pub active_duty_days: i64,
}

/// The result of an offset estimate.
///
/// Currency fields are rounded to cents, half away from zero. The
/// recommendation is decided on the unrounded net advantage.
///
/// # Example
///
/// ```
/// use reserve_offset_engine::models::{OffsetResult, Recommendation};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = OffsetResult {
///     waiver_days: 2,
///     va_daily: Decimal::from_str("50.00").unwrap(),
///     mil_daily: Decimal::from_str("120.00").unwrap(),
///     va_recoupment_estimated: Decimal::from_str("100.00").unwrap(),
///     mil_gross_earned_estimated: Decimal::from_str("240.00").unwrap(),
///     net_advantage_gross: Decimal::from_str("140.00").unwrap(),
///     break_even_va_monthly: Decimal::from_str("3600.00").unwrap(),
///     recommendation: Recommendation::TakeMilitaryPay,
/// };
/// assert_eq!(result.waiver_days, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetResult {
    /// Drill periods plus active duty days, each floored at zero.
    pub waiver_days: u64,
    /// VA compensation per day, on a 30-day month.
    pub va_daily: Decimal,
    /// Military pay per drill period or active duty day.
    pub mil_daily: Decimal,
    /// VA compensation estimated to be recouped for the waiver days.
    pub va_recoupment_estimated: Decimal,
    /// Gross military base pay estimated earned for the waiver days.
    pub mil_gross_earned_estimated: Decimal,
    /// Military gross earned minus VA recouped.
    pub net_advantage_gross: Decimal,
    /// The monthly VA amount at which both choices are worth the same.
    pub break_even_va_monthly: Decimal,
    /// The recommended choice.
    pub recommendation: Recommendation,
}
