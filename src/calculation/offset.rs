//! VA offset estimation.
//!
//! This module compares the VA compensation recouped for days that are also
//! paid as drill periods or active duty against the military base pay earned
//! for those same days.
//!
//! The model treats one drill period (UTA) and one active duty day as the
//! same pay unit, and VA compensation per day as the monthly amount over a
//! fixed 30-day month. Both are approximations of VA/DFAS practice, not an
//! exact reproduction of it.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, OffsetInputs, OffsetResult, Recommendation};

/// Days in the month VA compensation is normalized to.
pub fn days_per_va_month() -> Decimal {
    Decimal::from(30)
}

/// Net advantage within this amount of zero is treated as break-even.
pub fn recommendation_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Rounds a currency amount to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use reserve_offset_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// assert_eq!(round_currency(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Chooses the recommendation for an unrounded net advantage.
pub fn recommend(net_advantage: Decimal) -> Recommendation {
    let tolerance = recommendation_tolerance();
    if net_advantage > tolerance {
        Recommendation::TakeMilitaryPay
    } else if net_advantage < -tolerance {
        Recommendation::WaiveMilitaryPay
    } else {
        Recommendation::Either
    }
}

/// Estimates the VA offset for overlapping drill and active duty days.
///
/// Each drill period and each active duty day counts as one day of VA
/// compensation on a 30-day month. This is an approximation, not a DFAS-exact
/// computation.
///
/// Negative day counts are treated as zero. Intermediate values keep full
/// precision; currency fields are rounded only when the result is built.
///
/// # Errors
///
/// Returns `InvalidInput` if `va_monthly` or `military_pay` is not positive,
/// or if the amounts are too large to represent.
///
/// # Examples
///
/// ```
/// use reserve_offset_engine::calculation::estimate_offset;
/// use reserve_offset_engine::models::{OffsetInputs, Recommendation};
/// use rust_decimal::Decimal;
///
/// let inputs = OffsetInputs {
///     va_monthly: Decimal::new(150000, 2),
///     military_pay: Decimal::new(12000, 2),
///     uta_count: 4,
///     active_duty_days: 0,
/// };
/// let result = estimate_offset(&inputs).unwrap();
/// assert_eq!(result.va_daily, Decimal::new(5000, 2));
/// assert_eq!(result.net_advantage_gross, Decimal::new(28000, 2));
/// assert_eq!(result.recommendation, Recommendation::TakeMilitaryPay);
/// ```
pub fn estimate_offset(inputs: &OffsetInputs) -> EngineResult<OffsetResult> {
    if inputs.va_monthly <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "va_monthly".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if inputs.military_pay <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "military_pay".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    let waiver_days =
        inputs.uta_count.max(0).unsigned_abs() + inputs.active_duty_days.max(0).unsigned_abs();
    let days = Decimal::from(waiver_days);

    let va_daily = inputs.va_monthly / days_per_va_month();
    let mil_daily = inputs.military_pay;

    let overflow = || EngineError::InvalidInput {
        field: "waiver_days".to_string(),
        message: "amounts are too large to estimate".to_string(),
    };
    let va_recoupment = va_daily.checked_mul(days).ok_or_else(overflow)?;
    let mil_gross_earned = mil_daily.checked_mul(days).ok_or_else(overflow)?;
    let net_advantage = mil_gross_earned - va_recoupment;
    let break_even_va_monthly = mil_daily
        .checked_mul(days_per_va_month())
        .ok_or_else(overflow)?;

    Ok(OffsetResult {
        waiver_days,
        va_daily: round_currency(va_daily),
        mil_daily: round_currency(mil_daily),
        va_recoupment_estimated: round_currency(va_recoupment),
        mil_gross_earned_estimated: round_currency(mil_gross_earned),
        net_advantage_gross: round_currency(net_advantage),
        break_even_va_monthly: round_currency(break_even_va_monthly),
        recommendation: recommend(net_advantage),
    })
}

/// The result of an offset estimate, including the audit step.
#[derive(Debug, Clone)]
pub struct OffsetEstimateResult {
    /// The estimate.
    pub result: OffsetResult,
    /// The audit step recording this estimate.
    pub audit_step: AuditStep,
}

/// Estimates the VA offset and records an audit step.
pub fn estimate_offset_with_audit(
    inputs: &OffsetInputs,
    step_number: u32,
) -> EngineResult<OffsetEstimateResult> {
    let result = estimate_offset(inputs)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "va_offset_estimate".to_string(),
        rule_name: "VA Offset Estimate".to_string(),
        input: serde_json::json!({
            "va_monthly": inputs.va_monthly.to_string(),
            "military_pay": inputs.military_pay.to_string(),
            "uta_count": inputs.uta_count,
            "active_duty_days": inputs.active_duty_days
        }),
        output: serde_json::json!({
            "waiver_days": result.waiver_days,
            "va_daily": result.va_daily.to_string(),
            "va_recoupment_estimated": result.va_recoupment_estimated.to_string(),
            "mil_gross_earned_estimated": result.mil_gross_earned_estimated.to_string(),
            "net_advantage_gross": result.net_advantage_gross.to_string(),
            "break_even_va_monthly": result.break_even_va_monthly.to_string(),
            "recommendation": result.recommendation
        }),
        reasoning: format!(
            "{} waiver days: ${} military gross - ${} VA recouped = ${}; {}",
            result.waiver_days,
            result.mil_gross_earned_estimated,
            result.va_recoupment_estimated,
            result.net_advantage_gross,
            result.recommendation.description()
        ),
    };

    Ok(OffsetEstimateResult { result, audit_step })
}
