//! Drill pay table resolution.
//!
//! This module resolves a pay grade and creditable years of service to a
//! "1 Drill" per-period base pay amount.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{PayTable, RateSchedule, YosBucket};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayGrade, PayResolution};

/// Resolves a grade and YOS against the newest rate schedule in the table.
///
/// A negative `yos` is treated as zero. When `yos` is at or beyond the upper
/// bound of the last bucket, the last bucket is used and
/// [`PayResolution::warning`] is set.
///
/// # Errors
///
/// Returns `UnknownGrade` if the schedule has no row for `grade`.
///
/// # Examples
///
/// ```no_run
/// use reserve_offset_engine::calculation::resolve_pay;
/// use reserve_offset_engine::config::TableLoader;
/// use reserve_offset_engine::models::PayGrade;
/// use rust_decimal::Decimal;
///
/// let table = TableLoader::load("./config/rc_drill_pay").unwrap().into_table();
/// let resolution = resolve_pay(&table, PayGrade::E4, Decimal::new(64, 1)).unwrap();
/// assert_eq!(resolution.bucket_label, "6-8");
/// assert!(resolution.warning.is_none());
/// ```
pub fn resolve_pay(table: &PayTable, grade: PayGrade, yos: Decimal) -> EngineResult<PayResolution> {
    resolve_in_schedule(table.buckets(), table.latest_schedule()?, grade, yos)
}

/// Resolves a grade and YOS against the rate schedule effective on `date`.
///
/// # Errors
///
/// Returns `ScheduleNotFound` if no schedule is effective on `date`, or
/// `UnknownGrade` if the schedule has no row for `grade`.
pub fn resolve_pay_on(
    table: &PayTable,
    grade: PayGrade,
    yos: Decimal,
    date: NaiveDate,
) -> EngineResult<PayResolution> {
    resolve_in_schedule(table.buckets(), table.schedule_on(date)?, grade, yos)
}

fn resolve_in_schedule(
    buckets: &[YosBucket],
    schedule: &RateSchedule,
    grade: PayGrade,
    yos: Decimal,
) -> EngineResult<PayResolution> {
    let yos = yos.max(Decimal::ZERO);

    let amounts = schedule
        .rates_for(grade)
        .ok_or_else(|| EngineError::UnknownGrade {
            grade: grade.to_string(),
        })?;

    let last_index = buckets
        .len()
        .checked_sub(1)
        .ok_or_else(|| EngineError::InvalidPayTable {
            message: "table has no YOS buckets".to_string(),
        })?;

    let (index, warning) = match buckets.iter().position(|b| b.contains(yos)) {
        Some(index) => (index, None),
        None => {
            let top = &buckets[last_index];
            (
                last_index,
                Some(format!(
                    "YOS {} exceeds published table maximum of {} years; using highest bracket ({})",
                    yos.round_dp(2).normalize(),
                    top.max_years.normalize(),
                    top.label
                )),
            )
        }
    };

    let per_period_pay = *amounts
        .get(index)
        .ok_or_else(|| EngineError::InvalidPayTable {
            message: format!("no rate for {} in bucket '{}'", grade, buckets[index].label),
        })?;

    Ok(PayResolution {
        per_period_pay,
        bucket_label: buckets[index].label.clone(),
        warning,
    })
}

/// The result of a drill pay lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct DrillPayLookupResult {
    /// The resolved per-period pay and bucket.
    pub resolution: PayResolution,
    /// Effective date of the rate schedule that was used.
    pub effective_date: NaiveDate,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up "1 Drill" pay on the schedule effective on `as_of` and records an audit step.
pub fn lookup_drill_pay(
    table: &PayTable,
    grade: PayGrade,
    yos: Decimal,
    as_of: NaiveDate,
    step_number: u32,
) -> EngineResult<DrillPayLookupResult> {
    let schedule = table.schedule_on(as_of)?;
    let resolution = resolve_in_schedule(table.buckets(), schedule, grade, yos)?;

    let mut reasoning = format!(
        "{} with {} YOS falls in bucket '{}' of the {} table effective {}: ${} per drill period",
        grade,
        yos.round_dp(2).normalize(),
        resolution.bucket_label,
        table.metadata().code,
        schedule.effective_date,
        resolution.per_period_pay
    );
    if let Some(warning) = &resolution.warning {
        reasoning.push_str(&format!(" ({})", warning));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "drill_pay_lookup".to_string(),
        rule_name: "Drill Pay Table Lookup".to_string(),
        input: serde_json::json!({
            "grade": grade,
            "years_of_service": yos.round_dp(4).to_string(),
            "as_of": as_of.to_string()
        }),
        output: serde_json::json!({
            "per_period_pay": resolution.per_period_pay.to_string(),
            "bucket_label": resolution.bucket_label,
            "fallback": resolution.is_fallback(),
            "table": table.metadata().code,
            "rate_effective_date": schedule.effective_date.to_string()
        }),
        reasoning,
    };

    Ok(DrillPayLookupResult {
        resolution,
        effective_date: schedule.effective_date,
        audit_step,
    })
}
