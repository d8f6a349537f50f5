//! Estimate report models.
//!
//! This module contains the [`EstimateReport`] returned to callers of the
//! HTTP API, wrapping the pure [`OffsetResult`] with the figures it was
//! derived from and an audit trace of every decision.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OffsetResult, PayResolution};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but should be shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use reserve_offset_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Identifies the pay table version a resolution was made against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReference {
    /// The table code (e.g., "dfas_rc_drill").
    pub code: String,
    /// Effective date of the rate schedule that was used.
    pub effective_date: NaiveDate,
}

/// The full response to an estimate request.
///
/// `result` is `None` when the inputs are incomplete (no positive VA amount,
/// no positive military pay, or unknown YOS). `notice` then says what is
/// missing so the caller can prompt for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The date YOS was measured at, or `None` when the request's `as_of`
    /// could not be parsed.
    pub as_of: Option<NaiveDate>,
    /// Creditable years of service used for the table lookup, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub years_of_service: Option<Decimal>,
    /// The table lookup, when military pay came from the table.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pay_resolution: Option<PayResolution>,
    /// The table version used for the lookup.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub table: Option<TableReference>,
    /// The offset estimate, or `None` when inputs are incomplete.
    pub result: Option<OffsetResult>,
    /// Prompt describing missing input when `result` is `None`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notice: Option<String>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
