//! Core data models for the offset engine.
//!
//! This module contains the value types passed between the pay table
//! resolver, the offset estimator and the HTTP API.

mod estimate_report;
mod field_input;
mod offset;
mod pay_grade;
mod pay_resolution;

pub use estimate_report::{AuditStep, AuditTrace, AuditWarning, EstimateReport, TableReference};
pub use field_input::FieldInput;
pub use offset::{MilitaryPayBasis, OffsetInputs, OffsetResult, Recommendation};
pub use pay_grade::PayGrade;
pub use pay_resolution::PayResolution;
