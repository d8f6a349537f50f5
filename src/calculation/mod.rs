//! Calculation logic for the offset engine.
//!
//! This module contains creditable years-of-service derivation, drill pay
//! table resolution, and the VA offset estimate itself.

mod offset;
mod pay_table;
mod years_of_service;

pub use offset::{
    OffsetEstimateResult, days_per_va_month, estimate_offset, estimate_offset_with_audit,
    recommend, recommendation_tolerance, round_currency,
};
pub use pay_table::{DrillPayLookupResult, lookup_drill_pay, resolve_pay, resolve_pay_on};
pub use years_of_service::{
    YosDerivationResult, days_per_year, derive_years_of_service, parse_pebd, years_of_service,
};
