//! Configuration types for the drill pay table.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PayGrade;

/// Metadata about the pay table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Short identifier for the table (e.g., "dfas_rc_drill").
    pub code: String,
    /// The human-readable name of the table.
    pub name: String,
    /// A description of what the amounts represent.
    pub description: String,
    /// URL to the published table.
    pub source_url: String,
}

/// A creditable years-of-service bucket, covering `[min_years, max_years)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YosBucket {
    /// The column label (e.g., "6-8").
    pub label: String,
    /// Inclusive lower bound.
    pub min_years: Decimal,
    /// Exclusive upper bound.
    pub max_years: Decimal,
}

impl YosBucket {
    /// Returns true if `years` falls inside this bucket.
    pub fn contains(&self, years: Decimal) -> bool {
        years >= self.min_years && years < self.max_years
    }
}

/// Buckets configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketsConfig {
    /// YOS buckets in ascending order.
    pub buckets: Vec<YosBucket>,
}

/// "1 Drill" amounts for every grade, effective from a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSchedule {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Per-grade amounts, one per YOS bucket in bucket order.
    pub rates: BTreeMap<PayGrade, Vec<Decimal>>,
}

impl RateSchedule {
    /// Returns the per-bucket amounts for a grade.
    pub fn rates_for(&self, grade: PayGrade) -> Option<&[Decimal]> {
        self.rates.get(&grade).map(Vec::as_slice)
    }
}

/// The complete drill pay table loaded from YAML files.
///
/// Aggregates metadata, the YOS buckets shared by every grade, and one or
/// more rate schedules sorted oldest first. A `PayTable` is never mutated
/// once built; a newer table replaces it wholesale.
#[derive(Debug, Clone)]
pub struct PayTable {
    metadata: TableMetadata,
    buckets: Vec<YosBucket>,
    schedules: Vec<RateSchedule>,
}

impl PayTable {
    /// Creates a new PayTable from its component parts.
    pub fn new(
        metadata: TableMetadata,
        buckets: Vec<YosBucket>,
        schedules: Vec<RateSchedule>,
    ) -> Self {
        let mut sorted_schedules = schedules;
        sorted_schedules.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            buckets,
            schedules: sorted_schedules,
        }
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Returns the YOS buckets in ascending order.
    pub fn buckets(&self) -> &[YosBucket] {
        &self.buckets
    }

    /// Returns all rate schedules, oldest first.
    pub fn schedules(&self) -> &[RateSchedule] {
        &self.schedules
    }

    /// Returns the most recent rate schedule that is effective on `date`.
    pub fn schedule_on(&self, date: NaiveDate) -> EngineResult<&RateSchedule> {
        self.schedules
            .iter()
            .rfind(|s| s.effective_date <= date)
            .ok_or(EngineError::ScheduleNotFound { date })
    }

    /// Returns the newest rate schedule.
    pub fn latest_schedule(&self) -> EngineResult<&RateSchedule> {
        self.schedules
            .last()
            .ok_or_else(|| EngineError::InvalidPayTable {
                message: "table has no rate schedules".to_string(),
            })
    }

    /// Checks the data invariants the resolver relies on.
    ///
    /// Buckets must start at zero and be contiguous with `max_years > min_years`.
    /// Every schedule must carry every grade with one positive amount per bucket.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidPayTable { message });

        let Some(first) = self.buckets.first() else {
            return invalid("table has no YOS buckets".to_string());
        };
        if !first.min_years.is_zero() {
            return invalid(format!(
                "first bucket '{}' starts at {} instead of 0",
                first.label, first.min_years
            ));
        }
        for bucket in &self.buckets {
            if bucket.max_years <= bucket.min_years {
                return invalid(format!("bucket '{}' has an empty range", bucket.label));
            }
        }
        for pair in self.buckets.windows(2) {
            if pair[1].min_years != pair[0].max_years {
                return invalid(format!(
                    "bucket '{}' does not start where '{}' ends",
                    pair[1].label, pair[0].label
                ));
            }
        }

        if self.schedules.is_empty() {
            return invalid("table has no rate schedules".to_string());
        }
        for schedule in &self.schedules {
            for grade in PayGrade::ALL {
                let Some(amounts) = schedule.rates_for(grade) else {
                    return invalid(format!(
                        "schedule {} has no rates for {}",
                        schedule.effective_date, grade
                    ));
                };
                if amounts.len() != self.buckets.len() {
                    return invalid(format!(
                        "schedule {} has {} rates for {} but the table has {} buckets",
                        schedule.effective_date,
                        amounts.len(),
                        grade,
                        self.buckets.len()
                    ));
                }
                if let Some(amount) = amounts.iter().find(|a| **a <= Decimal::ZERO) {
                    return invalid(format!(
                        "schedule {} has a non-positive rate {} for {}",
                        schedule.effective_date, amount, grade
                    ));
                }
            }
        }

        Ok(())
    }
}
