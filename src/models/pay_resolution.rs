//! Pay table resolution model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of resolving a grade and YOS against the drill pay table.
///
/// # Example
///
/// ```
/// use reserve_offset_engine::models::PayResolution;
/// use rust_decimal::Decimal;
///
/// let resolution = PayResolution {
///     per_period_pay: Decimal::new(23688, 2),
///     bucket_label: "6-8".to_string(),
///     warning: None,
/// };
/// assert!(!resolution.is_fallback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResolution {
    /// "1 Drill" base pay for a single drill period.
    pub per_period_pay: Decimal,
    /// Label of the YOS bucket that was used (e.g., "6-8").
    pub bucket_label: String,
    /// Set when YOS is beyond the published table and the highest bucket was used.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warning: Option<String>,
}

impl PayResolution {
    /// Returns true if the highest bucket was used as a fallback.
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}
