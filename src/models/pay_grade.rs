//! Pay grade model.
//!
//! This module defines the closed set of reserve-component pay grades that
//! the drill pay table is keyed by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A military pay grade.
///
/// Enlisted, warrant officer and commissioned officer grades, including the
/// O-1E to O-3E variants for officers with more than four years of prior
/// enlisted or warrant service. Grades serialize as their display string.
///
/// # Example
///
/// ```
/// use reserve_offset_engine::models::PayGrade;
///
/// let grade: PayGrade = "O-2E".parse().unwrap();
/// assert_eq!(grade, PayGrade::O2E);
/// assert_eq!(grade.to_string(), "O-2E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PayGrade {
    /// Pay grade E-1.
    #[serde(rename = "E-1")]
    E1,
    /// Pay grade E-2.
    #[serde(rename = "E-2")]
    E2,
    /// Pay grade E-3.
    #[serde(rename = "E-3")]
    E3,
    /// Pay grade E-4.
    #[serde(rename = "E-4")]
    E4,
    /// Pay grade E-5.
    #[serde(rename = "E-5")]
    E5,
    /// Pay grade E-6.
    #[serde(rename = "E-6")]
    E6,
    /// Pay grade E-7.
    #[serde(rename = "E-7")]
    E7,
    /// Pay grade E-8.
    #[serde(rename = "E-8")]
    E8,
    /// Pay grade E-9.
    #[serde(rename = "E-9")]
    E9,
    /// Pay grade W-1.
    #[serde(rename = "W-1")]
    W1,
    /// Pay grade W-2.
    #[serde(rename = "W-2")]
    W2,
    /// Pay grade W-3.
    #[serde(rename = "W-3")]
    W3,
    /// Pay grade W-4.
    #[serde(rename = "W-4")]
    W4,
    /// Pay grade W-5.
    #[serde(rename = "W-5")]
    W5,
    /// Pay grade O-1.
    #[serde(rename = "O-1")]
    O1,
    /// Pay grade O-2.
    #[serde(rename = "O-2")]
    O2,
    /// Pay grade O-3.
    #[serde(rename = "O-3")]
    O3,
    /// Pay grade O-4.
    #[serde(rename = "O-4")]
    O4,
    /// Pay grade O-5.
    #[serde(rename = "O-5")]
    O5,
    /// Pay grade O-6.
    #[serde(rename = "O-6")]
    O6,
    /// Pay grade O-7.
    #[serde(rename = "O-7")]
    O7,
    /// Pay grade O-1E.
    #[serde(rename = "O-1E")]
    O1E,
    /// Pay grade O-2E.
    #[serde(rename = "O-2E")]
    O2E,
    /// Pay grade O-3E.
    #[serde(rename = "O-3E")]
    O3E,
}

impl PayGrade {
    /// Every pay grade, in the order the pay table lists them.
    pub const ALL: [PayGrade; 24] = [
        PayGrade::E1,
        PayGrade::E2,
        PayGrade::E3,
        PayGrade::E4,
        PayGrade::E5,
        PayGrade::E6,
        PayGrade::E7,
        PayGrade::E8,
        PayGrade::E9,
        PayGrade::W1,
        PayGrade::W2,
        PayGrade::W3,
        PayGrade::W4,
        PayGrade::W5,
        PayGrade::O1,
        PayGrade::O2,
        PayGrade::O3,
        PayGrade::O4,
        PayGrade::O5,
        PayGrade::O6,
        PayGrade::O7,
        PayGrade::O1E,
        PayGrade::O2E,
        PayGrade::O3E,
    ];

    /// Returns the display code for the grade (e.g., "E-4").
    pub fn code(self) -> &'static str {
        match self {
            PayGrade::E1 => "E-1",
            PayGrade::E2 => "E-2",
            PayGrade::E3 => "E-3",
            PayGrade::E4 => "E-4",
            PayGrade::E5 => "E-5",
            PayGrade::E6 => "E-6",
            PayGrade::E7 => "E-7",
            PayGrade::E8 => "E-8",
            PayGrade::E9 => "E-9",
            PayGrade::W1 => "W-1",
            PayGrade::W2 => "W-2",
            PayGrade::W3 => "W-3",
            PayGrade::W4 => "W-4",
            PayGrade::W5 => "W-5",
            PayGrade::O1 => "O-1",
            PayGrade::O2 => "O-2",
            PayGrade::O3 => "O-3",
            PayGrade::O4 => "O-4",
            PayGrade::O5 => "O-5",
            PayGrade::O6 => "O-6",
            PayGrade::O7 => "O-7",
            PayGrade::O1E => "O-1E",
            PayGrade::O2E => "O-2E",
            PayGrade::O3E => "O-3E",
        }
    }
}

impl fmt::Display for PayGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PayGrade {
    type Err = EngineError;

    /// Parses a grade code, ignoring surrounding whitespace and letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        PayGrade::ALL
            .into_iter()
            .find(|grade| grade.code() == normalized)
            .ok_or_else(|| EngineError::UnknownGrade {
                grade: s.to_string(),
            })
    }
}
