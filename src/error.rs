//! Error types for the offset engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during pay resolution and offset
//! estimation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the offset engine.
///
/// All fallible operations in the engine return this error type. A YOS value
/// beyond the published table is not an error: it is reported through
/// [`PayResolution::warning`](crate::models::PayResolution::warning).
///
/// # Example
///
/// ```
/// use reserve_offset_engine::error::EngineError;
///
/// let error = EngineError::UnknownGrade {
///     grade: "E-10".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown pay grade: E-10");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The pay table parsed but violates its data invariants.
    #[error("Invalid pay table: {message}")]
    InvalidPayTable {
        /// A description of the violated invariant.
        message: String,
    },

    /// The pay grade is not part of the grade enumeration or the table has no row for it.
    #[error("Unknown pay grade: {grade}")]
    UnknownGrade {
        /// The grade as supplied by the caller.
        grade: String,
    },

    /// No rate schedule is effective on the requested date.
    #[error("No rate schedule effective on {date}")]
    ScheduleNotFound {
        /// The date for which a schedule was requested.
        date: NaiveDate,
    },

    /// A monetary input was missing or not positive.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
