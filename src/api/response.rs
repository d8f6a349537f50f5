//! Response types for the offset engine API.
//!
//! This module defines the success payloads that are not shared domain
//! models, the error response structures, and error handling for the
//! HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PayTable, YosBucket};
use crate::error::EngineError;
use crate::models::{AuditTrace, PayGrade, PayResolution, TableReference};

/// Response body for the `/resolve-pay` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvePayResponse {
    /// The grade that was resolved.
    pub grade: PayGrade,
    /// The date YOS was measured at, or `None` when the request's `as_of`
    /// could not be parsed.
    pub as_of: Option<NaiveDate>,
    /// Creditable years of service used, if known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub years_of_service: Option<Decimal>,
    /// The table lookup, or `None` when YOS is unknown.
    pub resolution: Option<PayResolution>,
    /// The table version used for the lookup.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub table: Option<TableReference>,
    /// Prompt describing missing input when `resolution` is `None`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notice: Option<String>,
    /// Audit trace of the derivation and lookup.
    pub audit_trace: AuditTrace,
}

/// Response body for the `/table` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    /// Table code.
    pub code: String,
    /// Table name.
    pub name: String,
    /// What the amounts represent.
    pub description: String,
    /// URL to the published table.
    pub source_url: String,
    /// YOS buckets in ascending order.
    pub buckets: Vec<YosBucket>,
    /// Effective dates of the loaded rate schedules, oldest first.
    pub effective_dates: Vec<NaiveDate>,
    /// Grades the table covers.
    pub grades: Vec<PayGrade>,
}

impl From<&PayTable> for TableSummary {
    fn from(table: &PayTable) -> Self {
        let metadata = table.metadata();
        Self {
            code: metadata.code.clone(),
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            source_url: metadata.source_url.clone(),
            buckets: table.buckets().to_vec(),
            effective_dates: table.schedules().iter().map(|s| s.effective_date).collect(),
            grades: PayGrade::ALL.to_vec(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an unknown grade error response.
    pub fn unknown_grade(grade: &str) -> Self {
        Self::with_details(
            "UNKNOWN_GRADE",
            format!("Unknown pay grade: {}", grade),
            "Expected one of E-1..E-9, W-1..W-5, O-1..O-7, O-1E, O-2E, O-3E",
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPayTable { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid pay table", message),
            },
            EngineError::UnknownGrade { grade } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::unknown_grade(&grade),
            },
            EngineError::ScheduleNotFound { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "SCHEDULE_NOT_FOUND",
                    format!("No rate schedule effective on {}", date),
                    "The as_of date precedes every loaded pay table",
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableLoader;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_unknown_grade_error() {
        let error = ApiError::unknown_grade("E-10");
        assert_eq!(error.code, "UNKNOWN_GRADE");
        assert!(error.message.contains("E-10"));
    }

    #[test]
    fn test_engine_error_to_api_error() {
        let engine_error = EngineError::UnknownGrade {
            grade: "X-1".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "UNKNOWN_GRADE");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidPayTable {
            message: "empty".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_table_summary_from_loaded_table() {
        let table = TableLoader::load("./config/rc_drill_pay").unwrap().into_table();
        let summary = TableSummary::from(&table);

        assert_eq!(summary.code, "dfas_rc_drill");
        assert_eq!(summary.buckets.len(), 15);
        assert_eq!(summary.grades.len(), 24);
        assert_eq!(
            summary.effective_dates,
            vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()]
        );
    }
}
