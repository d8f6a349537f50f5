//! HTTP request handlers for the offset engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DrillPayLookupResult, derive_years_of_service, estimate_offset_with_audit, lookup_drill_pay,
};
use crate::coerce::{coerce_count, coerce_date_field, coerce_decimal, coerce_decimal_field};
use crate::config::PayTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EstimateReport, FieldInput, MilitaryPayBasis,
    OffsetInputs, PayGrade, TableReference,
};

use super::request::{EstimateRequest, ResolvePayRequest};
use super::response::{ApiError, ApiErrorResponse, ResolvePayResponse, TableSummary};
use super::state::AppState;

const YOS_UNKNOWN_NOTICE: &str = "Enter PEBD or a YOS override to calculate drill pay.";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(estimate_handler))
        .route("/resolve-pay", post(resolve_pay_handler))
        .route("/table", get(table_handler))
        .route("/table/reload", post(reload_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: EngineError) -> Response {
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    // Handle JSON parsing errors
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // A missing required field is a validation failure, not bad JSON
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /estimate.
///
/// Accepts an estimate request and returns the [`EstimateReport`].
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    // Snapshot the table for this request
    let table = state.table();
    let today = Utc::now().date_naive();

    match perform_estimate(request, &table, today) {
        Ok(report) => {
            // Incomplete input still returns 200
            if let Some(notice) = &report.notice {
                warn!(
                    correlation_id = %correlation_id,
                    notice = %notice,
                    "Estimate inputs incomplete"
                );
            }
            for warning in &report.audit_trace.warnings {
                warn!(
                    correlation_id = %correlation_id,
                    code = %warning.code,
                    "{}",
                    warning.message
                );
            }
            info!(
                correlation_id = %correlation_id,
                has_result = report.result.is_some(),
                duration_us = report.audit_trace.duration_us,
                "Estimate completed"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Estimate failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /resolve-pay.
async fn resolve_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolvePayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pay resolution request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let table = state.table();
    let today = Utc::now().date_naive();

    match perform_resolve(&request, &table, today) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                grade = %response.grade,
                fallback = response.resolution.as_ref().is_some_and(|r| r.is_fallback()),
                duration_us = response.audit_trace.duration_us,
                "Pay resolution completed"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Pay resolution failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /table.
async fn table_handler(State(state): State<AppState>) -> Response {
    let table = state.table();
    json_response(StatusCode::OK, TableSummary::from(table.as_ref()))
}

/// Handler for POST /table/reload.
///
/// On failure the previous table stays in service.
async fn reload_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.reload() {
        Ok(table) => {
            info!(
                correlation_id = %correlation_id,
                table = %table.metadata().code,
                schedules = table.schedules().len(),
                "Pay table reloaded"
            );
            json_response(StatusCode::OK, TableSummary::from(table.as_ref()))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Pay table reload failed"
            );
            error_response(err)
        }
    }
}

/// YOS and drill pay found for a table pay basis.
struct TablePayOutcome {
    years: Option<Decimal>,
    lookup: Option<DrillPayLookupResult>,
}

/// Derives YOS and, when it is known, looks up drill pay.
///
/// `as_of` is `None` when the caller's date could not be parsed; YOS is then
/// unknown.
fn resolve_table_pay(
    table: &PayTable,
    grade: PayGrade,
    years_override: FieldInput<Decimal>,
    pebd: FieldInput<NaiveDate>,
    as_of: Option<NaiveDate>,
    steps: &mut Vec<AuditStep>,
    warnings: &mut Vec<AuditWarning>,
) -> EngineResult<TablePayOutcome> {
    let derivation = derive_years_of_service(years_override, pebd, as_of, next_step(steps));
    steps.push(derivation.audit_step);

    let (Some(years), Some(as_of)) = (derivation.years, as_of) else {
        return Ok(TablePayOutcome { years: None, lookup: None });
    };

    let lookup = lookup_drill_pay(table, grade, years, as_of, next_step(steps))?;
    steps.push(lookup.audit_step.clone());
    if let Some(message) = &lookup.resolution.warning {
        warnings.push(AuditWarning {
            code: "YOS_BEYOND_TABLE".to_string(),
            message: message.clone(),
            severity: "medium".to_string(),
        });
    }

    Ok(TablePayOutcome {
        years: Some(years),
        lookup: Some(lookup),
    })
}

fn next_step(steps: &[AuditStep]) -> u32 {
    steps.len() as u32 + 1
}

fn table_reference(table: &PayTable, lookup: &DrillPayLookupResult) -> TableReference {
    TableReference {
        code: table.metadata().code.clone(),
        effective_date: lookup.effective_date,
    }
}

/// Prompt shown when the estimator rejects its inputs.
fn notice_for(error: &EngineError) -> String {
    match error {
        EngineError::InvalidInput { field, .. } if field == "va_monthly" => {
            "Enter your monthly VA compensation to estimate the offset.".to_string()
        }
        EngineError::InvalidInput { field, .. } if field == "military_pay" => {
            "Enter military pay per drill period or active duty day to estimate the offset."
                .to_string()
        }
        other => other.to_string(),
    }
}

/// Runs YOS derivation, the optional table lookup and the offset estimate.
///
/// `today` stands in for an omitted `as_of`. Incomplete input, including an
/// unparseable `as_of` or YOS override on the table path, produces a report
/// with `result: None` and a notice. Unknown grades and dates before every
/// rate schedule are errors.
pub fn perform_estimate(
    request: EstimateRequest,
    table: &PayTable,
    today: NaiveDate,
) -> EngineResult<EstimateReport> {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    // Coerce form fields
    let as_of = request.reference_date(today);
    let basis = MilitaryPayBasis::try_from(request.military_pay)?;
    let va_monthly = coerce_decimal(request.va_monthly.as_ref());
    let uta_count = coerce_count(request.uta_count.as_ref());
    let active_duty_days = coerce_count(request.active_duty_days.as_ref());

    let mut years_of_service = None;
    let mut pay_resolution = None;
    let mut table_ref = None;
    let mut notice = None;

    // Resolve pay from the table when requested
    let military_pay = match basis {
        MilitaryPayBasis::Direct(amount) => amount,
        MilitaryPayBasis::Table {
            grade,
            years_override,
            pebd,
        } => {
            let outcome = resolve_table_pay(
                table,
                grade,
                years_override,
                pebd,
                as_of,
                &mut steps,
                &mut warnings,
            )?;
            years_of_service = outcome.years.map(|y| y.round_dp(4));
            match outcome.lookup {
                Some(lookup) => {
                    table_ref = Some(table_reference(table, &lookup));
                    let pay = lookup.resolution.per_period_pay;
                    pay_resolution = Some(lookup.resolution);
                    Some(pay)
                }
                None => {
                    notice = Some(YOS_UNKNOWN_NOTICE.to_string());
                    None
                }
            }
        }
    };

    // Estimate only once the pay figure is known
    let mut result = None;
    if notice.is_none() {
        let inputs = OffsetInputs {
            va_monthly: va_monthly.unwrap_or(Decimal::ZERO),
            military_pay: military_pay.unwrap_or(Decimal::ZERO),
            uta_count,
            active_duty_days,
        };
        match estimate_offset_with_audit(&inputs, next_step(&steps)) {
            Ok(estimate) => {
                steps.push(estimate.audit_step);
                result = Some(estimate.result);
            }
            // Non-positive amounts become a prompt rather than an error
            Err(err @ EngineError::InvalidInput { .. }) => notice = Some(notice_for(&err)),
            Err(err) => return Err(err),
        }
    }

    Ok(EstimateReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        as_of,
        years_of_service,
        pay_resolution,
        table: table_ref,
        result,
        notice,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Derives YOS and resolves drill pay for a `/resolve-pay` request.
fn perform_resolve(
    request: &ResolvePayRequest,
    table: &PayTable,
    today: NaiveDate,
) -> EngineResult<ResolvePayResponse> {
    let start_time = Instant::now();
    let grade: PayGrade = request.grade.parse()?;
    let as_of = request.reference_date(today);
    let years_override = coerce_decimal_field(request.yos_override.as_ref());
    let pebd = coerce_date_field(request.pebd.as_ref());

    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let outcome = resolve_table_pay(
        table,
        grade,
        years_override,
        pebd,
        as_of,
        &mut steps,
        &mut warnings,
    )?;

    let notice = outcome
        .lookup
        .is_none()
        .then(|| YOS_UNKNOWN_NOTICE.to_string());
    let table_ref = outcome
        .lookup
        .as_ref()
        .map(|lookup| table_reference(table, lookup));

    Ok(ResolvePayResponse {
        grade,
        as_of,
        years_of_service: outcome.years.map(|y| y.round_dp(4)),
        resolution: outcome.lookup.map(|lookup| lookup.resolution),
        table: table_ref,
        notice,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
