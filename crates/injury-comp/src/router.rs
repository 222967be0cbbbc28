use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::compensation::{compute, CaseInput, CaseSubmission, ComputationStandards};
use crate::error::AppError;
use crate::report::{self, CalculationView, ReportFormat, ReportMetadata};

/// Compute, report and standards endpoints sharing one read-only rate table.
pub fn compensation_router(standards: Arc<ComputationStandards>) -> Router {
    Router::new()
        .route("/api/v1/compensation/calculate", post(calculate_handler))
        .route("/api/v1/compensation/report", post(report_handler))
        .route("/api/v1/standards", get(standards_handler))
        .with_state(standards)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportRequest {
    pub case: CaseSubmission,
    pub reference_date: Option<String>,
    pub format: Option<String>,
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) async fn calculate_handler(
    State(standards): State<Arc<ComputationStandards>>,
    payload: Result<Json<CaseSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let input = CaseInput::from_submission(&submission, &standards);
    let result = compute(&input, &standards);
    info!(
        victim_age = result.victim_age,
        total = %result.total,
        positive_items = result.positive_items().count(),
        "compensation calculated"
    );

    (StatusCode::OK, Json(CalculationView::from_result(&result))).into_response()
}

pub(crate) async fn report_handler(
    State(standards): State<Arc<ComputationStandards>>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let reference_date = match request.reference_date.as_deref().map(str::trim) {
        None | Some("") => Local::now().date_naive(),
        Some(raw) => match parse_date(raw) {
            Ok(date) => date,
            Err(message) => return bad_request(message),
        },
    };
    let format = match request.format.as_deref() {
        None => ReportFormat::default(),
        Some(raw) => match ReportFormat::parse(raw) {
            Some(format) => format,
            None => return bad_request(format!("unsupported report format '{raw}'")),
        },
    };

    let input = CaseInput::from_submission(&request.case, &standards);
    let result = compute(&input, &standards);
    let metadata = ReportMetadata { reference_date };
    let rendered = match report::render(&result, &standards, &metadata, format) {
        Ok(rendered) => rendered,
        Err(err) => {
            warn!(error = %err, ?format, "report rendering failed");
            return AppError::from(err).into_response();
        }
    };
    info!(?format, %reference_date, total = %result.total, "compensation report rendered");

    let content_type = HeaderValue::from_str(rendered.content_type().as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&content_disposition(&rendered.filename, format))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.body,
    )
        .into_response()
}

pub(crate) async fn standards_handler(
    State(standards): State<Arc<ComputationStandards>>,
) -> Response {
    Json(standards.as_ref()).into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    let message = message.into();
    warn!(%message, "rejected compensation request");
    let payload = json!({
        "success": false,
        "error": message,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

/// Attachment header with an ASCII fallback name and the UTF-8 name in `filename*`.
fn content_disposition(filename: &str, format: ReportFormat) -> String {
    format!(
        "attachment; filename=\"report.{}\"; filename*=UTF-8''{}",
        format.extension(),
        urlencoding::encode(filename)
    )
}
