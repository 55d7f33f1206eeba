use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use complexity_common::{AnalysisRequest, AnalysisResult};
use tracing::{error, instrument, warn};

use crate::{server::AppState, types::ErrorResponse};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Analyze code complexity
///
/// Sends the code to the model service for a Big-O classification, runs the
/// benchmark program it generates, and returns both. The call blocks until
/// the benchmark finishes or hits its deadline.
///
/// A benchmark that fails to build, crashes, times out, or prints nothing
/// parseable still yields `200` with an empty `performanceData`.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalysisResult),
        (status = 400, description = "Malformed body or empty code", body = ErrorResponse),
        (status = 500, description = "Missing credential or model service failure", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[instrument(skip(state, payload))]
pub async fn analyze_code(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected request body");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid request body", "INVALID_BODY")),
        )
    })?;

    match state.analyzer.analyze(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(e) if e.is_client_error() => Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&e)))),
        Err(e) => {
            error!(error = %e, code = e.code(), "Analysis failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::from(&e))))
        }
    }
}
