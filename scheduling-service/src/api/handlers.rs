use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use shared::{ErrorResponse, GenerateScheduleRequest, GenerateScheduleResponse, ScheduleError};
use tracing::error;

use crate::api::state::AppState;
use crate::core::generate_schedule;

/// Generate a month's shift schedule for the given personnel.
#[utoipa::path(
    post,
    path = "/api/v1/schedule",
    request_body = GenerateScheduleRequest,
    responses(
        (status = 200, description = "Schedule generated", body = GenerateScheduleResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Insufficient capacity or infeasible ruleset", body = ErrorResponse),
        (status = 500, description = "Internal validation failure", body = ErrorResponse),
        (status = 504, description = "Solver timed out", body = ErrorResponse),
    ),
    tag = "schedule"
)]
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateScheduleRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let driver_config = state.driver_config;

    let result = tokio::task::spawn_blocking(move || generate_schedule(request, driver_config))
        .await
        .map_err(|join_err| {
            error!(error = %join_err, "generate_schedule task panicked");
            internal_error(&ScheduleError::internal_validation_failed(
                "schedule generation task did not complete",
            ))
        })?;

    result
        .map(|response| (StatusCode::OK, Json(response)))
        .map_err(|err| {
            let status = status_for(&err);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!(error = %err, "generate_schedule failed");
            }
            (status, Json(ErrorResponse::from(&err)))
        })
}

fn status_for(err: &ScheduleError) -> StatusCode {
    match err {
        ScheduleError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ScheduleError::InsufficientCapacity { .. } | ScheduleError::Infeasible { .. } => StatusCode::CONFLICT,
        ScheduleError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ScheduleError::InternalValidationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn internal_error(err: &ScheduleError) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::from(err)))
}
