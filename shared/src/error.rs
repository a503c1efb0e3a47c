//! The scheduling service's error taxonomy, realized as a concrete enum.
//!
//! Every public entry point into the core returns `ScheduleResult<T>`.
//! None of these errors are retried internally; they surface to the
//! caller as-is (see `ErrorResponse`).

use serde::Serialize;
use thiserror::Error;

/// All failure modes `generate_schedule` can return.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// Malformed month, day out of range, duplicate ids, negative
    /// head-counts, a special date outside the month, or a person with
    /// the same day in more than one leave set.
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
        details: Option<String>,
    },

    /// Total required person-shifts exceed what is achievable given
    /// leaves, role restrictions, and night caps. Detected either by a
    /// pre-solve capacity check or by an `INFEASIBLE` solver outcome.
    #[error("insufficient capacity: {message}")]
    InsufficientCapacity { message: String },

    /// The solver proved no assignment exists under the full rule set.
    #[error("infeasible: {message}")]
    Infeasible { message: String },

    /// The solver exhausted its wall-clock budget before finding any
    /// feasible assignment.
    #[error("timeout after {elapsed_seconds:.1}s: {message}")]
    Timeout { message: String, elapsed_seconds: f64 },

    /// The post-solve validator found a rule violation in a solution the
    /// solver reported as feasible. This is a modeling bug, never a
    /// normal outcome.
    #[error("internal validation failed: {message}")]
    InternalValidationFailed {
        message: String,
        details: Option<String>,
    },
}

impl ScheduleError {
    /// The taxonomy name used as the `error_kind` field on the wire and
    /// for routing to an HTTP status.
    pub fn kind(&self) -> &'static str {
        match self {
            ScheduleError::InvalidInput { .. } => "INVALID_INPUT",
            ScheduleError::InsufficientCapacity { .. } => "INSUFFICIENT_CAPACITY",
            ScheduleError::Infeasible { .. } => "INFEASIBLE",
            ScheduleError::Timeout { .. } => "TIMEOUT",
            ScheduleError::InternalValidationFailed { .. } => "INTERNAL_VALIDATION_FAILED",
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ScheduleError::InvalidInput {
            message: message.into(),
            details: None,
        }
    }

    pub fn invalid_input_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        ScheduleError::InvalidInput {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn insufficient_capacity(message: impl Into<String>) -> Self {
        ScheduleError::InsufficientCapacity {
            message: message.into(),
        }
    }

    pub fn infeasible(message: impl Into<String>) -> Self {
        ScheduleError::Infeasible {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>, elapsed_seconds: f64) -> Self {
        ScheduleError::Timeout {
            message: message.into(),
            elapsed_seconds,
        }
    }

    pub fn internal_validation_failed(message: impl Into<String>) -> Self {
        ScheduleError::InternalValidationFailed {
            message: message.into(),
            details: None,
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// The wire shape of a failure response: `{ error_kind, message, details? }`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error_kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ScheduleError> for ErrorResponse {
    fn from(err: &ScheduleError) -> Self {
        let details = match err {
            ScheduleError::InvalidInput { details, .. }
            | ScheduleError::InternalValidationFailed { details, .. } => details.clone(),
            _ => None,
        };
        ErrorResponse {
            error_kind: err.kind(),
            message: err.to_string(),
            details,
        }
    }
}
