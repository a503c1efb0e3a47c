//! Driver: hands the built model to the solver under a wall-clock budget
//! and translates its outcome into either a `Solution` or a `ScheduleError`.

use selen::prelude::*;
use shared::ScheduleError;
use tracing::warn;

/// How long the solver is allowed to run before giving up.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub timeout_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { timeout_ms: 60_000 }
    }
}

/// Builds a fresh, empty model already configured with the driver's
/// wall-clock budget. Must be the model every variable and constraint in
/// this request is built into, since `selen` only accepts the timeout at
/// construction time.
pub fn new_model(config: DriverConfig) -> Model {
    Model::with_config(SolverConfig::default().with_timeout_ms(config.timeout_ms))
}

/// Runs the solver to completion (or to its timeout), mapping every
/// `selen::SolverError` into the scheduling error taxonomy.
///
/// `objective` is `None` when there is no `Shift`-role person to balance
/// load over, in which case this falls back to plain feasibility search.
pub fn solve(model: Model, objective: Option<VarId>, config: DriverConfig) -> Result<Solution, ScheduleError> {
    let result = match objective {
        Some(obj) => model.minimize(obj),
        None => model.solve(),
    };

    result.map_err(|err| match err {
        SolverError::NoSolution { .. } | SolverError::ConflictingConstraints { .. } => {
            ScheduleError::infeasible("no assignment satisfies every hard constraint")
        }
        SolverError::Timeout { elapsed_seconds, .. } => ScheduleError::timeout(
            "solver exhausted its time budget before finding a feasible assignment",
            elapsed_seconds.unwrap_or(config.timeout_ms as f64 / 1000.0),
        ),
        other => {
            warn!(error = %other, "selen reported a modeling error, not a scheduling outcome");
            ScheduleError::internal_validation_failed(format!("constraint model rejected by solver: {other}"))
        }
    })
}
