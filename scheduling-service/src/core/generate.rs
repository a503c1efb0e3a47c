//! Top-level orchestration: validates the request, builds the calendar and
//! leave index, runs a pre-solve capacity check, builds the constraint
//! model, solves it, and encodes + independently re-validates the result.

use std::collections::HashSet;

use shared::{GenerateScheduleRequest, GenerateScheduleResponse, Role, ScheduleError, ScheduleResult, ShiftType};
use tracing::{error, info, instrument};

use super::calendar::Calendar;
use super::constraints;
use super::driver::{self, DriverConfig};
use super::encoder;
use super::leave_index::LeaveIndex;
use super::objective;
use super::validator;
use super::variables::Variables;

#[instrument(skip_all, fields(month = %request.config.month, personnel = request.personnel.len()))]
pub fn generate_schedule(
    request: GenerateScheduleRequest,
    driver_config: DriverConfig,
) -> ScheduleResult<GenerateScheduleResponse> {
    validate_request(&request)?;

    let calendar = Calendar::build(&request.config)?;
    let leaves = LeaveIndex::build(&request.personnel, calendar.days_in_month())?;

    check_capacity(&request, &calendar, &leaves)?;

    let mut model = driver::new_model(driver_config);
    let vars = Variables::build(&mut model, &request.personnel, &calendar);
    constraints::post_all(
        &mut model,
        &vars,
        &request.personnel,
        &calendar,
        &leaves,
        request.config.max_night_shifts,
    );
    let objective = objective::build(&mut model, &vars, &request.personnel, &calendar);

    let solution = driver::solve(model, objective, driver_config)?;
    let schedule = encoder::encode(&solution, &vars, &request.personnel, &calendar);

    if let Err(err) = validator::validate(
        &schedule,
        &request.personnel,
        &calendar,
        &leaves,
        request.config.max_night_shifts,
    ) {
        error!(error = %err, "post-solve validation rejected the solver's own solution");
        return Err(err);
    }

    info!("schedule generated");
    Ok(GenerateScheduleResponse { schedule })
}

fn validate_request(request: &GenerateScheduleRequest) -> ScheduleResult<()> {
    if request.personnel.is_empty() {
        return Err(ScheduleError::invalid_input("personnel list must not be empty"));
    }

    let mut seen_ids = HashSet::new();
    for person in &request.personnel {
        if person.id <= 0 {
            return Err(ScheduleError::invalid_input(format!(
                "person id {} must be positive",
                person.id
            )));
        }
        if !seen_ids.insert(person.id) {
            return Err(ScheduleError::invalid_input(format!(
                "person id {} appears more than once",
                person.id
            )));
        }
    }

    Ok(())
}

/// A necessary (not sufficient) precondition for feasibility: on every
/// day, at least as many role-eligible, non-leave people exist for a
/// shift as the coverage table requires. Anything this check passes can
/// still turn out `INFEASIBLE` once the rest of the ruleset is taken
/// into account; anything it fails is certain to be infeasible.
fn check_capacity(request: &GenerateScheduleRequest, calendar: &Calendar, leaves: &LeaveIndex) -> ScheduleResult<()> {
    for day in calendar.days() {
        for shift in ShiftType::ALL {
            let required = calendar.required(day, shift);
            let available = request
                .personnel
                .iter()
                .filter(|p| !leaves.is_unavailable(p.id, day))
                .filter(|p| is_eligible(p.role, shift, calendar, day))
                .count() as u32;
            if available < required {
                return Err(ScheduleError::insufficient_capacity(format!(
                    "day {day} needs {required} people for shift {shift}, only {available} are eligible and available"
                )));
            }
        }
    }
    Ok(())
}

fn is_eligible(role: Role, shift: ShiftType, calendar: &Calendar, day: u32) -> bool {
    match role {
        Role::Shift => true,
        Role::NonShift => shift == ShiftType::P && calendar.is_plain_weekday(day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Person, ScheduleConfig};
    use std::collections::BTreeMap;

    fn base_request() -> GenerateScheduleRequest {
        GenerateScheduleRequest {
            personnel: vec![],
            config: ScheduleConfig {
                month: "2024-06".to_string(),
                public_holidays: vec![],
                special_dates: BTreeMap::new(),
                max_night_shifts: 9,
                max_default_leaves: None,
            },
        }
    }

    #[test]
    fn rejects_empty_personnel() {
        let request = base_request();
        assert!(matches!(
            validate_request(&request),
            Err(ScheduleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_person_ids() {
        let mut request = base_request();
        request.personnel = vec![
            Person {
                id: 1,
                name: "A".to_string(),
                role: Role::Shift,
                requested_leaves: vec![],
                extra_leaves: vec![],
                annual_leaves: vec![],
            },
            Person {
                id: 1,
                name: "B".to_string(),
                role: Role::Shift,
                requested_leaves: vec![],
                extra_leaves: vec![],
                annual_leaves: vec![],
            },
        ];
        assert!(matches!(
            validate_request(&request),
            Err(ScheduleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_person_id() {
        let mut request = base_request();
        request.personnel = vec![Person {
            id: 0,
            name: "A".to_string(),
            role: Role::Shift,
            requested_leaves: vec![],
            extra_leaves: vec![],
            annual_leaves: vec![],
        }];
        assert!(matches!(
            validate_request(&request),
            Err(ScheduleError::InvalidInput { .. })
        ));
    }

    #[test]
    fn capacity_check_flags_too_few_eligible_people() {
        let mut request = base_request();
        // Only one non-shift person, every weekday needs a P but they
        // can cover at most one day before being counted again elsewhere;
        // with only one person the S/M requirement on any day is unmet.
        request.personnel = vec![Person {
            id: 1,
            name: "A".to_string(),
            role: Role::NonShift,
            requested_leaves: vec![],
            extra_leaves: vec![],
            annual_leaves: vec![],
        }];
        let calendar = Calendar::build(&request.config).unwrap();
        let leaves = LeaveIndex::build(&request.personnel, calendar.days_in_month()).unwrap();
        assert!(check_capacity(&request, &calendar, &leaves).is_err());
    }
}
