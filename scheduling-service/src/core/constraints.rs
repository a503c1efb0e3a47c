//! Constraint Builder: posts every scheduling rule onto the `selen::Model`
//! as linear (in)equalities over the `x`/`w` variables.

use selen::prelude::*;
use shared::{Person, Role, ShiftType};

use super::calendar::Calendar;
use super::leave_index::LeaveIndex;
use super::variables::Variables;

/// Consecutive-work window length and its cap.
const WORK_WINDOW: u32 = 6;
const WORK_CAP_PER_WINDOW: i32 = 5;

/// Consecutive-night window length and its cap.
const NIGHT_WINDOW: u32 = 3;
const NIGHT_CAP_PER_WINDOW: i32 = 2;

pub fn post_all(
    model: &mut Model,
    vars: &Variables,
    personnel: &[Person],
    calendar: &Calendar,
    leaves: &LeaveIndex,
    max_night_shifts: u32,
) {
    post_coverage(model, vars, personnel, calendar);
    post_worked_day_channel_and_single_shift(model, vars, personnel, calendar);
    post_leave_exclusion(model, vars, personnel, calendar, leaves);
    post_role_eligibility(model, vars, personnel, calendar);
    post_valid_transitions(model, vars, personnel, calendar);
    post_consecutive_work_cap(model, vars, personnel, calendar);
    post_consecutive_night_cap(model, vars, personnel, calendar);
    post_mandatory_post_night_leave(model, vars, personnel, calendar);
    post_monthly_night_cap(model, vars, personnel, calendar, max_night_shifts);
}

/// (a) Exact coverage: for every day and shift, the assigned head-count
/// equals the required head-count.
fn post_coverage(model: &mut Model, vars: &Variables, personnel: &[Person], calendar: &Calendar) {
    for day in calendar.days() {
        for shift in ShiftType::ALL {
            let assigned: Vec<VarId> = personnel.iter().map(|p| vars.x(p.id, day, shift)).collect();
            let coeffs = vec![1; assigned.len()];
            model.bool_lin_eq(&coeffs, &assigned, calendar.required(day, shift) as i32);
        }
    }
}

/// (b) At most one shift per person per day, channelled through `w[p,d]`.
fn post_worked_day_channel_and_single_shift(
    model: &mut Model,
    vars: &Variables,
    personnel: &[Person],
    calendar: &Calendar,
) {
    for person in personnel {
        for day in calendar.days() {
            let w = vars.w(person.id, day);
            let xs: Vec<VarId> = ShiftType::ALL.iter().map(|&s| vars.x(person.id, day, s)).collect();
            let mut coeffs = vec![1];
            coeffs.extend(std::iter::repeat(-1).take(xs.len()));
            let mut all_vars = vec![w];
            all_vars.extend(xs);
            model.bool_lin_eq(&coeffs, &all_vars, 0);
        }
    }
}

/// (c) A person on leave works no shift that day.
fn post_leave_exclusion(
    model: &mut Model,
    vars: &Variables,
    personnel: &[Person],
    calendar: &Calendar,
    leaves: &LeaveIndex,
) {
    for person in personnel {
        for day in leaves.days_for(person.id) {
            if calendar.days().contains(&day) {
                model.new(vars.w(person.id, day).eq(0));
            }
        }
    }
}

/// (d) Non-shift staff are only eligible for `P` on plain weekdays.
fn post_role_eligibility(model: &mut Model, vars: &Variables, personnel: &[Person], calendar: &Calendar) {
    for person in personnel {
        if person.role != Role::NonShift {
            continue;
        }
        for day in calendar.days() {
            model.new(vars.x(person.id, day, ShiftType::S).eq(0));
            model.new(vars.x(person.id, day, ShiftType::M).eq(0));
            if !calendar.is_plain_weekday(day) {
                model.new(vars.x(person.id, day, ShiftType::P).eq(0));
            }
        }
    }
}

/// (e) Forbidden back-to-back transitions: night->morning, night->evening,
/// evening->morning.
fn post_valid_transitions(model: &mut Model, vars: &Variables, personnel: &[Person], calendar: &Calendar) {
    let last_day = calendar.days_in_month();
    for person in personnel {
        for day in 1..last_day {
            let next = day + 1;
            let forbidden_pairs = [
                (vars.x(person.id, day, ShiftType::M), vars.x(person.id, next, ShiftType::P)),
                (vars.x(person.id, day, ShiftType::M), vars.x(person.id, next, ShiftType::S)),
                (vars.x(person.id, day, ShiftType::S), vars.x(person.id, next, ShiftType::P)),
            ];
            for (first, second) in forbidden_pairs {
                model.bool_lin_le(&[1, 1], &[first, second], 1);
            }
        }
    }
}

/// (f) No more than 5 worked days in any rolling 6-day window.
fn post_consecutive_work_cap(model: &mut Model, vars: &Variables, personnel: &[Person], calendar: &Calendar) {
    let last_day = calendar.days_in_month();
    if last_day < WORK_WINDOW {
        return;
    }
    for person in personnel {
        for start in 1..=(last_day - WORK_WINDOW + 1) {
            let window: Vec<VarId> = (start..start + WORK_WINDOW).map(|d| vars.w(person.id, d)).collect();
            let coeffs = vec![1; window.len()];
            model.bool_lin_le(&coeffs, &window, WORK_CAP_PER_WINDOW);
        }
    }
}

/// (g) No more than 2 night shifts in any rolling 3-day window.
fn post_consecutive_night_cap(model: &mut Model, vars: &Variables, personnel: &[Person], calendar: &Calendar) {
    let last_day = calendar.days_in_month();
    if last_day < NIGHT_WINDOW {
        return;
    }
    for person in personnel {
        for start in 1..=(last_day - NIGHT_WINDOW + 1) {
            let window: Vec<VarId> = (start..start + NIGHT_WINDOW)
                .map(|d| vars.x(person.id, d, ShiftType::M))
                .collect();
            let coeffs = vec![1; window.len()];
            model.bool_lin_le(&coeffs, &window, NIGHT_CAP_PER_WINDOW);
        }
    }
}

/// (h) A single night shift forces the next day off; two consecutive night
/// shifts force the two days after off. Both are hard constraints, and
/// both stop at the month boundary: there is no obligation carried past
/// the last day.
fn post_mandatory_post_night_leave(
    model: &mut Model,
    vars: &Variables,
    personnel: &[Person],
    calendar: &Calendar,
) {
    let last_day = calendar.days_in_month();
    for person in personnel {
        for day in 1..last_day {
            let next = day + 1;
            let night_today = vars.x(person.id, day, ShiftType::M);
            let night_next = vars.x(person.id, next, ShiftType::M);

            // Single night on `day`, not extended into a double on `next`:
            // `next` must be off.
            model.bool_lin_le(
                &[1, -1, 1],
                &[night_today, night_next, vars.w(person.id, next)],
                1,
            );

            // Double night ending on `next` forces the two following days off.
            for offset in [2u32, 3u32] {
                let rest_day = next + offset - 1;
                if rest_day > last_day {
                    continue;
                }
                model.bool_lin_le(
                    &[1, 1, 1],
                    &[night_today, night_next, vars.w(person.id, rest_day)],
                    2,
                );
            }
        }
    }
}

/// (i) Monthly cap on total night shifts per person.
fn post_monthly_night_cap(
    model: &mut Model,
    vars: &Variables,
    personnel: &[Person],
    calendar: &Calendar,
    max_night_shifts: u32,
) {
    for person in personnel {
        let nights: Vec<VarId> = calendar.days().map(|d| vars.x(person.id, d, ShiftType::M)).collect();
        let coeffs = vec![1; nights.len()];
        model.bool_lin_le(&coeffs, &nights, max_night_shifts as i32);
    }
}
