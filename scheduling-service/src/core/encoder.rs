//! Schedule Encoder: reads the solved `x[p,d,s]` values out of a `Solution`
//! and arranges them into the wire-shaped `Schedule`.

use selen::prelude::*;
use shared::{DayAssignment, Person, Schedule, ShiftType};

use super::calendar::Calendar;
use super::variables::Variables;

pub fn encode(solution: &Solution, vars: &Variables, personnel: &[Person], calendar: &Calendar) -> Schedule {
    let mut schedule = Schedule::new();

    for day in calendar.days() {
        let mut assignment = DayAssignment::default();
        for shift in ShiftType::ALL {
            let mut ids: Vec<i32> = personnel
                .iter()
                .filter(|p| is_true(solution, vars.x(p.id, day, shift)))
                .map(|p| p.id)
                .collect();
            ids.sort_unstable();
            *assignment.get_mut(shift) = ids;
        }
        schedule.insert(calendar.date_key(day), assignment);
    }

    schedule
}

fn is_true(solution: &Solution, var: VarId) -> bool {
    solution[var].as_int() == Some(1)
}
