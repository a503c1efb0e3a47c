//! Objective: minimize the spread between the most- and least-loaded
//! shift-eligible staff member's total assigned shifts for the month.

use selen::prelude::*;
use shared::{Person, Role};

use super::calendar::Calendar;
use super::variables::Variables;

/// Posts the load-balancing objective and returns the view to minimize.
///
/// Returns `None` when no `Shift`-role person exists, since there is then
/// nothing to balance; the driver should fall back to a plain `solve()`.
pub fn build(model: &mut Model, vars: &Variables, personnel: &[Person], calendar: &Calendar) -> Option<VarId> {
    let shift_people: Vec<&Person> = personnel.iter().filter(|p| p.role == Role::Shift).collect();
    if shift_people.is_empty() {
        return None;
    }

    let max_possible_load = calendar.days_in_month() as i32 * 3;
    let loads: Vec<VarId> = shift_people
        .iter()
        .map(|person| {
            let shifts: Vec<VarId> = calendar
                .days()
                .flat_map(|d| shared::ShiftType::ALL.iter().map(move |&s| (d, s)))
                .map(|(d, s)| vars.x(person.id, d, s))
                .collect();
            model.sum(&shifts)
        })
        .collect();

    let load_min = model.int(0, max_possible_load);
    let load_max = model.int(0, max_possible_load);
    for &load in &loads {
        model.new(load_min.le(load));
        model.new(load.le(load_max));
    }

    Some(model.sub(load_max, load_min))
}
