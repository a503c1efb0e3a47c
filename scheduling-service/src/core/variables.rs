//! Variable Factory: allocates the boolean decision variables `x[p,d,s]`
//! and the derived worked-day indicators `w[p,d]` inside a `selen::Model`.

use std::collections::HashMap;

use selen::prelude::{Model, VarId};
use shared::{Person, ShiftType};

use super::calendar::Calendar;

/// The decision variables for one scheduling problem, keyed by person id,
/// day-of-month, and (for `x`) shift type.
pub struct Variables {
    x: HashMap<(i32, u32, ShiftType), VarId>,
    w: HashMap<(i32, u32), VarId>,
}

impl Variables {
    pub fn build(model: &mut Model, personnel: &[Person], calendar: &Calendar) -> Self {
        let mut x = HashMap::new();
        let mut w = HashMap::new();

        for person in personnel {
            for day in calendar.days() {
                for shift in ShiftType::ALL {
                    x.insert((person.id, day, shift), model.bool());
                }
                w.insert((person.id, day), model.bool());
            }
        }

        Self { x, w }
    }

    pub fn x(&self, person_id: i32, day: u32, shift: ShiftType) -> VarId {
        self.x[&(person_id, day, shift)]
    }

    pub fn w(&self, person_id: i32, day: u32) -> VarId {
        self.w[&(person_id, day)]
    }
}
