//! Leave Index: per-person union of requested, extra, and annual leave days
//! into a single unavailable-days set, checked by the Constraint Builder.

use std::collections::{BTreeSet, HashMap};

use shared::{Person, ScheduleError, ScheduleResult};

#[derive(Debug, Clone, Default)]
pub struct LeaveIndex {
    unavailable: HashMap<i32, BTreeSet<u32>>,
}

impl LeaveIndex {
    pub fn build(personnel: &[Person], days_in_month: u32) -> ScheduleResult<Self> {
        let mut unavailable = HashMap::new();
        for person in personnel {
            let mut days = BTreeSet::new();
            let kinds: [(&str, &[u32]); 3] = [
                ("requested", &person.requested_leaves),
                ("extra", &person.extra_leaves),
                ("annual", &person.annual_leaves),
            ];
            for (kind, kind_days) in kinds {
                for &day in kind_days {
                    if day < 1 || day > days_in_month {
                        return Err(ScheduleError::invalid_input(format!(
                            "person {} has a {kind} leave day {day} outside the month",
                            person.id
                        )));
                    }
                    if !days.insert(day) {
                        return Err(ScheduleError::invalid_input(format!(
                            "person {} has day {day} tagged by more than one leave kind",
                            person.id
                        )));
                    }
                }
            }
            unavailable.insert(person.id, days);
        }
        Ok(Self { unavailable })
    }

    pub fn is_unavailable(&self, person_id: i32, day: u32) -> bool {
        self.unavailable
            .get(&person_id)
            .is_some_and(|days| days.contains(&day))
    }

    pub fn days_for(&self, person_id: i32) -> impl Iterator<Item = u32> + '_ {
        self.unavailable.get(&person_id).into_iter().flatten().copied()
    }
}
