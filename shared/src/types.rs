//! Wire types shared between the scheduling core and its HTTP front door.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the three shift types a day can be staffed with.
///
/// Serializes to the single-letter codes used throughout the request and
/// response payloads (`P`/`S`/`M`), matching the coverage tables and the
/// schedule encoder's output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum ShiftType {
    /// Morning shift.
    P,
    /// Evening shift.
    S,
    /// Night shift.
    M,
}

impl ShiftType {
    /// All shift types, in the order they appear in coverage tuples.
    pub const ALL: [ShiftType; 3] = [ShiftType::P, ShiftType::S, ShiftType::M];
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            ShiftType::P => "P",
            ShiftType::S => "S",
            ShiftType::M => "M",
        };
        write!(f, "{letter}")
    }
}

/// A person's eligibility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Eligible for any shift on any day, subject to leaves and the coverage rules.
    Shift,
    /// Eligible only for `P` on plain weekdays.
    NonShift,
}

/// A member of the roster for the month being scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Person {
    /// Stable identifier, positive and unique within one request.
    pub id: i32,
    pub name: String,
    pub role: Role,
    /// Day-of-month numbers this person asked to have off.
    #[serde(default)]
    pub requested_leaves: Vec<u32>,
    /// Day-of-month numbers covered by an "extra" leave kind.
    #[serde(default)]
    pub extra_leaves: Vec<u32>,
    /// Day-of-month numbers covered by annual leave.
    #[serde(default)]
    pub annual_leaves: Vec<u32>,
}

/// Required head-count per shift type, used both for weekday/weekend
/// defaults and for literal special-date overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ShiftCounts {
    #[serde(rename = "P")]
    pub p: u32,
    #[serde(rename = "S")]
    pub s: u32,
    #[serde(rename = "M")]
    pub m: u32,
}

impl ShiftCounts {
    pub fn get(&self, shift: ShiftType) -> u32 {
        match shift {
            ShiftType::P => self.p,
            ShiftType::S => self.s,
            ShiftType::M => self.m,
        }
    }

    pub fn total(&self) -> u32 {
        self.p + self.s + self.m
    }
}

fn default_max_night_shifts() -> u32 {
    9
}

/// The month-level configuration accompanying a scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleConfig {
    /// `"YYYY-MM"`.
    pub month: String,
    /// Day-of-month numbers that are public holidays.
    #[serde(default)]
    pub public_holidays: Vec<u32>,
    /// `"YYYY-MM-DD"` -> literal head-count override for that day.
    #[serde(default)]
    pub special_dates: BTreeMap<String, ShiftCounts>,
    #[serde(default = "default_max_night_shifts")]
    pub max_night_shifts: u32,
    /// Advisory only; never enforced (see DESIGN.md Open Question).
    #[serde(default)]
    pub max_default_leaves: Option<u32>,
}

/// The full `generate_schedule` request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateScheduleRequest {
    pub personnel: Vec<Person>,
    pub config: ScheduleConfig,
}

/// The shift-keyed assignment list for a single day, ids sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayAssignment {
    #[serde(rename = "P")]
    pub p: Vec<i32>,
    #[serde(rename = "S")]
    pub s: Vec<i32>,
    #[serde(rename = "M")]
    pub m: Vec<i32>,
}

impl DayAssignment {
    pub fn get_mut(&mut self, shift: ShiftType) -> &mut Vec<i32> {
        match shift {
            ShiftType::P => &mut self.p,
            ShiftType::S => &mut self.s,
            ShiftType::M => &mut self.m,
        }
    }

    pub fn get(&self, shift: ShiftType) -> &[i32] {
        match shift {
            ShiftType::P => &self.p,
            ShiftType::S => &self.s,
            ShiftType::M => &self.m,
        }
    }
}

/// The canonical output: date (`"YYYY-MM-DD"`) -> per-shift assignment.
pub type Schedule = BTreeMap<String, DayAssignment>;

/// The `generate_schedule` success response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateScheduleResponse {
    pub schedule: Schedule,
}
