//! Calendar & Coverage Table.
//!
//! Resolves a `"YYYY-MM"` month string plus public holidays and special-date
//! overrides into a concrete list of days and a per-day, per-shift head-count
//! requirement.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use shared::{ScheduleConfig, ScheduleError, ScheduleResult, ShiftCounts, ShiftType};

/// A day's classification for coverage purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCategory {
    Weekday,
    WeekendHoliday,
    Special,
}

const WEEKDAY_DEFAULT: ShiftCounts = ShiftCounts { p: 1, s: 2, m: 2 };
const WEEKEND_HOLIDAY_DEFAULT: ShiftCounts = ShiftCounts { p: 2, s: 2, m: 3 };

/// The resolved set of days for one month, with their coverage requirements.
#[derive(Debug, Clone)]
pub struct Calendar {
    year: i32,
    month: u32,
    days_in_month: u32,
    public_holidays: HashSet<u32>,
    special_dates: BTreeMap<u32, ShiftCounts>,
}

impl Calendar {
    pub fn build(config: &ScheduleConfig) -> ScheduleResult<Self> {
        let (year, month) = parse_month(&config.month)?;
        let days_in_month = days_in_month(year, month);

        let mut public_holidays = HashSet::new();
        for &day in &config.public_holidays {
            if day < 1 || day > days_in_month {
                return Err(ScheduleError::invalid_input(format!(
                    "public holiday day {day} is out of range for {}",
                    config.month
                )));
            }
            public_holidays.insert(day);
        }

        let mut special_dates = BTreeMap::new();
        for (date_str, counts) in &config.special_dates {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
                ScheduleError::invalid_input(format!(
                    "special date '{date_str}' is not a valid YYYY-MM-DD date"
                ))
            })?;
            if date.year() != year || date.month() != month {
                return Err(ScheduleError::invalid_input(format!(
                    "special date '{date_str}' falls outside month {}",
                    config.month
                )));
            }
            special_dates.insert(date.day(), *counts);
        }

        Ok(Self {
            year,
            month,
            days_in_month,
            public_holidays,
            special_dates,
        })
    }

    pub fn days(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.days_in_month
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    pub fn date_of(&self, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, day).expect("day within calendar bounds")
    }

    pub fn date_key(&self, day: u32) -> String {
        self.date_of(day).format("%Y-%m-%d").to_string()
    }

    pub fn category(&self, day: u32) -> DayCategory {
        if self.special_dates.contains_key(&day) {
            return DayCategory::Special;
        }
        let is_weekend = matches!(self.date_of(day).weekday(), Weekday::Sat | Weekday::Sun);
        if is_weekend || self.public_holidays.contains(&day) {
            DayCategory::WeekendHoliday
        } else {
            DayCategory::Weekday
        }
    }

    pub fn is_plain_weekday(&self, day: u32) -> bool {
        matches!(self.category(day), DayCategory::Weekday)
    }

    pub fn required(&self, day: u32, shift: ShiftType) -> u32 {
        match self.category(day) {
            DayCategory::Special => self.special_dates[&day].get(shift),
            DayCategory::WeekendHoliday => WEEKEND_HOLIDAY_DEFAULT.get(shift),
            DayCategory::Weekday => WEEKDAY_DEFAULT.get(shift),
        }
    }
}

fn parse_month(month: &str) -> ScheduleResult<(i32, u32)> {
    let parts: Vec<&str> = month.split('-').collect();
    if parts.len() != 2 {
        return Err(ScheduleError::invalid_input(format!(
            "month '{month}' must be in YYYY-MM form"
        )));
    }
    let year: i32 = parts[0].parse().map_err(|_| {
        ScheduleError::invalid_input(format!("month '{month}' has a non-numeric year"))
    })?;
    let month_num: u32 = parts[1].parse().map_err(|_| {
        ScheduleError::invalid_input(format!("month '{month}' has a non-numeric month"))
    })?;
    if !(1..=12).contains(&month_num) {
        return Err(ScheduleError::invalid_input(format!(
            "month '{month}' has an out-of-range month number"
        )));
    }
    Ok((year, month_num))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid next-month date");
    let this_month_first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start");
    (next_month_first - this_month_first).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(month: &str) -> ScheduleConfig {
        ScheduleConfig {
            month: month.to_string(),
            public_holidays: vec![],
            special_dates: BTreeMap::new(),
            max_night_shifts: 9,
            max_default_leaves: None,
        }
    }

    #[test]
    fn february_leap_year_has_29_days() {
        let cal = Calendar::build(&config("2024-02")).unwrap();
        assert_eq!(cal.days_in_month(), 29);
    }

    #[test]
    fn february_non_leap_year_has_28_days() {
        let cal = Calendar::build(&config("2023-02")).unwrap();
        assert_eq!(cal.days_in_month(), 28);
    }

    #[test]
    fn april_has_30_days() {
        let cal = Calendar::build(&config("2024-04")).unwrap();
        assert_eq!(cal.days_in_month(), 30);
    }

    #[test]
    fn rejects_malformed_month() {
        assert!(Calendar::build(&config("2024/04")).is_err());
        assert!(Calendar::build(&config("2024-13")).is_err());
        assert!(Calendar::build(&config("abcd-01")).is_err());
    }

    #[test]
    fn weekend_gets_weekend_default_coverage() {
        // 2024-06-01 is a Saturday.
        let cal = Calendar::build(&config("2024-06")).unwrap();
        assert_eq!(cal.category(1), DayCategory::WeekendHoliday);
        assert_eq!(cal.required(1, ShiftType::M), 3);
    }

    #[test]
    fn plain_weekday_gets_weekday_default_coverage() {
        // 2024-06-03 is a Monday.
        let cal = Calendar::build(&config("2024-06")).unwrap();
        assert_eq!(cal.category(3), DayCategory::Weekday);
        assert_eq!(cal.required(3, ShiftType::P), 1);
    }

    #[test]
    fn public_holiday_on_a_weekday_gets_weekend_coverage() {
        let mut cfg = config("2024-06");
        cfg.public_holidays = vec![3];
        let cal = Calendar::build(&cfg).unwrap();
        assert_eq!(cal.category(3), DayCategory::WeekendHoliday);
    }

    #[test]
    fn special_date_overrides_coverage_and_takes_priority() {
        let mut cfg = config("2024-06");
        cfg.special_dates
            .insert("2024-06-01".to_string(), ShiftCounts { p: 5, s: 5, m: 5 });
        let cal = Calendar::build(&cfg).unwrap();
        assert_eq!(cal.category(1), DayCategory::Special);
        assert_eq!(cal.required(1, ShiftType::P), 5);
    }

    #[test]
    fn rejects_special_date_outside_month() {
        let mut cfg = config("2024-06");
        cfg.special_dates
            .insert("2024-07-01".to_string(), ShiftCounts::default());
        assert!(Calendar::build(&cfg).is_err());
    }

    #[test]
    fn rejects_public_holiday_out_of_range() {
        let mut cfg = config("2024-06");
        cfg.public_holidays = vec![31];
        assert!(Calendar::build(&cfg).is_err());
    }
}
