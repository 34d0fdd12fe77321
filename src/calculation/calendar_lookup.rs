//! Read-only calendar lookups.
//!
//! The calendar store is an external collaborator; the engine only asks it three
//! questions per date. When a date has no calendar entry the defaults are:
//!
//! - holiday: `false`
//! - working day: every day except Sunday
//! - Sunday: always decided by the day of the week

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::CalendarDay;

/// Returns true if the date falls on a Sunday.
pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Read-only provider of working-day and holiday flags.
pub trait CalendarLookup {
    /// Returns the calendar entry for a date, if the store has one.
    fn calendar_day(&self, date: NaiveDate) -> Option<&CalendarDay>;

    /// Returns true if the calendar marks the date as holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.calendar_day(date).is_some_and(|day| day.is_holiday)
    }

    /// Returns true if attendance is expected on the date.
    fn is_working_day(&self, date: NaiveDate) -> bool {
        match self.calendar_day(date) {
            Some(day) => day.is_working_day,
            None => !is_sunday(date),
        }
    }

    /// Returns true if the date is a Sunday or a holiday.
    fn is_sunday_or_holiday(&self, date: NaiveDate) -> bool {
        is_sunday(date) || self.is_holiday(date)
    }
}

/// An in-memory calendar snapshot indexed by date.
///
/// # Example
///
/// ```
/// use agro_payroll::calculation::{CalendarIndex, CalendarLookup};
/// use agro_payroll::models::CalendarDay;
/// use chrono::NaiveDate;
///
/// let holiday = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
/// let calendar: CalendarIndex = vec![CalendarDay {
///     date: holiday,
///     is_working_day: false,
///     is_holiday: true,
/// }]
/// .into_iter()
/// .collect();
///
/// assert!(calendar.is_holiday(holiday));
/// assert!(!calendar.is_working_day(holiday));
///
/// // Missing data: weekday defaults to working, not holiday
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// assert!(calendar.is_working_day(monday));
/// assert!(!calendar.is_holiday(monday));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalendarIndex {
    days: BTreeMap<NaiveDate, CalendarDay>,
}

impl CalendarIndex {
    /// Creates an index from a list of calendar days. Later duplicates win.
    pub fn new(days: Vec<CalendarDay>) -> Self {
        days.into_iter().collect()
    }

    /// Returns the number of dates with calendar data.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the index holds no calendar data.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<CalendarDay> for CalendarIndex {
    fn from_iter<I: IntoIterator<Item = CalendarDay>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().map(|day| (day.date, day)).collect(),
        }
    }
}

impl CalendarLookup for CalendarIndex {
    fn calendar_day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.get(&date)
    }
}
