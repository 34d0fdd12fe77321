//! Pay period and calendar day models.
//!
//! This module contains the [`PayPeriod`] and [`CalendarDay`] types that frame a
//! payroll calculation.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Working-day and holiday flags for one date, as published by the calendar store.
///
/// # Example
///
/// ```
/// use agro_payroll::models::CalendarDay;
/// use chrono::NaiveDate;
///
/// let labour_day = CalendarDay {
///     date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
///     is_working_day: false,
///     is_holiday: true,
/// };
/// assert!(labour_day.is_holiday);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date described.
    pub date: NaiveDate,
    /// Whether attendance is expected on this date.
    pub is_working_day: bool,
    /// Whether the date is a public holiday.
    pub is_holiday: bool,
}

/// An inclusive date range a payroll is calculated for.
///
/// # Example
///
/// ```
/// use agro_payroll::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
/// );
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert_eq!(period.days().count(), 14);
/// assert_eq!(period.weeks().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

/// A Monday-to-Saturday week owned by a [`PayPeriod`].
///
/// Every calendar week belongs to exactly one period: the one holding its
/// Saturday. The Monday may therefore precede the period start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWeek {
    /// The Monday of the calendar week.
    pub monday: NaiveDate,
    /// The Saturday of the calendar week, always inside the period.
    pub saturday: NaiveDate,
}

impl PayPeriod {
    /// Creates a period from its inclusive bounds.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Checks if a given date falls within this period (inclusive of both ends).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates over every date of the period in order.
    ///
    /// An inverted period yields nothing.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |d| *d <= self.end_date)
    }

    /// Returns the weeks whose Saturday falls inside the period.
    ///
    /// Consecutive periods never share a week. A trailing Monday-to-Friday
    /// stub belongs to the next period.
    pub fn weeks(&self) -> Vec<PeriodWeek> {
        let to_saturday = (Weekday::Sat.num_days_from_monday() + 7
            - self.start_date.weekday().num_days_from_monday())
            % 7;
        let mut saturday = self.start_date + Duration::days(to_saturday as i64);
        let mut weeks = Vec::new();

        while saturday <= self.end_date {
            weeks.push(PeriodWeek {
                monday: saturday - Duration::days(5),
                saturday,
            });
            saturday += Duration::days(7);
        }

        weeks
    }

    /// First date whose attendance the rest-day rule reads.
    ///
    /// This is the Monday of the first owned week when that week started before
    /// the period, otherwise the period start.
    pub fn attendance_window_start(&self) -> NaiveDate {
        self.weeks()
            .first()
            .map_or(self.start_date, |week| week.monday.min(self.start_date))
    }
}

impl PeriodWeek {
    /// Iterates over the dates from Monday to Saturday.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.monday
            .iter_days()
            .take_while(move |d| *d <= self.saturday)
    }
}
