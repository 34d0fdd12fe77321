//! Weekly rest-day (dominical) evaluation.
//!
//! A period owns the weeks whose Saturday it contains, so consecutive periods
//! never pay the same week. A week is complete when every required day from
//! Monday to Saturday was worked, including days before the period start; a day
//! is required when the calendar marks it as a working day. Sunday never affects
//! completeness. Each complete week earns one daily rate.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayPeriod;

use super::calendar_lookup::CalendarLookup;
use super::round2;

/// Completeness of one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominicalWeek {
    /// Monday of the week.
    pub monday: NaiveDate,
    /// Required Monday-to-Saturday days.
    pub required_days: u32,
    /// Required days that were worked.
    pub attended_days: u32,
    /// Required days that were not worked.
    pub missing_days: Vec<NaiveDate>,
    /// Whether the week earns the rest-day pay.
    pub complete: bool,
}

/// Rest-day evaluation of a whole period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominicalSummary {
    /// Per-week evaluation, in order.
    pub weeks: Vec<DominicalWeek>,
    /// Number of complete weeks.
    pub complete_weeks: u32,
    /// `complete_weeks × daily_rate`, rounded to 2 decimals.
    pub bonus: Decimal,
}

/// Evaluates every week owned by the period for full attendance.
///
/// `worked_dates` must cover the period and the days since
/// [`PayPeriod::attendance_window_start`]; a required date missing from it
/// counts as not attended. A week with no required day (for example a week of
/// holidays) is never complete.
///
/// # Example
///
/// ```
/// use agro_payroll::calculation::{CalendarIndex, evaluate_dominical_weeks};
/// use agro_payroll::models::PayPeriod;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// let date = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
/// let period = PayPeriod::new(date(2), date(8));
/// let worked: BTreeSet<_> = (2..=7).map(date).collect();
///
/// let summary = evaluate_dominical_weeks(&period, &worked, &CalendarIndex::default(), Decimal::new(100, 0));
/// assert_eq!(summary.complete_weeks, 1);
/// assert_eq!(summary.bonus, Decimal::new(100, 0));
/// ```
pub fn evaluate_dominical_weeks(
    period: &PayPeriod,
    worked_dates: &BTreeSet<NaiveDate>,
    calendar: &impl CalendarLookup,
    daily_rate: Decimal,
) -> DominicalSummary {
    let weeks: Vec<DominicalWeek> = period
        .weeks()
        .iter()
        .map(|week| {
            let required: Vec<NaiveDate> = week
                .days()
                .filter(|date| calendar.is_working_day(*date))
                .collect();
            let missing_days: Vec<NaiveDate> = required
                .iter()
                .filter(|date| !worked_dates.contains(*date))
                .copied()
                .collect();
            let required_days = required.len() as u32;

            DominicalWeek {
                monday: week.monday,
                required_days,
                attended_days: required_days - missing_days.len() as u32,
                complete: required_days > 0 && missing_days.is_empty(),
                missing_days,
            }
        })
        .collect();

    let complete_weeks = weeks.iter().filter(|w| w.complete).count() as u32;

    DominicalSummary {
        bonus: round2(daily_rate * Decimal::from(complete_weeks)),
        weeks,
        complete_weeks,
    }
}
