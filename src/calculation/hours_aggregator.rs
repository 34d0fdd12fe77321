//! Daily hour aggregation.
//!
//! Collapses an employee's attendance entries into one paid-hours and one
//! night-hours total per calendar date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceEntry, PayPeriod};

use super::night_hours::calculate_night_hours;

/// Paid and night hours of one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    /// Sum of paid hours of all entries of the date.
    pub total_hours: Decimal,
    /// Sum of night hours of all entries of the date.
    pub night_hours: Decimal,
}

/// Hours per worked date. A date absent from the map was not worked.
pub type DailyHoursMap = BTreeMap<NaiveDate, DailyHours>;

/// Aggregates attendance entries into per-date hour totals.
///
/// Entries outside the period and entries without paid hours are ignored.
/// Several entries on the same date are added together.
///
/// # Example
///
/// ```
/// use agro_payroll::calculation::aggregate_daily_hours;
/// use agro_payroll::models::{AttendanceEntry, PayPeriod};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let entry = |id: &str, start, end, hours| AttendanceEntry {
///     id: id.to_string(),
///     employee_id: "W-1".to_string(),
///     created_at: date.and_hms_opt(start, 0, 0).unwrap(),
///     start_time: NaiveTime::from_hms_opt(start, 0, 0),
///     end_time: NaiveTime::from_hms_opt(end, 0, 0),
///     paid_hours: Some(Decimal::new(hours, 0)),
///     productivity_count: None,
///     labor_id: None,
/// };
///
/// let period = PayPeriod::new(date, date);
/// let daily = aggregate_daily_hours(&[entry("a", 6, 10, 4), entry("b", 18, 23, 5)], &period);
/// assert_eq!(daily[&date].total_hours, Decimal::new(9, 0));
/// assert_eq!(daily[&date].night_hours, Decimal::new(1, 0));
/// ```
pub fn aggregate_daily_hours(entries: &[AttendanceEntry], period: &PayPeriod) -> DailyHoursMap {
    let mut daily = DailyHoursMap::new();

    for entry in entries {
        let date = entry.work_date();
        if !period.contains_date(date) {
            continue;
        }
        let Some(paid_hours) = entry.paid_hours else {
            continue;
        };

        let day = daily.entry(date).or_default();
        day.total_hours += paid_hours;
        if let Some((start, end)) = entry.shift_times() {
            day.night_hours += calculate_night_hours(start, end, paid_hours);
        }
    }

    daily
}
