//! Night hour calculation.
//!
//! The night window runs from 22:00 to 06:00 of the next day. Shifts are given as
//! time-of-day pairs; an end at or before the start means the shift crossed
//! midnight and is split into `[start, 24:00)` and `[00:00, end]`, each measured
//! against the window with the same same-day overlap function.

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;

use super::round2;

/// Minute of the day at which the night window opens (22:00).
pub const NIGHT_START_MINUTE: u32 = 22 * 60;

/// Minute of the day at which the night window closes (06:00).
pub const NIGHT_END_MINUTE: u32 = 6 * 60;

/// Longest possible night contribution of a single shift, in minutes.
pub const MAX_NIGHT_MINUTES: u32 = 8 * 60;

const MINUTES_PER_DAY: u32 = 24 * 60;

fn minute_of_day(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

fn overlap(start: u32, end: u32, window_start: u32, window_end: u32) -> u32 {
    end.min(window_end).saturating_sub(start.max(window_start))
}

/// Night minutes of a range that does not cross midnight (`start <= end <= 24:00`).
fn same_day_night_minutes(start: u32, end: u32) -> u32 {
    overlap(start, end, 0, NIGHT_END_MINUTE)
        + overlap(start, end, NIGHT_START_MINUTE, MINUTES_PER_DAY)
}

/// Returns the number of minutes of a shift that fall in the night window.
///
/// # Examples
///
/// ```
/// use agro_payroll::calculation::night_minutes;
/// use chrono::NaiveTime;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// // 20:00 to 02:00 crosses midnight: 22:00-24:00 plus 00:00-02:00
/// assert_eq!(night_minutes(t(20, 0), t(2, 0)), 240);
/// // Day shift
/// assert_eq!(night_minutes(t(7, 0), t(15, 0)), 0);
/// // Early start
/// assert_eq!(night_minutes(t(4, 30), t(12, 0)), 90);
/// ```
pub fn night_minutes(start: NaiveTime, end: NaiveTime) -> u32 {
    let start = minute_of_day(start);
    let end = minute_of_day(end);

    let minutes = if end <= start {
        same_day_night_minutes(start, MINUTES_PER_DAY) + same_day_night_minutes(0, end)
    } else {
        same_day_night_minutes(start, end)
    };

    minutes.min(MAX_NIGHT_MINUTES)
}

/// Calculates the night hours of one shift.
///
/// The result is rounded to 2 decimal places (half-up) and never exceeds the
/// paid hours of the shift, so unpaid breaks inside the window are not counted
/// as paid night time.
///
/// # Arguments
///
/// * `start` - Shift start time of day
/// * `end` - Shift end time of day (at or before `start` when crossing midnight)
/// * `paid_hours` - Paid hours recorded for the shift
///
/// # Examples
///
/// ```
/// use agro_payroll::calculation::calculate_night_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
///
/// // A shift covering the whole window earns exactly 8 night hours
/// assert_eq!(calculate_night_hours(t(21), t(7), Decimal::new(10, 0)), Decimal::new(8, 0));
/// ```
pub fn calculate_night_hours(start: NaiveTime, end: NaiveTime, paid_hours: Decimal) -> Decimal {
    let hours = round2(Decimal::from(night_minutes(start, end)) / Decimal::from(60));
    hours.min(paid_hours.max(Decimal::ZERO))
}
