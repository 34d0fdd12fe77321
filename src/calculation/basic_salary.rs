//! Basic salary day-rate calculation.
//!
//! Each worked date is paid one daily rate (`monthly salary / month days`) times a
//! day multiplier:
//!
//! | Day                   | Multiplier |
//! |-----------------------|------------|
//! | Ordinary day          | 1          |
//! | Sunday or holiday     | 2          |
//! | Sunday and holiday    | 3          |
//!
//! Unworked dates are not paid.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calendar_lookup::{CalendarLookup, is_sunday};
use super::{round2, round4};

/// Default number of days a monthly salary is divided by.
pub const DEFAULT_MONTH_CALCULATION_DAYS: u32 = 30;

/// The pay of one worked date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPay {
    /// The worked date.
    pub date: NaiveDate,
    /// The applied multiplier (1, 2 or 3).
    pub multiplier: u32,
    /// `daily_rate × multiplier`.
    pub amount: Decimal,
}

/// The result of the basic salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicSalaryResult {
    /// The daily rate used, at 4 decimal places.
    pub daily_rate: Decimal,
    /// Per-date pay.
    pub days: Vec<DayPay>,
    /// The total, rounded to 2 decimals.
    pub amount: Decimal,
}

/// Returns the daily rate of a monthly salary at 4 decimal places.
///
/// A zero divisor yields a zero rate.
///
/// ```
/// use agro_payroll::calculation::daily_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(daily_rate(Decimal::new(3000, 0), 30), Decimal::new(100, 0));
/// assert_eq!(daily_rate(Decimal::new(1130, 0), 30), Decimal::new(376667, 4));
/// ```
pub fn daily_rate(monthly_salary: Decimal, month_calculation_days: u32) -> Decimal {
    if month_calculation_days == 0 {
        return Decimal::ZERO;
    }
    round4(monthly_salary / Decimal::from(month_calculation_days))
}

/// Returns the pay multiplier of a worked date.
pub fn day_multiplier(is_sunday: bool, is_holiday: bool) -> u32 {
    match (is_sunday, is_holiday) {
        (true, true) => 3,
        (true, false) | (false, true) => 2,
        (false, false) => 1,
    }
}

/// Calculates the basic salary for the worked dates of a period.
///
/// # Example
///
/// ```
/// use agro_payroll::calculation::{CalendarIndex, calculate_basic_salary};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// // Saturday and Sunday worked
/// let worked: BTreeSet<NaiveDate> = [7, 8]
///     .into_iter()
///     .map(|d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap())
///     .collect();
///
/// let result = calculate_basic_salary(&worked, Decimal::new(100, 0), &CalendarIndex::default());
/// assert_eq!(result.amount, Decimal::new(300, 0));
/// assert_eq!(result.days[1].multiplier, 2);
/// ```
pub fn calculate_basic_salary(
    worked_dates: &BTreeSet<NaiveDate>,
    daily_rate: Decimal,
    calendar: &impl CalendarLookup,
) -> BasicSalaryResult {
    let days: Vec<DayPay> = worked_dates
        .iter()
        .map(|date| {
            let multiplier = day_multiplier(is_sunday(*date), calendar.is_holiday(*date));
            DayPay {
                date: *date,
                multiplier,
                amount: daily_rate * Decimal::from(multiplier),
            }
        })
        .collect();

    let amount = round2(days.iter().map(|d| d.amount).sum());

    BasicSalaryResult {
        daily_rate,
        days,
        amount,
    }
}
