//! Hour categorization.
//!
//! Splits aggregated daily hours into normal, overtime tier 1, overtime tier 2 and
//! Sunday/holiday buckets for the whole period.
//!
//! ## Bucket rules
//!
//! - Sunday or holiday: every hour goes to the Sunday/holiday bucket (100%)
//! - Ordinary day: up to the daily normal hours are normal; of the rest, the first
//!   `tier1_hours` are tier 1 (25%) and anything beyond is tier 2 (35%)

use rust_decimal::Decimal;

use crate::models::HourBreakdown;

use super::calendar_lookup::CalendarLookup;
use super::hours_aggregator::DailyHoursMap;
use super::round2;

/// Default number of extra hours paid at the tier 1 surcharge.
pub const DEFAULT_TIER1_HOURS: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Categorizes the hours of every worked date into pay buckets.
///
/// # Arguments
///
/// * `daily` - Aggregated hours per worked date
/// * `daily_normal_hours` - Hours of an ordinary day paid without surcharge
/// * `tier1_hours` - Extra hours paid at the tier 1 surcharge before tier 2 applies
/// * `calendar` - Calendar lookup for holiday detection
///
/// # Returns
///
/// An [`HourBreakdown`] with each bucket rounded to 2 decimals. `total` is the sum
/// of the four partition buckets.
///
/// # Example
///
/// ```
/// use agro_payroll::calculation::{
///     CalendarIndex, DEFAULT_TIER1_HOURS, DailyHours, DailyHoursMap, categorize_hours,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut daily = DailyHoursMap::new();
/// // Monday, 11 hours: 8 normal, 2 tier 1, 1 tier 2
/// daily.insert(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     DailyHours { total_hours: Decimal::new(11, 0), night_hours: Decimal::ZERO },
/// );
///
/// let hours = categorize_hours(&daily, Decimal::new(8, 0), DEFAULT_TIER1_HOURS, &CalendarIndex::default());
/// assert_eq!(hours.normal, Decimal::new(8, 0));
/// assert_eq!(hours.overtime_tier1, Decimal::new(2, 0));
/// assert_eq!(hours.overtime_tier2, Decimal::new(1, 0));
/// assert_eq!(hours.total, Decimal::new(11, 0));
/// ```
pub fn categorize_hours(
    daily: &DailyHoursMap,
    daily_normal_hours: Decimal,
    tier1_hours: Decimal,
    calendar: &impl CalendarLookup,
) -> HourBreakdown {
    let mut normal = Decimal::ZERO;
    let mut tier1 = Decimal::ZERO;
    let mut tier2 = Decimal::ZERO;
    let mut holiday_sunday = Decimal::ZERO;
    let mut holiday_sunday_extra = Decimal::ZERO;
    let mut night = Decimal::ZERO;

    for (date, day) in daily {
        let hours = day.total_hours;
        night += day.night_hours;

        if calendar.is_sunday_or_holiday(*date) {
            holiday_sunday += hours;
            holiday_sunday_extra += (hours - daily_normal_hours).max(Decimal::ZERO);
            continue;
        }

        let day_normal = hours.min(daily_normal_hours);
        let extra = (hours - day_normal).max(Decimal::ZERO);
        let day_tier1 = extra.min(tier1_hours);

        normal += day_normal;
        tier1 += day_tier1;
        tier2 += extra - day_tier1;
    }

    let normal = round2(normal);
    let overtime_tier1 = round2(tier1);
    let overtime_tier2 = round2(tier2);
    let holiday_sunday = round2(holiday_sunday);

    HourBreakdown {
        normal,
        overtime_tier1,
        overtime_tier2,
        holiday_sunday,
        holiday_sunday_extra: round2(holiday_sunday_extra),
        night: round2(night),
        total: normal + overtime_tier1 + overtime_tier2 + holiday_sunday,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{CalendarIndex, DailyHours};
    use crate::models::CalendarDay;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn daily(days: &[(u32, &str)]) -> DailyHoursMap {
        days.iter()
            .map(|(d, h)| {
                (
                    date(*d),
                    DailyHours {
                        total_hours: dec(h),
                        night_hours: Decimal::ZERO,
                    },
                )
            })
            .collect()
    }

    fn categorize(days: &[(u32, &str)], calendar: &CalendarIndex) -> HourBreakdown {
        categorize_hours(&daily(days), dec("8"), DEFAULT_TIER1_HOURS, calendar)
    }

    // ==========================================================================
    // HC-001: exactly the normal hours
    // ==========================================================================
    #[test]
    fn test_hc_001_exactly_normal_hours() {
        let hours = categorize(&[(2, "8")], &CalendarIndex::default());
        assert_eq!(hours.normal, dec("8"));
        assert_eq!(hours.overtime_tier1, Decimal::ZERO);
        assert_eq!(hours.overtime_tier2, Decimal::ZERO);
    }

    // ==========================================================================
    // HC-002: 1.5 extra hours stay in tier 1
    // ==========================================================================
    #[test]
    fn test_hc_002_extra_within_tier1() {
        let hours = categorize(&[(3, "9.5")], &CalendarIndex::default());
        assert_eq!(hours.overtime_tier1, dec("1.5"));
        assert_eq!(hours.overtime_tier2, Decimal::ZERO);
    }

    // ==========================================================================
    // HC-003: 4 extra hours split 2 + 2
    // ==========================================================================
    #[test]
    fn test_hc_003_extra_split_across_tiers() {
        let hours = categorize(&[(4, "12")], &CalendarIndex::default());
        assert_eq!(hours.normal, dec("8"));
        assert_eq!(hours.overtime_tier1, dec("2"));
        assert_eq!(hours.overtime_tier2, dec("2"));
    }

    // ==========================================================================
    // HC-004: Sunday hours go entirely to the Sunday/holiday bucket
    // ==========================================================================
    #[test]
    fn test_hc_004_sunday_not_split() {
        let hours = categorize(&[(8, "11")], &CalendarIndex::default());
        assert_eq!(hours.normal, Decimal::ZERO);
        assert_eq!(hours.overtime_tier1, Decimal::ZERO);
        assert_eq!(hours.holiday_sunday, dec("11"));
        assert_eq!(hours.holiday_sunday_extra, dec("3"));
    }

    // ==========================================================================
    // HC-005: calendar holiday on a weekday
    // ==========================================================================
    #[test]
    fn test_hc_005_weekday_holiday() {
        let calendar = CalendarIndex::new(vec![CalendarDay {
            date: date(5),
            is_working_day: false,
            is_holiday: true,
        }]);
        let hours = categorize(&[(5, "6"), (6, "10")], &calendar);
        assert_eq!(hours.holiday_sunday, dec("6"));
        assert_eq!(hours.holiday_sunday_extra, Decimal::ZERO);
        assert_eq!(hours.normal, dec("8"));
        assert_eq!(hours.overtime_tier1, dec("2"));
    }

    // ==========================================================================
    // HC-006: the buckets partition the raw hours
    // ==========================================================================
    #[test]
    fn test_hc_006_partition_sum() {
        let days = [(2, "8"), (3, "10.25"), (4, "13.75"), (8, "9"), (9, "4.5")];
        let hours = categorize(&days, &CalendarIndex::default());
        let raw: Decimal = days.iter().map(|(_, h)| dec(h)).sum();
        assert_eq!(hours.total, raw);
        assert_eq!(
            hours.normal + hours.overtime_tier1 + hours.overtime_tier2 + hours.holiday_sunday,
            raw
        );
    }

    // ==========================================================================
    // HC-007: night hours are summed across days
    // ==========================================================================
    #[test]
    fn test_hc_007_night_hours_total() {
        let mut map = daily(&[(2, "8"), (3, "8")]);
        for day in map.values_mut() {
            day.night_hours = dec("1.25");
        }
        let hours = categorize_hours(&map, dec("8"), DEFAULT_TIER1_HOURS, &CalendarIndex::default());
        assert_eq!(hours.night, dec("2.5"));
    }

    #[test]
    fn test_empty_map_yields_zero_breakdown() {
        let hours = categorize(&[], &CalendarIndex::default());
        assert_eq!(hours, HourBreakdown::default());
    }
}
