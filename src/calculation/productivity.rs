//! Piecework productivity and excess pay.
//!
//! Only dates whose labor is piecework with valid terms (positive minimum task
//! requirement and base price) are evaluated. For each such date:
//!
//! - productivity % = count / minimum × 100, rounded to 2 decimals
//! - excess units = max(0, count − minimum)
//! - excess pay = excess units × base price
//!
//! The period score is `None` when nothing qualified, `0` when any date fell short
//! of 100% and `100` when every date met the minimum.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{AttendanceEntry, Diagnostic, LaborCatalog, PayPeriod, PieceworkTerms};

use super::round2;

/// Percentage meaning the minimum task requirement was met exactly.
pub const FULL_PRODUCTIVITY: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Diagnostic code for a piecework labor lacking valid terms.
pub const DIAG_PIECEWORK_TERMS_MISSING: &str = "PIECEWORK_TERMS_MISSING";

/// Diagnostic code for an attendance entry referencing an unknown labor.
pub const DIAG_LABOR_NOT_FOUND: &str = "LABOR_NOT_FOUND";

/// Productivity of one piecework date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProductivity {
    /// The worked date.
    pub date: NaiveDate,
    /// Units produced on the date.
    pub productivity_count: u64,
    /// Minimum units required on the date.
    pub min_task_requirement: u64,
    /// Productivity percentage, rounded to 2 decimals.
    pub productivity_percent: Decimal,
    /// Units above the minimum.
    pub excess_units: u64,
    /// Pay for the excess units.
    pub excess_pay: Decimal,
}

/// Productivity of a whole period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductivitySummary {
    /// Per-date productivity of qualifying dates.
    pub days: BTreeMap<NaiveDate, DailyProductivity>,
    /// Period score: `None`, `0` or `100`.
    pub score: Option<Decimal>,
    /// Sum of excess pay over all dates.
    pub total_excess_pay: Decimal,
    /// Labors skipped for missing terms or unknown references.
    pub diagnostics: Vec<Diagnostic>,
}

/// Returns the units produced above the minimum requirement.
///
/// ```
/// use agro_payroll::calculation::excess_units;
///
/// assert_eq!(excess_units(30, 25), 5);
/// assert_eq!(excess_units(20, 25), 0);
/// ```
pub fn excess_units(productivity_count: u64, min_task_requirement: u64) -> u64 {
    productivity_count.saturating_sub(min_task_requirement)
}

/// Returns the productivity percentage, rounded to 2 decimals (half-up).
///
/// ```
/// use agro_payroll::calculation::productivity_percent;
/// use rust_decimal::Decimal;
///
/// assert_eq!(productivity_percent(30, 25), Decimal::new(12000, 2));
/// ```
pub fn productivity_percent(productivity_count: u64, min_task_requirement: u64) -> Decimal {
    if min_task_requirement == 0 {
        return Decimal::ZERO;
    }
    round2(
        Decimal::from(productivity_count) / Decimal::from(min_task_requirement)
            * FULL_PRODUCTIVITY,
    )
}

/// Evaluates piecework productivity for the attendance of one employee.
///
/// Entries outside the period or without a productivity count are ignored. When
/// one date carries several piecework labors, counts and minimums are added and
/// excess is computed per labor before being summed. Sums are kept in `u64`, so
/// any number of `u32` counts on a date adds up without wrapping.
///
/// # Example
///
/// ```
/// use agro_payroll::calculation::evaluate_productivity;
/// use agro_payroll::models::{AttendanceEntry, Labor, LaborCatalog, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let mut labors = LaborCatalog::new();
/// labors.insert("harvest".to_string(), Labor {
///     id: "harvest".to_string(),
///     name: "Harvest".to_string(),
///     is_piecework: true,
///     min_task_requirement: Some(25),
///     base_price: Some(Decimal::new(150, 2)),
/// });
/// let entry = AttendanceEntry {
///     id: "att_1".to_string(),
///     employee_id: "W-1".to_string(),
///     created_at: date.and_hms_opt(6, 0, 0).unwrap(),
///     start_time: None,
///     end_time: None,
///     paid_hours: Some(Decimal::new(8, 0)),
///     productivity_count: Some(30),
///     labor_id: Some("harvest".to_string()),
/// };
///
/// let summary = evaluate_productivity(&[entry], &labors, &PayPeriod::new(date, date));
/// let day = &summary.days[&date];
/// assert_eq!(day.productivity_percent, Decimal::new(12000, 2));
/// assert_eq!(day.excess_units, 5);
/// assert_eq!(day.excess_pay, Decimal::new(750, 2));
/// assert_eq!(summary.score, Some(Decimal::new(100, 0)));
/// ```
pub fn evaluate_productivity(
    entries: &[AttendanceEntry],
    labors: &LaborCatalog,
    period: &PayPeriod,
) -> ProductivitySummary {
    let mut diagnostics = Vec::new();
    let mut reported = BTreeSet::new();
    // date -> labor id -> (count, terms)
    let mut grouped: BTreeMap<NaiveDate, BTreeMap<&str, (u64, PieceworkTerms)>> = BTreeMap::new();

    for entry in entries {
        let date = entry.work_date();
        if !period.contains_date(date) {
            continue;
        }
        let (Some(labor_id), Some(count)) = (entry.labor_id.as_deref(), entry.productivity_count)
        else {
            continue;
        };

        let Some(labor) = labors.get(labor_id) else {
            if reported.insert(labor_id) {
                warn!(labor_id, "attendance references unknown labor");
                diagnostics.push(Diagnostic::on(
                    DIAG_LABOR_NOT_FOUND,
                    date,
                    format!("labor '{}' not found; productivity skipped", labor_id),
                ));
            }
            continue;
        };

        if !labor.is_piecework {
            continue;
        }

        let Some(terms) = labor.piecework_terms() else {
            if reported.insert(labor_id) {
                warn!(labor_id, "piecework labor without valid minimum or base price");
                diagnostics.push(Diagnostic::on(
                    DIAG_PIECEWORK_TERMS_MISSING,
                    date,
                    format!(
                        "labor '{}' lacks a positive minimum task requirement or base price; treated as non-piecework",
                        labor_id
                    ),
                ));
            }
            continue;
        };

        let slot = grouped
            .entry(date)
            .or_default()
            .entry(labor_id)
            .or_insert((0, terms));
        slot.0 += u64::from(count);
    }

    let mut days = BTreeMap::new();
    for (date, per_labor) in grouped {
        let mut productivity_count: u64 = 0;
        let mut min_task_requirement: u64 = 0;
        let mut excess: u64 = 0;
        let mut excess_pay = Decimal::ZERO;

        for (count, terms) in per_labor.values() {
            let minimum = u64::from(terms.min_task_requirement);
            let units = excess_units(*count, minimum);
            productivity_count += count;
            min_task_requirement += minimum;
            excess += units;
            excess_pay += Decimal::from(units) * terms.base_price;
        }

        days.insert(
            date,
            DailyProductivity {
                date,
                productivity_count,
                min_task_requirement,
                productivity_percent: productivity_percent(productivity_count, min_task_requirement),
                excess_units: excess,
                excess_pay: round2(excess_pay),
            },
        );
    }

    let score = period_score(&days);
    let total_excess_pay = days.values().map(|d| d.excess_pay).sum();

    ProductivitySummary {
        days,
        score,
        total_excess_pay,
        diagnostics,
    }
}

fn period_score(days: &BTreeMap<NaiveDate, DailyProductivity>) -> Option<Decimal> {
    if days.is_empty() {
        return None;
    }
    if days
        .values()
        .all(|d| d.productivity_percent >= FULL_PRODUCTIVITY)
    {
        Some(FULL_PRODUCTIVITY)
    } else {
        Some(Decimal::ZERO)
    }
}
