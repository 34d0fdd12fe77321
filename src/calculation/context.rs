//! The per-employee payroll context.
//!
//! A [`PayrollContext`] holds every precomputed input of one employee's
//! calculation plus the running totals the concept pipeline accumulates into.
//! It is owned by a single calculation and discarded once the detail is built.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::OvertimeRates;
use crate::models::{
    ConceptCategory, ConceptConfiguration, Diagnostic, Employee, HourBreakdown, PayPeriod,
};

use super::basic_salary::BasicSalaryResult;
use super::dominical::DominicalSummary;
use super::hours_aggregator::DailyHoursMap;
use super::productivity::ProductivitySummary;

/// The run-level parameters of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationParameters {
    /// The period calculated.
    pub period: PayPeriod,
    /// Working days inside the period, per the calendar.
    pub working_days: u32,
    /// Working days of the whole month the period belongs to.
    pub total_working_days: u32,
    /// Overtime and surcharge rates.
    pub overtime: OvertimeRates,
    /// Hours of an ordinary day paid without surcharge.
    pub daily_normal_hours: Decimal,
    /// Days a monthly salary is divided by.
    pub month_calculation_days: u32,
}

/// Calendar flags of one date, resolved once per calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFlags {
    /// Whether the calendar marks the date as holiday.
    pub is_holiday: bool,
    /// Whether the date is a Sunday.
    pub is_sunday: bool,
    /// Whether attendance was expected.
    pub is_working_day: bool,
}

/// Shared accumulator threaded through the concept pipeline.
#[derive(Debug, Clone)]
pub struct PayrollContext {
    /// The employee being calculated.
    pub employee: Employee,
    /// Run-level parameters.
    pub parameters: CalculationParameters,
    /// Dates with paid attendance.
    pub worked_dates: BTreeSet<NaiveDate>,
    /// Calendar flags for every date of the period.
    pub calendar: BTreeMap<NaiveDate, DayFlags>,
    /// Paid and night hours per worked date.
    pub daily_hours: DailyHoursMap,
    /// Categorized hour buckets.
    pub hours: HourBreakdown,
    /// Piecework productivity.
    pub productivity: ProductivitySummary,
    /// Worked dates priced at the daily rate and day multiplier.
    pub basic_salary: BasicSalaryResult,
    /// Rest-day evaluation.
    pub dominical: DominicalSummary,
    /// Daily rate (4 decimals).
    pub daily_rate: Decimal,
    /// Hourly rate: daily rate over daily normal hours (4 decimals).
    pub hourly_rate: Decimal,
    /// Configured concepts in evaluation order.
    pub concepts: Vec<ConceptConfiguration>,
    /// Running total of income concepts.
    pub total_income: Decimal,
    /// Running total of deduction, retirement and employee contribution concepts.
    pub total_deductions: Decimal,
    /// Running total of employer contribution concepts.
    pub total_employer_contributions: Decimal,
    /// Recoverable problems recorded so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PayrollContext {
    /// Adds an amount to the running total of its category.
    pub fn accumulate(&mut self, category: ConceptCategory, amount: Decimal) {
        match category {
            ConceptCategory::Income => self.total_income += amount,
            ConceptCategory::EmployerContribution => self.total_employer_contributions += amount,
            ConceptCategory::Deduction
            | ConceptCategory::Retirement
            | ConceptCategory::EmployeeContribution => self.total_deductions += amount,
        }
    }

    /// Records a diagnostic and logs it.
    pub fn note(&mut self, diagnostic: Diagnostic) {
        warn!(
            employee_id = %self.employee.id,
            code = %diagnostic.code,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    /// Returns the calendar flags of a date inside the period.
    pub fn day_flags(&self, date: NaiveDate) -> Option<DayFlags> {
        self.calendar.get(&date).copied()
    }

    /// Returns the number of distinct worked dates.
    pub fn days_worked(&self) -> u32 {
        self.worked_dates.len() as u32
    }

    /// Returns `total_income - total_deductions`.
    pub fn net_pay(&self) -> Decimal {
        self.total_income - self.total_deductions
    }
}
