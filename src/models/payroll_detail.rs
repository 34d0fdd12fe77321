//! Payroll detail (output) models.
//!
//! This module contains the [`PayrollDetail`] type and its associated structures
//! that capture all outputs of one employee's calculation: concept lines, hour
//! buckets, totals, per-day detail and an audit trace.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{ConceptCategory, PayPeriod};

/// The amount produced by one concept of the pipeline.
///
/// # Example
///
/// ```
/// use agro_payroll::models::{ConceptCategory, ConceptLine};
/// use rust_decimal::Decimal;
///
/// let line = ConceptLine {
///     code: "ONP".to_string(),
///     category: ConceptCategory::Retirement,
///     configured_value: Some(Decimal::new(13, 0)),
///     amount: Decimal::new(39000, 2),
/// };
/// assert_eq!(line.amount.to_string(), "390.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptLine {
    /// The concept code.
    pub code: String,
    /// The accounting category the amount was accumulated into.
    pub category: ConceptCategory,
    /// The configured value, kept for audit and display.
    pub configured_value: Option<Decimal>,
    /// The computed amount, rounded to 2 decimals.
    pub amount: Decimal,
}

/// Hours of the period split into pay buckets.
///
/// `normal + overtime_tier1 + overtime_tier2 + holiday_sunday == total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBreakdown {
    /// Hours up to the daily normal limit on ordinary days.
    pub normal: Decimal,
    /// First extra hours of ordinary days (25% surcharge).
    pub overtime_tier1: Decimal,
    /// Extra hours beyond tier 1 on ordinary days (35% surcharge).
    pub overtime_tier2: Decimal,
    /// All hours worked on Sundays or holidays (100% surcharge).
    pub holiday_sunday: Decimal,
    /// Portion of `holiday_sunday` above the daily normal limit.
    pub holiday_sunday_extra: Decimal,
    /// Hours falling in the night window, over all days.
    pub night: Decimal,
    /// Sum of the four partition buckets.
    pub total: Decimal,
}

/// Descriptive per-day output for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDetail {
    /// The worked date.
    pub date: NaiveDate,
    /// Day of the week.
    pub day_of_week: Weekday,
    /// Paid hours of the day.
    pub hours: Decimal,
    /// Night hours of the day.
    pub night_hours: Decimal,
    /// Productivity percentage, only for piecework days.
    pub productivity_percent: Option<Decimal>,
    /// Whether the calendar marks the date as holiday.
    pub is_holiday: bool,
    /// Whether the date is a Sunday.
    pub is_sunday: bool,
}

/// A single step in the audit trace recording one concept evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The concept code evaluated.
    pub concept_code: String,
    /// The category of the concept.
    pub category: ConceptCategory,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A recoverable problem met during calculation.
///
/// Diagnostics never abort the employee's calculation; they explain why some
/// contribution resolved to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// A code identifying the kind of diagnostic.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// The date concerned, when the diagnostic is per-day.
    pub date: Option<NaiveDate>,
}

impl Diagnostic {
    /// Creates a diagnostic not tied to a date.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            date: None,
        }
    }

    /// Creates a diagnostic for a specific date.
    pub fn on(code: &str, date: NaiveDate, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            date: Some(date),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of concept evaluations.
    pub steps: Vec<AuditStep>,
    /// Recoverable problems met during calculation.
    pub diagnostics: Vec<Diagnostic>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The itemized pay statement of one employee for one period.
///
/// Built once by the assembler and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDetail {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the statement is for.
    pub employee_id: String,
    /// The period calculated.
    pub period: PayPeriod,
    /// Concept amounts in pipeline order.
    pub concepts: Vec<ConceptLine>,
    /// Hour bucket breakdown.
    pub hours: HourBreakdown,
    /// Number of distinct worked dates.
    pub days_worked: u32,
    /// Number of complete weeks that earned the rest-day pay.
    pub dominical_weeks: u32,
    /// Period productivity score: `None` for non-piecework employees.
    pub productivity_score: Option<Decimal>,
    /// Sum of income concepts.
    pub total_income: Decimal,
    /// Sum of deduction, retirement and employee contribution concepts.
    pub total_deductions: Decimal,
    /// Sum of employer contribution concepts.
    pub total_employer_contributions: Decimal,
    /// `total_income - total_deductions`.
    pub net_pay: Decimal,
    /// Per-day descriptive detail.
    pub day_details: Vec<DayDetail>,
    /// Complete audit trace of the calculation.
    pub audit_trace: AuditTrace,
}

impl PayrollDetail {
    /// Returns the amount of a concept by code, if it was evaluated.
    pub fn concept_amount(&self, code: &str) -> Option<Decimal> {
        self.concepts
            .iter()
            .find(|line| line.code == code)
            .map(|line| line.amount)
    }

    /// Serializes the per-day detail to JSON for display layers.
    pub fn day_details_json(&self) -> EngineResult<String> {
        serde_json::to_string(&self.day_details).map_err(|e| EngineError::CalculationError {
            message: format!("failed to serialize day details: {}", e),
        })
    }
}
