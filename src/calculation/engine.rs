//! Per-employee payroll calculation.
//!
//! [`compute_payroll_detail`] validates the inputs, precomputes hours,
//! productivity, basic salary and rest-day pay, then folds the configured
//! concepts through the pipeline and assembles the result.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEntry, ConceptConfiguration, Diagnostic, Employee, LaborCatalog, PayrollDetail,
};

use super::assembler::assemble_payroll_detail;
use super::basic_salary::{calculate_basic_salary, daily_rate};
use super::calendar_lookup::{CalendarIndex, CalendarLookup, is_sunday};
use super::concept_registry::ConceptRegistry;
use super::context::{CalculationParameters, DayFlags, PayrollContext};
use super::dominical::evaluate_dominical_weeks;
use super::hours_aggregator::aggregate_daily_hours;
use super::hours_categorizer::categorize_hours;
use super::pipeline::run_concept_pipeline;
use super::productivity::evaluate_productivity;
use super::round4;

/// Diagnostic code for a worked date the calendar has no data for.
pub const DIAG_CALENDAR_DATA_MISSING: &str = "CALENDAR_DATA_MISSING";

/// Read-only inputs shared by every employee of a run.
#[derive(Debug, Clone)]
pub struct PayrollInputs {
    /// Period, working-day counts and rates.
    pub parameters: CalculationParameters,
    /// Calendar snapshot covering the period.
    pub calendar: CalendarIndex,
    /// Labor catalogue referenced by attendance entries.
    pub labors: LaborCatalog,
    /// Concepts in evaluation order.
    pub concepts: Vec<ConceptConfiguration>,
}

fn validate_inputs(
    employee: &Employee,
    attendance: &[AttendanceEntry],
    parameters: &CalculationParameters,
) -> EngineResult<()> {
    let period = &parameters.period;
    if period.end_date < period.start_date {
        return Err(EngineError::InvalidPeriod {
            start: period.start_date,
            end: period.end_date,
        });
    }
    if parameters.month_calculation_days == 0 {
        return Err(EngineError::InvalidConfig {
            message: "month_calculation_days must be greater than zero".to_string(),
        });
    }
    if parameters.daily_normal_hours <= Decimal::ZERO {
        return Err(EngineError::InvalidConfig {
            message: "daily_normal_hours must be positive".to_string(),
        });
    }
    if employee.monthly_salary.is_some_and(|s| s < Decimal::ZERO) {
        return Err(EngineError::InvalidEmployee {
            field: "monthly_salary".to_string(),
            message: "cannot be negative".to_string(),
        });
    }

    for entry in attendance {
        if entry.employee_id != employee.id {
            return Err(EngineError::InvalidAttendance {
                employee_id: employee.id.clone(),
                message: format!(
                    "entry '{}' belongs to employee '{}'",
                    entry.id, entry.employee_id
                ),
            });
        }
        if entry.paid_hours.is_some_and(|h| h < Decimal::ZERO) {
            return Err(EngineError::InvalidAttendance {
                employee_id: employee.id.clone(),
                message: format!("entry '{}' has negative paid hours", entry.id),
            });
        }
    }

    Ok(())
}

/// Calculates the payroll detail of one employee for one period.
///
/// # Errors
///
/// Returns an error for an inverted period, invalid run parameters, a negative
/// salary, or attendance that is negative or belongs to another employee.
/// Missing optional data never fails the calculation; it degrades to zero and
/// is reported in the audit trace diagnostics.
pub fn compute_payroll_detail(
    employee: &Employee,
    attendance: &[AttendanceEntry],
    inputs: &PayrollInputs,
    registry: &ConceptRegistry,
) -> EngineResult<PayrollDetail> {
    let started = Instant::now();
    let parameters = &inputs.parameters;
    validate_inputs(employee, attendance, parameters)?;

    let period = parameters.period;
    let calendar = &inputs.calendar;
    let mut diagnostics = Vec::new();

    let daily_hours = aggregate_daily_hours(attendance, &period);
    let worked_dates: BTreeSet<NaiveDate> = daily_hours.keys().copied().collect();

    let day_flags: BTreeMap<NaiveDate, DayFlags> = period
        .days()
        .map(|date| {
            let flags = DayFlags {
                is_holiday: calendar.is_holiday(date),
                is_sunday: is_sunday(date),
                is_working_day: calendar.is_working_day(date),
            };
            (date, flags)
        })
        .collect();

    for date in &worked_dates {
        if calendar.calendar_day(*date).is_none() {
            diagnostics.push(Diagnostic::on(
                DIAG_CALENDAR_DATA_MISSING,
                *date,
                "no calendar data; treated as non-holiday",
            ));
        }
    }

    let hours = categorize_hours(
        &daily_hours,
        parameters.daily_normal_hours,
        parameters.overtime.tier1_hours,
        calendar,
    );

    let mut productivity = evaluate_productivity(attendance, &inputs.labors, &period);
    diagnostics.append(&mut productivity.diagnostics);

    let rate = daily_rate(employee.salary_or_zero(), parameters.month_calculation_days);
    let hourly_rate = round4(rate / parameters.daily_normal_hours);
    let basic_salary = calculate_basic_salary(&worked_dates, rate, calendar);
    let window_start = period.attendance_window_start();
    let attended: BTreeSet<NaiveDate> = attendance
        .iter()
        .filter(|entry| entry.paid_hours.is_some())
        .map(AttendanceEntry::work_date)
        .filter(|date| *date >= window_start && *date <= period.end_date)
        .collect();
    let dominical = evaluate_dominical_weeks(&period, &attended, calendar, rate);

    debug!(
        employee_id = %employee.id,
        days_worked = worked_dates.len(),
        total_hours = %hours.total,
        daily_rate = %rate,
        complete_weeks = dominical.complete_weeks,
        "inputs prepared"
    );

    let mut ctx = PayrollContext {
        employee: employee.clone(),
        parameters: parameters.clone(),
        worked_dates,
        calendar: day_flags,
        daily_hours,
        hours,
        productivity,
        basic_salary,
        dominical,
        daily_rate: rate,
        hourly_rate,
        concepts: inputs.concepts.clone(),
        total_income: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        total_employer_contributions: Decimal::ZERO,
        diagnostics: Vec::new(),
    };
    for diagnostic in diagnostics {
        ctx.note(diagnostic);
    }

    let pipeline = run_concept_pipeline(&mut ctx, registry);
    let duration_us = started.elapsed().as_micros() as u64;
    let detail = assemble_payroll_detail(ctx, pipeline, duration_us);

    info!(
        employee_id = %detail.employee_id,
        net_pay = %detail.net_pay,
        concepts = detail.concepts.len(),
        diagnostics = detail.audit_trace.diagnostics.len(),
        duration_us,
        "payroll detail computed"
    );

    Ok(detail)
}
