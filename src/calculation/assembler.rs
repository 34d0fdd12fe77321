//! Builds the immutable [`PayrollDetail`] from a finished context.

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::models::{AuditTrace, DayDetail, PayrollDetail};

use super::context::PayrollContext;
use super::pipeline::PipelineOutput;

/// Version stamped on every detail.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assembles the output record of one employee's calculation.
pub fn assemble_payroll_detail(
    ctx: PayrollContext,
    pipeline: PipelineOutput,
    duration_us: u64,
) -> PayrollDetail {
    let day_details = ctx
        .worked_dates
        .iter()
        .map(|date| {
            let hours = ctx.daily_hours.get(date).copied().unwrap_or_default();
            let flags = ctx.day_flags(*date).unwrap_or_default();
            DayDetail {
                date: *date,
                day_of_week: date.weekday(),
                hours: hours.total_hours,
                night_hours: hours.night_hours,
                productivity_percent: ctx
                    .productivity
                    .days
                    .get(date)
                    .map(|day| day.productivity_percent),
                is_holiday: flags.is_holiday,
                is_sunday: flags.is_sunday,
            }
        })
        .collect();

    PayrollDetail {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        employee_id: ctx.employee.id.clone(),
        period: ctx.parameters.period,
        concepts: pipeline.lines,
        days_worked: ctx.days_worked(),
        dominical_weeks: ctx.dominical.complete_weeks,
        productivity_score: ctx.productivity.score,
        net_pay: ctx.net_pay(),
        total_income: ctx.total_income,
        total_deductions: ctx.total_deductions,
        total_employer_contributions: ctx.total_employer_contributions,
        day_details,
        audit_trace: AuditTrace {
            steps: pipeline.steps,
            diagnostics: ctx.diagnostics,
            duration_us,
        },
        hours: ctx.hours,
    }
}
