//! Income concept calculators.
//!
//! Each calculator reads precomputed inputs from the [`PayrollContext`] and the
//! concept's configured value. Missing inputs degrade to zero with a diagnostic.

use rust_decimal::Decimal;

use crate::models::ConceptConfiguration;

use super::concept_registry::ConceptOutcome;
use super::context::PayrollContext;
use super::productivity::FULL_PRODUCTIVITY;

/// Diagnostic code for a zero or missing monthly salary.
pub const DIAG_MISSING_SALARY: &str = "MISSING_SALARY";

/// Diagnostic code for a period without worked dates.
pub const DIAG_NO_WORKED_DATES: &str = "NO_WORKED_DATES";

/// Diagnostic code for a value-driven concept without configured value.
pub const DIAG_MISSING_CONCEPT_VALUE: &str = "MISSING_CONCEPT_VALUE";

/// Diagnostic code for a productivity bonus on an employee without piecework.
pub const DIAG_NO_PIECEWORK: &str = "NO_PIECEWORK";

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

fn missing_salary(ctx: &PayrollContext, concept: &ConceptConfiguration) -> Option<ConceptOutcome> {
    (ctx.employee.salary_or_zero() <= Decimal::ZERO).then(|| {
        ConceptOutcome::degraded(
            DIAG_MISSING_SALARY,
            &concept.code,
            "monthly salary is missing or zero",
        )
    })
}

/// Basic salary: worked days at the daily rate with Sunday/holiday multipliers.
pub fn basic_salary(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    if let Some(outcome) = missing_salary(ctx, concept) {
        return outcome;
    }
    if ctx.worked_dates.is_empty() {
        return ConceptOutcome::degraded(
            DIAG_NO_WORKED_DATES,
            &concept.code,
            "no worked dates in the period",
        );
    }

    let units: u32 = ctx.basic_salary.days.iter().map(|d| d.multiplier).sum();
    ConceptOutcome::amount(
        ctx.basic_salary.amount,
        format!(
            "{} worked days ({} day-rate units) × ${} = ${}",
            ctx.basic_salary.days.len(),
            units,
            ctx.daily_rate.normalize(),
            ctx.basic_salary.amount.normalize()
        ),
    )
}

/// Rest-day pay: one daily rate per week with full Monday-to-Saturday attendance.
pub fn dominical(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    if let Some(outcome) = missing_salary(ctx, concept) {
        return outcome;
    }

    ConceptOutcome::amount(
        ctx.dominical.bonus,
        format!(
            "{} of {} weeks complete × ${} = ${}",
            ctx.dominical.complete_weeks,
            ctx.dominical.weeks.len(),
            ctx.daily_rate.normalize(),
            ctx.dominical.bonus.normalize()
        ),
    )
}

fn surcharged_hours(
    ctx: &PayrollContext,
    concept: &ConceptConfiguration,
    hours: Decimal,
    default_surcharge: Decimal,
    label: &str,
) -> ConceptOutcome {
    if hours <= Decimal::ZERO {
        return ConceptOutcome::amount(Decimal::ZERO, format!("no {} hours", label));
    }
    if let Some(outcome) = missing_salary(ctx, concept) {
        return outcome;
    }

    let surcharge = concept.value.unwrap_or(default_surcharge);
    let rate = ctx.hourly_rate * (Decimal::ONE + surcharge / HUNDRED);
    let amount = hours * rate;
    ConceptOutcome::amount(
        amount,
        format!(
            "{} {} hours × ${} (hourly ${} + {}%) = ${}",
            hours.normalize(),
            label,
            rate.normalize(),
            ctx.hourly_rate.normalize(),
            surcharge.normalize(),
            amount.normalize()
        ),
    )
}

/// First extra hours of ordinary days at the tier 1 surcharge.
pub fn overtime_tier1(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    surcharged_hours(
        ctx,
        concept,
        ctx.hours.overtime_tier1,
        ctx.parameters.overtime.tier1_surcharge,
        "tier 1 overtime",
    )
}

/// Extra hours beyond tier 1 at the tier 2 surcharge.
pub fn overtime_tier2(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    surcharged_hours(
        ctx,
        concept,
        ctx.hours.overtime_tier2,
        ctx.parameters.overtime.tier2_surcharge,
        "tier 2 overtime",
    )
}

/// Sunday/holiday hours beyond the daily normal hours at the holiday surcharge.
///
/// The normal part of those days is already paid at double or triple by the
/// basic salary.
pub fn holiday_overtime(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    surcharged_hours(
        ctx,
        concept,
        ctx.hours.holiday_sunday_extra,
        ctx.parameters.overtime.holiday_surcharge,
        "Sunday/holiday extra",
    )
}

/// Night hours at the night surcharge only (the hours themselves are paid elsewhere).
pub fn night_surcharge(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    let hours = ctx.hours.night;
    if hours <= Decimal::ZERO {
        return ConceptOutcome::amount(Decimal::ZERO, "no night hours");
    }
    if let Some(outcome) = missing_salary(ctx, concept) {
        return outcome;
    }

    let surcharge = concept
        .value
        .unwrap_or(ctx.parameters.overtime.night_surcharge);
    let amount = hours * ctx.hourly_rate * surcharge / HUNDRED;
    ConceptOutcome::amount(
        amount,
        format!(
            "{} night hours × ${} × {}% = ${}",
            hours.normalize(),
            ctx.hourly_rate.normalize(),
            surcharge.normalize(),
            amount.normalize()
        ),
    )
}

/// Pay for units produced above the daily minimum on piecework dates.
pub fn piecework_excess(ctx: &PayrollContext, _concept: &ConceptConfiguration) -> ConceptOutcome {
    let units: u64 = ctx
        .productivity
        .days
        .values()
        .map(|d| d.excess_units)
        .sum();
    ConceptOutcome::amount(
        ctx.productivity.total_excess_pay,
        format!(
            "{} excess units over {} piecework days = ${}",
            units,
            ctx.productivity.days.len(),
            ctx.productivity.total_excess_pay.normalize()
        ),
    )
}

/// Fixed bonus paid when every piecework date met the minimum.
pub fn productivity_bonus(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    let Some(value) = concept.value else {
        return ConceptOutcome::degraded(
            DIAG_MISSING_CONCEPT_VALUE,
            &concept.code,
            "no bonus amount configured",
        );
    };

    match ctx.productivity.score {
        None => ConceptOutcome::degraded(
            DIAG_NO_PIECEWORK,
            &concept.code,
            "employee has no piecework dates in the period",
        ),
        Some(score) if score >= FULL_PRODUCTIVITY => ConceptOutcome::amount(
            value,
            format!("productivity score 100: bonus ${}", value.normalize()),
        ),
        Some(_) => ConceptOutcome::amount(
            Decimal::ZERO,
            "minimum task requirement missed on at least one date",
        ),
    }
}

/// Monthly family allowance for employees with dependents, prorated by the share
/// of the month's working days that fall in the period.
pub fn family_allowance(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    let Some(value) = concept.value else {
        return ConceptOutcome::degraded(
            DIAG_MISSING_CONCEPT_VALUE,
            &concept.code,
            "no monthly allowance configured",
        );
    };
    if !ctx.employee.has_dependents() {
        return ConceptOutcome::amount(Decimal::ZERO, "no dependents declared");
    }

    let working_days = ctx.parameters.working_days;
    let total_working_days = ctx.parameters.total_working_days;
    if total_working_days == 0 || working_days >= total_working_days {
        return ConceptOutcome::amount(
            value,
            format!(
                "{} dependents: full allowance ${}",
                ctx.employee.dependents,
                value.normalize()
            ),
        );
    }

    let amount = value * Decimal::from(working_days) / Decimal::from(total_working_days);
    ConceptOutcome::amount(
        amount,
        format!(
            "{} dependents: ${} × {}/{} working days = ${}",
            ctx.employee.dependents,
            value.normalize(),
            working_days,
            total_working_days,
            amount.round_dp(2).normalize()
        ),
    )
}

/// The configured value as-is (fixed income or fixed deduction).
pub fn fixed_amount(_ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    match concept.value {
        Some(value) => ConceptOutcome::amount(value, format!("fixed amount ${}", value.normalize())),
        None => ConceptOutcome::degraded(
            DIAG_MISSING_CONCEPT_VALUE,
            &concept.code,
            "no amount configured",
        ),
    }
}
