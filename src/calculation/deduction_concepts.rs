//! Deduction and contribution calculators.
//!
//! Percentage concepts apply to the income accumulated so far in the configured
//! order, not to the final income of the period.

use rust_decimal::Decimal;

use crate::models::ConceptConfiguration;

use super::concept_registry::ConceptOutcome;
use super::context::PayrollContext;
use super::income_concepts::DIAG_MISSING_CONCEPT_VALUE;

/// Diagnostic code for a health plan concept on an employee without a plan.
pub const DIAG_NO_HEALTH_SCHEME: &str = "NO_HEALTH_SCHEME";

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// A percentage (in points) of the running total income.
///
/// # Example
///
/// With 1000 of income accumulated and a value of 13, the concept contributes 130.
pub fn percentage_of_income(
    ctx: &PayrollContext,
    concept: &ConceptConfiguration,
) -> ConceptOutcome {
    let Some(percent) = concept.value else {
        return ConceptOutcome::degraded(
            DIAG_MISSING_CONCEPT_VALUE,
            &concept.code,
            "no percentage configured",
        );
    };

    let amount = ctx.total_income * percent / HUNDRED;
    ConceptOutcome::amount(
        amount,
        format!(
            "{}% of accumulated income ${} = ${}",
            percent.normalize(),
            ctx.total_income.normalize(),
            amount.normalize()
        ),
    )
}

/// Health plan contribution, charged only to employees enrolled in a plan.
pub fn health_plan(ctx: &PayrollContext, concept: &ConceptConfiguration) -> ConceptOutcome {
    match ctx.employee.health_scheme.as_deref() {
        Some(_) => percentage_of_income(ctx, concept),
        None => ConceptOutcome::degraded(
            DIAG_NO_HEALTH_SCHEME,
            &concept.code,
            "employee is not enrolled in a health plan",
        ),
    }
}
