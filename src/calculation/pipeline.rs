//! The ordered concept pipeline.
//!
//! Concepts are folded strictly in configured order. Each amount is added to the
//! running totals before the next calculator runs, so percentage concepts see
//! the income accumulated by the concepts listed before them.

use serde_json::json;
use tracing::debug;

use crate::models::{AuditStep, ConceptCategory, ConceptLine, Diagnostic};

use super::concept_registry::ConceptRegistry;
use super::context::PayrollContext;
use super::round2;

/// Diagnostic code for a configured concept without a registered calculator.
pub const DIAG_UNKNOWN_CONCEPT: &str = "UNKNOWN_CONCEPT";

/// Diagnostic code for retirement concepts on an employee without a scheme.
pub const DIAG_NO_RETIREMENT_SCHEME: &str = "NO_RETIREMENT_SCHEME";

/// Concept lines and audit steps produced by one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// One line per evaluated concept, in evaluation order.
    pub lines: Vec<ConceptLine>,
    /// One audit step per evaluated concept.
    pub steps: Vec<AuditStep>,
}

/// Runs every configured concept of the context through the registry.
///
/// Retirement concepts other than the employee's own scheme are not invoked at
/// all and produce no line. Unknown codes are skipped with a diagnostic.
pub fn run_concept_pipeline(ctx: &mut PayrollContext, registry: &ConceptRegistry) -> PipelineOutput {
    let mut output = PipelineOutput::default();
    let concepts = ctx.concepts.clone();
    let mut missing_scheme_noted = false;

    for concept in &concepts {
        if concept.category == ConceptCategory::Retirement && !ctx.employee.contributes_to(&concept.code) {
            debug!(
                employee_id = %ctx.employee.id,
                concept = %concept.code,
                "retirement concept does not match employee scheme, skipped"
            );
            if ctx.employee.retirement_scheme.is_none() && !missing_scheme_noted {
                missing_scheme_noted = true;
                ctx.note(Diagnostic::new(
                    DIAG_NO_RETIREMENT_SCHEME,
                    "employee has no retirement scheme; retirement concepts skipped",
                ));
            }
            continue;
        }

        let Some(calculator) = registry.get(&concept.code) else {
            ctx.note(Diagnostic::new(
                DIAG_UNKNOWN_CONCEPT,
                format!("no calculator registered for concept '{}'", concept.code),
            ));
            continue;
        };

        let income_before = ctx.total_income;
        let deductions_before = ctx.total_deductions;

        let outcome = calculator(&*ctx, concept);
        let amount = round2(outcome.amount);
        if let Some(diagnostic) = outcome.diagnostic {
            ctx.note(diagnostic);
        }
        ctx.accumulate(concept.category, amount);

        debug!(
            employee_id = %ctx.employee.id,
            concept = %concept.code,
            category = %concept.category,
            %amount,
            "concept evaluated"
        );

        output.steps.push(AuditStep {
            step_number: output.steps.len() as u32 + 1,
            concept_code: concept.code.clone(),
            category: concept.category,
            input: json!({
                "configured_value": concept.value.map(|v| v.to_string()),
                "total_income_before": income_before.to_string(),
                "total_deductions_before": deductions_before.to_string(),
            }),
            output: json!({
                "amount": amount.to_string(),
                "total_income": ctx.total_income.to_string(),
                "total_deductions": ctx.total_deductions.to_string(),
                "total_employer_contributions": ctx.total_employer_contributions.to_string(),
            }),
            reasoning: outcome.reasoning,
        });
        output.lines.push(ConceptLine {
            code: concept.code.clone(),
            category: concept.category,
            configured_value: concept.value,
            amount,
        });
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::ConceptOutcome;
    use crate::calculation::context::tests::empty_context;
    use crate::models::ConceptConfiguration;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn registry_with_income() -> ConceptRegistry {
        let mut registry = ConceptRegistry::standard();
        registry.register("TEST_INCOME", |_, _| {
            ConceptOutcome::amount(Decimal::new(1000, 0), "stub income")
        });
        registry
    }

    fn concept(code: &str, category: ConceptCategory, value: Option<&str>) -> ConceptConfiguration {
        ConceptConfiguration::new(code, category, value.map(dec))
    }

    // ==========================================================================
    // CP-001: percentage deductions apply to income accumulated before them
    // ==========================================================================
    #[test]
    fn test_cp_001_percentage_sees_only_prior_income() {
        let mut ctx = empty_context();
        ctx.concepts = vec![
            concept("INCOME_TAX", ConceptCategory::Deduction, Some("10")),
            concept("TEST_INCOME", ConceptCategory::Income, None),
            concept("ESSALUD", ConceptCategory::EmployerContribution, Some("9")),
        ];

        let output = run_concept_pipeline(&mut ctx, &registry_with_income());

        assert_eq!(output.lines[0].amount, Decimal::ZERO);
        assert_eq!(output.lines[1].amount, dec("1000"));
        assert_eq!(output.lines[2].amount, dec("90"));
        assert_eq!(ctx.total_employer_contributions, dec("90"));
        assert_eq!(ctx.net_pay(), dec("1000"));
    }

    // ==========================================================================
    // CP-002: deductions never reduce the income base of later percentages
    // ==========================================================================
    #[test]
    fn test_cp_002_deductions_do_not_reduce_income_base() {
        let mut ctx = empty_context();
        ctx.concepts = vec![
            concept("TEST_INCOME", ConceptCategory::Income, None),
            concept("INCOME_TAX", ConceptCategory::Deduction, Some("10")),
            concept("ONP", ConceptCategory::Retirement, Some("13")),
        ];

        let output = run_concept_pipeline(&mut ctx, &registry_with_income());

        assert_eq!(output.lines[1].amount, dec("100"));
        assert_eq!(output.lines[2].amount, dec("130"));
        assert_eq!(ctx.total_deductions, dec("230"));
    }

    // ==========================================================================
    // CP-003: only the employee's retirement scheme is invoked
    // ==========================================================================
    #[test]
    fn test_cp_003_retirement_filter() {
        let mut ctx = empty_context();
        ctx.concepts = vec![
            concept("TEST_INCOME", ConceptCategory::Income, None),
            concept("AFP_PRIMA", ConceptCategory::Retirement, Some("10")),
            concept("ONP", ConceptCategory::Retirement, Some("13")),
        ];

        let output = run_concept_pipeline(&mut ctx, &registry_with_income());

        let codes: Vec<&str> = output.lines.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["TEST_INCOME", "ONP"]);
        assert_eq!(output.steps.len(), 2);
        assert!(ctx.diagnostics.is_empty());
    }

    // ==========================================================================
    // CP-004: no scheme skips every retirement concept with one diagnostic
    // ==========================================================================
    #[test]
    fn test_cp_004_missing_scheme_noted_once() {
        let mut ctx = empty_context();
        ctx.employee.retirement_scheme = None;
        ctx.concepts = vec![
            concept("AFP_PRIMA", ConceptCategory::Retirement, Some("10")),
            concept("ONP", ConceptCategory::Retirement, Some("13")),
        ];

        let output = run_concept_pipeline(&mut ctx, &ConceptRegistry::standard());

        assert!(output.lines.is_empty());
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].code, DIAG_NO_RETIREMENT_SCHEME);
    }

    // ==========================================================================
    // CP-005: unknown concept codes are skipped with a diagnostic
    // ==========================================================================
    #[test]
    fn test_cp_005_unknown_concept() {
        let mut ctx = empty_context();
        ctx.concepts = vec![concept("GRATIFICATION", ConceptCategory::Income, Some("500"))];

        let output = run_concept_pipeline(&mut ctx, &ConceptRegistry::standard());

        assert!(output.lines.is_empty());
        assert_eq!(ctx.diagnostics[0].code, DIAG_UNKNOWN_CONCEPT);
        assert_eq!(ctx.total_income, Decimal::ZERO);
    }

    // ==========================================================================
    // CP-006: amounts are rounded before they are accumulated
    // ==========================================================================
    #[test]
    fn test_cp_006_amounts_rounded() {
        let mut ctx = empty_context();
        ctx.total_income = dec("333.33");
        ctx.concepts = vec![concept("INCOME_TAX", ConceptCategory::Deduction, Some("8"))];

        let output = run_concept_pipeline(&mut ctx, &ConceptRegistry::standard());

        // 26.6664
        assert_eq!(output.lines[0].amount, dec("26.67"));
        assert_eq!(ctx.total_deductions, dec("26.67"));
    }

    // ==========================================================================
    // CP-007: audit steps record totals before and after each concept
    // ==========================================================================
    #[test]
    fn test_cp_007_audit_steps() {
        let mut ctx = empty_context();
        ctx.concepts = vec![
            concept("TEST_INCOME", ConceptCategory::Income, None),
            concept("ONP", ConceptCategory::Retirement, Some("13")),
        ];

        let output = run_concept_pipeline(&mut ctx, &registry_with_income());

        let step = &output.steps[1];
        assert_eq!(step.step_number, 2);
        assert_eq!(step.concept_code, "ONP");
        assert_eq!(dec(step.input["total_income_before"].as_str().unwrap()), dec("1000"));
        assert_eq!(dec(step.output["amount"].as_str().unwrap()), dec("130"));
        assert!(step.reasoning.contains("13%"));
    }
}
