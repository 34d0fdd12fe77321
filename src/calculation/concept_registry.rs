//! Concept calculator registry.
//!
//! Calculators are plain functions looked up by concept code. The pipeline
//! skips codes with no registered calculator and records a diagnostic.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{ConceptConfiguration, Diagnostic};

use super::context::PayrollContext;
use super::{deduction_concepts, income_concepts};

/// What a calculator contributes for its concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptOutcome {
    /// The amount before rounding.
    pub amount: Decimal,
    /// Human-readable explanation, kept in the audit trace.
    pub reasoning: String,
    /// A diagnostic when the amount degraded to zero.
    pub diagnostic: Option<Diagnostic>,
}

impl ConceptOutcome {
    /// A computed amount.
    pub fn amount(amount: Decimal, reasoning: impl Into<String>) -> Self {
        Self {
            amount,
            reasoning: reasoning.into(),
            diagnostic: None,
        }
    }

    /// A zero contribution caused by missing configuration or inputs.
    pub fn degraded(code: &str, concept_code: &str, message: impl Into<String>) -> Self {
        let message = format!("{}: {}", concept_code, message.into());
        Self {
            amount: Decimal::ZERO,
            reasoning: message.clone(),
            diagnostic: Some(Diagnostic::new(code, message)),
        }
    }
}

/// A concept calculator: reads the context and the concept's own configuration.
pub type ConceptCalculator = fn(&PayrollContext, &ConceptConfiguration) -> ConceptOutcome;

/// Maps concept codes to calculators.
///
/// # Example
///
/// ```
/// use agro_payroll::calculation::{ConceptOutcome, ConceptRegistry};
/// use rust_decimal::Decimal;
///
/// let mut registry = ConceptRegistry::standard();
/// assert!(registry.contains("BASIC_SALARY"));
///
/// registry.register("HARVEST_BONUS", |_, _| ConceptOutcome::amount(Decimal::new(50, 0), "flat bonus"));
/// registry.alias("AFP_NUEVA", "AFP_PRIMA");
/// assert!(registry.contains("harvest_bonus"));
/// assert!(registry.contains("AFP_NUEVA"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConceptRegistry {
    calculators: HashMap<String, ConceptCalculator>,
}

impl ConceptRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in calculator.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("BASIC_SALARY", income_concepts::basic_salary);
        registry.register("DOMINICAL", income_concepts::dominical);
        registry.register("OVERTIME_25", income_concepts::overtime_tier1);
        registry.register("OVERTIME_35", income_concepts::overtime_tier2);
        registry.register("HOLIDAY_OVERTIME", income_concepts::holiday_overtime);
        registry.register("NIGHT_SURCHARGE", income_concepts::night_surcharge);
        registry.register("PIECEWORK_EXCESS", income_concepts::piecework_excess);
        registry.register("PRODUCTIVITY_BONUS", income_concepts::productivity_bonus);
        registry.register("FAMILY_ALLOWANCE", income_concepts::family_allowance);
        registry.register("FIXED_INCOME", income_concepts::fixed_amount);

        for code in [
            "ONP",
            "AFP_INTEGRA",
            "AFP_PRIMA",
            "AFP_PROFUTURO",
            "AFP_HABITAT",
            "INCOME_TAX",
            "ESSALUD",
        ] {
            registry.register(code, deduction_concepts::percentage_of_income);
        }
        registry.register("HEALTH_PLAN", deduction_concepts::health_plan);
        registry.register("ADVANCE", income_concepts::fixed_amount);
        registry.register("JUDICIAL_RETENTION", income_concepts::fixed_amount);

        registry
    }

    /// Adds or replaces the calculator of a code.
    pub fn register(&mut self, code: &str, calculator: ConceptCalculator) {
        self.calculators.insert(code.to_ascii_uppercase(), calculator);
    }

    /// Maps a new code onto the calculator of an existing one.
    ///
    /// Returns false, leaving the registry untouched, if `existing` is unknown.
    pub fn alias(&mut self, code: &str, existing: &str) -> bool {
        match self.get(existing) {
            Some(calculator) => {
                self.register(code, calculator);
                true
            }
            None => false,
        }
    }

    /// Returns the calculator of a code.
    pub fn get(&self, code: &str) -> Option<ConceptCalculator> {
        self.calculators.get(&code.to_ascii_uppercase()).copied()
    }

    /// Returns true if a calculator is registered for the code.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Returns the number of registered codes.
    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::context::tests::empty_context;
    use crate::models::ConceptCategory;

    #[test]
    fn test_standard_registry_codes() {
        let registry = ConceptRegistry::standard();
        for code in [
            "BASIC_SALARY",
            "DOMINICAL",
            "OVERTIME_25",
            "OVERTIME_35",
            "HOLIDAY_OVERTIME",
            "NIGHT_SURCHARGE",
            "PIECEWORK_EXCESS",
            "PRODUCTIVITY_BONUS",
            "FAMILY_ALLOWANCE",
            "ONP",
            "AFP_PRIMA",
            "HEALTH_PLAN",
            "ESSALUD",
            "ADVANCE",
        ] {
            assert!(registry.contains(code), "missing {}", code);
        }
        assert!(!registry.contains("GRATIFICATION"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(ConceptRegistry::standard().contains("basic_salary"));
    }

    #[test]
    fn test_register_replaces_calculator() {
        let mut registry = ConceptRegistry::standard();
        let before = registry.len();
        registry.register("ONP", |_, _| ConceptOutcome::amount(Decimal::ONE, "stub"));
        assert_eq!(registry.len(), before);

        let ctx = empty_context();
        let concept = ConceptConfiguration::new("ONP", ConceptCategory::Retirement, None);
        let calculator = registry.get("ONP").unwrap();
        assert_eq!(calculator(&ctx, &concept).amount, Decimal::ONE);
    }

    #[test]
    fn test_alias_of_unknown_code_fails() {
        let mut registry = ConceptRegistry::new();
        assert!(!registry.alias("X", "Y"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_degraded_outcome_carries_diagnostic() {
        let outcome = ConceptOutcome::degraded("MISSING_CONCEPT_VALUE", "ADVANCE", "no value");
        assert_eq!(outcome.amount, Decimal::ZERO);
        let diagnostic = outcome.diagnostic.unwrap();
        assert_eq!(diagnostic.code, "MISSING_CONCEPT_VALUE");
        assert_eq!(diagnostic.message, "ADVANCE: no value");
    }
}
