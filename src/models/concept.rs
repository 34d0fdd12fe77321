//! Pay concept configuration.
//!
//! A concept is a single named pay component. The configured list is ordered and
//! that order is the evaluation order of the concept pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The accounting category of a pay concept.
///
/// # Example
///
/// ```
/// use agro_payroll::models::ConceptCategory;
///
/// let category: ConceptCategory = serde_json::from_str("\"EMPLOYER_CONTRIBUTION\"").unwrap();
/// assert_eq!(category, ConceptCategory::EmployerContribution);
/// assert!(!category.is_deduction());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConceptCategory {
    /// Adds to total income.
    Income,
    /// Subtracted from pay.
    Deduction,
    /// Pension contribution; only the employee's own scheme is evaluated.
    Retirement,
    /// Contribution withheld from the employee.
    EmployeeContribution,
    /// Cost borne by the employer; never netted against pay.
    EmployerContribution,
}

impl ConceptCategory {
    /// Returns true for categories accumulated into total deductions.
    pub fn is_deduction(self) -> bool {
        matches!(
            self,
            ConceptCategory::Deduction
                | ConceptCategory::Retirement
                | ConceptCategory::EmployeeContribution
        )
    }
}

impl std::fmt::Display for ConceptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConceptCategory::Income => write!(f, "INCOME"),
            ConceptCategory::Deduction => write!(f, "DEDUCTION"),
            ConceptCategory::Retirement => write!(f, "RETIREMENT"),
            ConceptCategory::EmployeeContribution => write!(f, "EMPLOYEE_CONTRIBUTION"),
            ConceptCategory::EmployerContribution => write!(f, "EMPLOYER_CONTRIBUTION"),
        }
    }
}

/// One configured pay concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptConfiguration {
    /// The concept code, used to look up its calculator.
    pub code: String,
    /// The accounting category.
    pub category: ConceptCategory,
    /// Configured parameter: a percentage in points (13 means 13%) or a fixed
    /// amount, depending on the calculator.
    #[serde(default)]
    pub value: Option<Decimal>,
    /// Free-text description shown on the pay slip.
    #[serde(default)]
    pub description: Option<String>,
}

impl ConceptConfiguration {
    /// Creates a concept configuration without description.
    pub fn new(code: &str, category: ConceptCategory, value: Option<Decimal>) -> Self {
        Self {
            code: code.to_string(),
            category,
            value,
            description: None,
        }
    }
}
