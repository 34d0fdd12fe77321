//! Employee model.
//!
//! The engine receives the employee with every externally-resolved figure already
//! in place: the monthly salary (contract override or position default), the
//! pension and health scheme identifiers, and the number of dependents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee whose pay is being calculated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, used only in logs and output.
    #[serde(default)]
    pub full_name: String,
    /// The resolved base monthly salary. `None` or zero degrades the basic salary
    /// and rest-day pay to zero.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Code of the pension scheme the employee contributes to (e.g. "ONP",
    /// "AFP_PRIMA"). Only the retirement concept with this code is evaluated.
    #[serde(default)]
    pub retirement_scheme: Option<String>,
    /// Code of the private health plan, if any.
    #[serde(default)]
    pub health_scheme: Option<String>,
    /// Number of dependents declared for family allowance.
    #[serde(default)]
    pub dependents: u32,
}

impl Employee {
    /// Returns the monthly salary, treating a missing value as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use agro_payroll::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "W-0001".to_string(),
    ///     full_name: "Rosa Quispe".to_string(),
    ///     monthly_salary: None,
    ///     retirement_scheme: Some("ONP".to_string()),
    ///     health_scheme: None,
    ///     dependents: 2,
    /// };
    /// assert_eq!(employee.salary_or_zero(), Decimal::ZERO);
    /// assert!(employee.has_dependents());
    /// ```
    pub fn salary_or_zero(&self) -> Decimal {
        self.monthly_salary.unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the employee declared at least one dependent.
    pub fn has_dependents(&self) -> bool {
        self.dependents > 0
    }

    /// Returns true if the given retirement concept code is the employee's scheme.
    pub fn contributes_to(&self, retirement_code: &str) -> bool {
        self.retirement_scheme
            .as_deref()
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case(retirement_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(retirement: Option<&str>) -> Employee {
        Employee {
            id: "W-0001".to_string(),
            full_name: "Test Worker".to_string(),
            monthly_salary: Some(Decimal::new(3000, 0)),
            retirement_scheme: retirement.map(str::to_string),
            health_scheme: None,
            dependents: 0,
        }
    }

    #[test]
    fn test_contributes_to_matching_scheme() {
        let employee = create_test_employee(Some("AFP_PRIMA"));
        assert!(employee.contributes_to("AFP_PRIMA"));
        assert!(employee.contributes_to("afp_prima"));
        assert!(!employee.contributes_to("ONP"));
    }

    #[test]
    fn test_no_scheme_contributes_to_nothing() {
        let employee = create_test_employee(None);
        assert!(!employee.contributes_to("ONP"));
    }

    #[test]
    fn test_salary_or_zero_with_salary() {
        assert_eq!(
            create_test_employee(None).salary_or_zero(),
            Decimal::new(3000, 0)
        );
    }

    #[test]
    fn test_deserialization_defaults() {
        let json = r#"{"id": "W-7"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.dependents, 0);
        assert!(employee.monthly_salary.is_none());
        assert!(!employee.has_dependents());
    }
}
