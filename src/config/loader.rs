//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings and
//! the ordered concept list from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::calculation::{CalculationParameters, CalendarIndex, PayrollInputs};
use crate::error::{EngineError, EngineResult};
use crate::models::{ConceptConfiguration, LaborCatalog, PayPeriod};

use super::types::{ConceptsFile, EngineSettings};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Daily hours, month divisor, overtime rates, concurrency
/// └── concepts.yaml  # Pay concepts in evaluation order
/// ```
///
/// # Example
///
/// ```no_run
/// use agro_payroll::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let parameters = loader.parameters(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
///     13,
///     26,
/// )?;
/// assert_eq!(parameters.month_calculation_days, 30);
/// # Ok::<(), agro_payroll::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    concepts: Vec<ConceptConfiguration>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The loaded values are unusable (see [`ConfigLoader::from_parts`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let concepts = Self::load_yaml::<ConceptsFile>(&path.join("concepts.yaml"))?.concepts;

        let loader = Self::from_parts(settings, concepts)?;
        info!(
            path = %path.display(),
            concepts = loader.concepts.len(),
            "configuration loaded"
        );
        Ok(loader)
    }

    /// Builds a loader from already-parsed values.
    ///
    /// Fails with [`EngineError::InvalidConfig`] when the concept list is empty or
    /// repeats a code, when `daily_normal_hours` is not positive, or when
    /// `month_calculation_days` or `concurrency_limit` is zero.
    pub fn from_parts(
        settings: EngineSettings,
        concepts: Vec<ConceptConfiguration>,
    ) -> EngineResult<Self> {
        let invalid =
            |message: String| -> EngineResult<Self> { Err(EngineError::InvalidConfig { message }) };

        if concepts.is_empty() {
            return invalid("no concepts configured".to_string());
        }
        let mut seen = HashSet::new();
        for concept in &concepts {
            if !seen.insert(concept.code.to_ascii_uppercase()) {
                return invalid(format!("concept '{}' is configured twice", concept.code));
            }
        }
        if settings.daily_normal_hours <= Decimal::ZERO {
            return invalid("daily_normal_hours must be positive".to_string());
        }
        if settings.month_calculation_days == 0 {
            return invalid("month_calculation_days must be greater than zero".to_string());
        }
        if settings.concurrency_limit == 0 {
            return invalid("concurrency_limit must be greater than zero".to_string());
        }

        Ok(Self { settings, concepts })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the concepts in evaluation order.
    pub fn concepts(&self) -> &[ConceptConfiguration] {
        &self.concepts
    }

    /// Builds the run parameters of a period.
    ///
    /// `working_days` counts the calendar's working days inside the period and
    /// `total_working_days` those of the whole month; both come from the
    /// surrounding batch layer.
    pub fn parameters(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
        working_days: u32,
        total_working_days: u32,
    ) -> EngineResult<CalculationParameters> {
        if period_end < period_start {
            return Err(EngineError::InvalidPeriod {
                start: period_start,
                end: period_end,
            });
        }

        Ok(CalculationParameters {
            period: PayPeriod::new(period_start, period_end),
            working_days,
            total_working_days,
            overtime: self.settings.overtime.clone(),
            daily_normal_hours: self.settings.daily_normal_hours,
            month_calculation_days: self.settings.month_calculation_days,
        })
    }

    /// Bundles run parameters with the read-only snapshots of a run.
    pub fn payroll_inputs(
        &self,
        parameters: CalculationParameters,
        calendar: CalendarIndex,
        labors: LaborCatalog,
    ) -> PayrollInputs {
        PayrollInputs {
            parameters,
            calendar,
            labors,
            concepts: self.concepts.clone(),
        }
    }
}
