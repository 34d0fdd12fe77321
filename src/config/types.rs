//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ConceptConfiguration;

fn default_tier1_hours() -> Decimal {
    Decimal::new(2, 0)
}

fn default_tier1_surcharge() -> Decimal {
    Decimal::new(25, 0)
}

fn default_tier2_surcharge() -> Decimal {
    Decimal::new(35, 0)
}

fn default_holiday_surcharge() -> Decimal {
    Decimal::new(100, 0)
}

fn default_night_surcharge() -> Decimal {
    Decimal::new(35, 0)
}

fn default_daily_normal_hours() -> Decimal {
    Decimal::new(8, 0)
}

fn default_month_calculation_days() -> u32 {
    30
}

fn default_concurrency_limit() -> usize {
    4
}

/// Overtime and surcharge rates, in percentage points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRates {
    /// Extra hours per day paid at the tier 1 surcharge.
    #[serde(default = "default_tier1_hours")]
    pub tier1_hours: Decimal,
    /// Surcharge of the first extra hours (25 = 25%).
    #[serde(default = "default_tier1_surcharge")]
    pub tier1_surcharge: Decimal,
    /// Surcharge of extra hours beyond tier 1.
    #[serde(default = "default_tier2_surcharge")]
    pub tier2_surcharge: Decimal,
    /// Surcharge of hours worked on Sundays and holidays.
    #[serde(default = "default_holiday_surcharge")]
    pub holiday_surcharge: Decimal,
    /// Surcharge of hours in the night window.
    #[serde(default = "default_night_surcharge")]
    pub night_surcharge: Decimal,
}

impl Default for OvertimeRates {
    fn default() -> Self {
        Self {
            tier1_hours: default_tier1_hours(),
            tier1_surcharge: default_tier1_surcharge(),
            tier2_surcharge: default_tier2_surcharge(),
            holiday_surcharge: default_holiday_surcharge(),
            night_surcharge: default_night_surcharge(),
        }
    }
}

/// Engine settings from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Hours of an ordinary day paid without surcharge.
    #[serde(default = "default_daily_normal_hours")]
    pub daily_normal_hours: Decimal,
    /// Days a monthly salary is divided by to get the daily rate.
    #[serde(default = "default_month_calculation_days")]
    pub month_calculation_days: u32,
    /// Overtime and surcharge rates.
    #[serde(default)]
    pub overtime: OvertimeRates,
    /// Maximum number of employees calculated at the same time.
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            daily_normal_hours: default_daily_normal_hours(),
            month_calculation_days: default_month_calculation_days(),
            overtime: OvertimeRates::default(),
            concurrency_limit: default_concurrency_limit(),
        }
    }
}

/// Concept list from `concepts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptsFile {
    /// Concepts in evaluation order.
    pub concepts: Vec<ConceptConfiguration>,
}
