//! Calculation logic for the payroll engine.
//!
//! This module contains the building blocks of one employee's calculation: daily
//! hour aggregation, night-hour detection across midnight, hour categorization
//! into normal, overtime and Sunday/holiday buckets, piecework productivity,
//! basic salary with day multipliers, the weekly rest-day (dominical) rule, and
//! the ordered concept pipeline that turns them into pay lines.

mod assembler;
mod basic_salary;
mod calendar_lookup;
mod concept_registry;
mod context;
mod deduction_concepts;
mod dominical;
mod engine;
mod hours_aggregator;
mod hours_categorizer;
mod income_concepts;
mod night_hours;
mod pipeline;
mod productivity;

use rust_decimal::{Decimal, RoundingStrategy};

pub use assembler::{ENGINE_VERSION, assemble_payroll_detail};
pub use basic_salary::{
    BasicSalaryResult, DEFAULT_MONTH_CALCULATION_DAYS, DayPay, calculate_basic_salary,
    daily_rate, day_multiplier,
};
pub use calendar_lookup::{CalendarIndex, CalendarLookup, is_sunday};
pub use concept_registry::{ConceptCalculator, ConceptOutcome, ConceptRegistry};
pub use context::{CalculationParameters, DayFlags, PayrollContext};
pub use deduction_concepts::{DIAG_NO_HEALTH_SCHEME, health_plan, percentage_of_income};
pub use dominical::{DominicalSummary, DominicalWeek, evaluate_dominical_weeks};
pub use engine::{DIAG_CALENDAR_DATA_MISSING, PayrollInputs, compute_payroll_detail};
pub use hours_aggregator::{DailyHours, DailyHoursMap, aggregate_daily_hours};
pub use hours_categorizer::{DEFAULT_TIER1_HOURS, categorize_hours};
pub use income_concepts::{
    DIAG_MISSING_CONCEPT_VALUE, DIAG_MISSING_SALARY, DIAG_NO_PIECEWORK, DIAG_NO_WORKED_DATES,
};
pub use night_hours::{
    MAX_NIGHT_MINUTES, NIGHT_END_MINUTE, NIGHT_START_MINUTE, calculate_night_hours,
    night_minutes,
};
pub use pipeline::{
    DIAG_NO_RETIREMENT_SCHEME, DIAG_UNKNOWN_CONCEPT, PipelineOutput, run_concept_pipeline,
};
pub use productivity::{
    DIAG_LABOR_NOT_FOUND, DIAG_PIECEWORK_TERMS_MISSING, DailyProductivity, FULL_PRODUCTIVITY,
    ProductivitySummary, evaluate_productivity, excess_units, productivity_percent,
};

/// Rounds a monetary amount or hour figure to 2 decimals, half away from zero.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate to 4 decimals, half away from zero.
pub(crate) fn round4(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
