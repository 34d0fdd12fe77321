//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only malformed or inconsistent inputs surface as an [`EngineError`]; missing
//! optional configuration degrades to a zero amount plus a diagnostic instead.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use agro_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a precondition of the engine.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// The period bounds are inverted.
    #[error("Invalid period: end {end} is before start {start}")]
    InvalidPeriod {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// An attendance entry was malformed or belonged to another employee.
    #[error("Invalid attendance for employee '{employee_id}': {message}")]
    InvalidAttendance {
        /// The employee being calculated.
        employee_id: String,
        /// A description of the problem.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
