//! Bounded parallel payroll runs.
//!
//! Each employee is an independent unit of work. Calculations run on the blocking
//! pool, at most `concurrency_limit` at a time; a failed or panicking employee is
//! reported and never aborts the others.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::calculation::{ConceptRegistry, PayrollInputs, compute_payroll_detail};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEntry, Employee, PayrollDetail};

/// Employee id reported when a worker task is lost before it could say which
/// employee it was calculating.
pub const UNKNOWN_EMPLOYEE: &str = "<unknown>";

/// One employee and the attendance prefetched for the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInput {
    /// The employee to calculate.
    pub employee: Employee,
    /// Attendance entries of the employee from the period's attendance window
    /// start (see [`crate::models::PayPeriod::attendance_window_start`]) to its end.
    pub attendance: Vec<AttendanceEntry>,
}

/// An employee whose calculation did not produce a detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFailure {
    /// The employee id.
    pub employee_id: String,
    /// What went wrong.
    pub message: String,
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollRunReport {
    /// Details of every successful employee, in completion order.
    pub details: Vec<PayrollDetail>,
    /// Employees that failed.
    pub failures: Vec<EmployeeFailure>,
    /// Sum of net pay over the successful details.
    pub total_net_pay: Decimal,
}

impl PayrollRunReport {
    /// Returns the detail of an employee, if it succeeded.
    pub fn detail_for(&self, employee_id: &str) -> Option<&PayrollDetail> {
        self.details.iter().find(|d| d.employee_id == employee_id)
    }
}

fn calculate_isolated(
    input: &EmployeeInput,
    shared: &PayrollInputs,
    registry: &ConceptRegistry,
) -> Result<PayrollDetail, String> {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        compute_payroll_detail(&input.employee, &input.attendance, shared, registry)
    }));

    match outcome {
        Ok(Ok(detail)) => Ok(detail),
        Ok(Err(e)) => Err(e.to_string()),
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(format!("calculation panicked: {}", reason))
        }
    }
}

/// Calculates every employee of a run with bounded parallelism.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfig`] when `concurrency_limit` is zero.
/// Per-employee errors are collected into [`PayrollRunReport::failures`].
///
/// # Example
///
/// ```no_run
/// use agro_payroll::batch::run_payroll_batch;
/// use agro_payroll::calculation::{CalendarIndex, ConceptRegistry};
/// use agro_payroll::config::ConfigLoader;
/// use agro_payroll::models::LaborCatalog;
/// use chrono::NaiveDate;
/// use std::sync::Arc;
///
/// # async fn run() -> agro_payroll::error::EngineResult<()> {
/// let loader = ConfigLoader::load("./config/default")?;
/// let parameters = loader.parameters(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
///     13,
///     26,
/// )?;
/// let shared = Arc::new(loader.payroll_inputs(parameters, CalendarIndex::default(), LaborCatalog::new()));
///
/// let report = run_payroll_batch(
///     vec![],
///     shared,
///     Arc::new(ConceptRegistry::standard()),
///     loader.settings().concurrency_limit,
/// )
/// .await?;
/// println!("net pay: {}", report.total_net_pay);
/// # Ok(())
/// # }
/// ```
pub async fn run_payroll_batch(
    inputs: Vec<EmployeeInput>,
    shared: Arc<PayrollInputs>,
    registry: Arc<ConceptRegistry>,
    concurrency_limit: usize,
) -> EngineResult<PayrollRunReport> {
    if concurrency_limit == 0 {
        return Err(EngineError::InvalidConfig {
            message: "concurrency_limit must be greater than zero".to_string(),
        });
    }

    let employees = inputs.len();
    info!(employees, concurrency_limit, "payroll batch started");

    let semaphore = Arc::new(Semaphore::new(concurrency_limit));
    let mut tasks = JoinSet::new();

    for input in inputs {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| EngineError::CalculationError {
                message: format!("batch semaphore closed: {}", e),
            })?;
        let shared = Arc::clone(&shared);
        let registry = Arc::clone(&registry);

        tasks.spawn_blocking(move || {
            let _permit = permit;
            let employee_id = input.employee.id.clone();
            (employee_id, calculate_isolated(&input, &shared, &registry))
        });
    }

    let mut report = PayrollRunReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(detail))) => {
                report.total_net_pay += detail.net_pay;
                report.details.push(detail);
            }
            Ok((employee_id, Err(message))) => {
                warn!(employee_id = %employee_id, error = %message, "employee calculation failed");
                report.failures.push(EmployeeFailure {
                    employee_id,
                    message,
                });
            }
            Err(e) => {
                warn!(error = %e, "payroll worker task lost");
                report.failures.push(EmployeeFailure {
                    employee_id: UNKNOWN_EMPLOYEE.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        succeeded = report.details.len(),
        failed = report.failures.len(),
        total_net_pay = %report.total_net_pay,
        "payroll batch finished"
    );

    Ok(report)
}
