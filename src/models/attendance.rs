//! Attendance (daily work record) and labor models.
//!
//! Attendance entries are read-only snapshots captured elsewhere; the engine only
//! aggregates them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Labor catalogue keyed by labor id.
pub type LaborCatalog = HashMap<String, Labor>;

/// A single recorded attendance (work assignment) for an employee.
///
/// # Example
///
/// ```
/// use agro_payroll::models::AttendanceEntry;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let entry = AttendanceEntry {
///     id: "att_001".to_string(),
///     employee_id: "W-0001".to_string(),
///     created_at: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(6, 5, 0).unwrap(),
///     start_time: NaiveTime::from_hms_opt(6, 0, 0),
///     end_time: NaiveTime::from_hms_opt(14, 0, 0),
///     paid_hours: Some(Decimal::new(8, 0)),
///     productivity_count: None,
///     labor_id: Some("weeding".to_string()),
/// };
/// assert_eq!(entry.work_date(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Identifier of the attendance record.
    pub id: String,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// When the record was opened; the work date is derived from it.
    pub created_at: NaiveDateTime,
    /// Shift start time of day, if recorded.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Shift end time of day, if recorded. May be earlier than the start when
    /// the shift crosses midnight.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Hours paid for this record. Records without paid hours are ignored.
    #[serde(default)]
    pub paid_hours: Option<Decimal>,
    /// Units harvested, set at shift close for piecework labor only.
    #[serde(default)]
    pub productivity_count: Option<u32>,
    /// The labor performed during this shift.
    #[serde(default)]
    pub labor_id: Option<String>,
}

impl AttendanceEntry {
    /// Returns the calendar date the work is attributed to.
    pub fn work_date(&self) -> NaiveDate {
        self.created_at.date()
    }

    /// Returns the start/end pair when both ends of the shift were recorded.
    pub fn shift_times(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.start_time.zip(self.end_time)
    }
}

/// Piecework parameters of a labor, present only when both are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceworkTerms {
    /// Units that must be produced per day to reach 100% productivity.
    pub min_task_requirement: u32,
    /// Price paid per unit above the minimum.
    pub base_price: Decimal,
}

/// A kind of field work, possibly compensated by output (piecework).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labor {
    /// Identifier of the labor.
    pub id: String,
    /// Display name (e.g. "Blueberry harvest").
    pub name: String,
    /// Whether the labor is compensated by output quantity.
    #[serde(default)]
    pub is_piecework: bool,
    /// Minimum units per day for piecework labor.
    #[serde(default)]
    pub min_task_requirement: Option<u32>,
    /// Price per unit for piecework labor.
    #[serde(default)]
    pub base_price: Option<Decimal>,
}

impl Labor {
    /// Returns the piecework terms if this labor is piecework with a positive
    /// minimum requirement and a positive base price.
    ///
    /// # Example
    ///
    /// ```
    /// use agro_payroll::models::Labor;
    /// use rust_decimal::Decimal;
    ///
    /// let harvest = Labor {
    ///     id: "harvest".to_string(),
    ///     name: "Harvest".to_string(),
    ///     is_piecework: true,
    ///     min_task_requirement: Some(25),
    ///     base_price: Some(Decimal::new(150, 2)),
    /// };
    /// assert_eq!(harvest.piecework_terms().unwrap().min_task_requirement, 25);
    ///
    /// let incomplete = Labor { base_price: None, ..harvest };
    /// assert!(incomplete.piecework_terms().is_none());
    /// ```
    pub fn piecework_terms(&self) -> Option<PieceworkTerms> {
        if !self.is_piecework {
            return None;
        }
        match (self.min_task_requirement, self.base_price) {
            (Some(min), Some(price)) if min > 0 && price > Decimal::ZERO => Some(PieceworkTerms {
                min_task_requirement: min,
                base_price: price,
            }),
            _ => None,
        }
    }
}
