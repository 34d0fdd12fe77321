//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod concept;
mod employee;
mod pay_period;
mod payroll_detail;

pub use attendance::{AttendanceEntry, Labor, LaborCatalog, PieceworkTerms};
pub use concept::{ConceptCategory, ConceptConfiguration};
pub use employee::Employee;
pub use pay_period::{CalendarDay, PayPeriod, PeriodWeek};
pub use payroll_detail::{
    AuditStep, AuditTrace, ConceptLine, DayDetail, Diagnostic, HourBreakdown, PayrollDetail,
};
