//! Payroll calculation engine for agricultural workforces.
//!
//! This crate turns daily attendance records and harvest productivity counts into
//! an itemized pay statement per employee and period: hour categorization, night
//! hours, piecework excess, weekly rest-day (dominical) pay and an ordered pipeline
//! of pay concepts.

#![warn(missing_docs)]

pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
