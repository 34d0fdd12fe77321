//! Configuration loading and management for the payroll engine.
//!
//! This module loads engine settings (daily normal hours, the monthly salary
//! divisor, overtime rates and the batch concurrency limit) and the ordered list
//! of pay concepts from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use agro_payroll::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("{} concepts configured", loader.concepts().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ConceptsFile, EngineSettings, OvertimeRates};
