//! Report formatting and display
//!
//! - `report` - aligned, optionally colored listing for humans
//! - `json` - machine-readable forms (module name array, full entries)

mod config;
mod json;
mod report;

// Re-export public types and functions
pub use config::OutputConfig;
pub use json::{module_names_json, print_json};
pub use report::ReportFormatter;
