//! Report output for a monitoring run.
//!
//! - [`csv_export`] — one `<organization>_high_severity_licenses.csv` per organization with findings.
//! - [`terminal`] — progress spinner, aggregate total and the per-organization summary table.

pub mod csv_export;
pub mod terminal;
