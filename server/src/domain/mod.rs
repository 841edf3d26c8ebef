//! Domain logic for ads reporting
//!
//! - `reports` - metrics normalization, row mapping, and GAQL assembly

pub mod reports;

pub use reports::{ReportLevel, StandardizedRow};
