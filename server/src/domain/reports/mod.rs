//! Report normalization pipeline
//!
//! Converts raw Google Ads search rows into canonical, platform-agnostic
//! reporting rows. The pipeline is pure and stateless: each row transforms
//! independently, so mapping is safe to parallelize and needs no
//! coordination.
//!
//! Data flow: raw API row → [`metrics::normalize_metrics`] (coerce +
//! convert + derive ratios) → [`mapper::map_to_standardized_row`] (merge
//! with identity/dimension fields) → [`StandardizedRow`].
//!
//! # Core Types
//!
//! - [`RawRow`] / [`RawMetrics`] - wire shapes with optional, loosely-typed fields
//! - [`NormalizedMetrics`] - five base quantities plus five zero-guarded ratios
//! - [`StandardizedRow`] - the canonical platform-tagged reporting row
//! - [`ReportLevel`] - account / campaign / ad granularity

pub mod mapper;
pub mod metrics;
pub mod query;
pub mod types;

pub use mapper::{map_rows_to_standardized, map_to_standardized_row};
pub use metrics::{format_metrics, normalize_metrics, round_metric};
pub use query::{DatePreset, DateRange, build_field_selection, build_query, build_resource_name};
pub use types::{NormalizedMetrics, RawMetrics, RawRow, ReportLevel, StandardizedRow};

#[cfg(test)]
mod tests;
