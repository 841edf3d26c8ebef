//! Metrics normalization
//!
//! Pure conversion from raw wire metrics to [`NormalizedMetrics`]: monetary
//! micro-units become whole currency units, count fields are coerced to
//! numbers, and the five derived ratios are computed with explicit
//! divisor-based zero guards.
//!
//! The whole module is a total function over its input: absent fields,
//! nulls, and unparsable strings all coerce to zero, never to an error.
//! A campaign with zero impressions or spend is a normal business state
//! (e.g. paused), so a zero divisor produces a `0` ratio rather than
//! NaN/Infinity.

use serde_json::Value as JsonValue;

use super::types::{NormalizedMetrics, RawMetrics};

/// Micro-units per whole currency unit (Google Ads monetary encoding)
const MICROS_PER_UNIT: f64 = 1_000_000.0;

// ============================================================================
// FIELD COERCION
// ============================================================================

/// Convert a monetary micro-unit value to whole currency units.
///
/// Accepts a JSON number, a numeric string (how the API serializes int64),
/// or null/absent. Strings are parsed as whole-number micros; anything
/// unparsable coerces to zero. Negative amounts pass through scaled.
pub fn micros_to_decimal(value: &JsonValue) -> f64 {
    let micros = match value {
        JsonValue::Number(n) => n.as_f64().unwrap_or(0.0),
        JsonValue::String(s) => s.trim().parse::<i64>().map(|v| v as f64).unwrap_or(0.0),
        _ => 0.0,
    };
    micros / MICROS_PER_UNIT
}

/// Coerce a count-like value to a number.
///
/// Same totality policy as [`micros_to_decimal`] but with general real
/// parsing, since attribution can report fractional conversions (e.g. 0.5).
pub fn to_number(value: &JsonValue) -> f64 {
    let n = match value {
        JsonValue::Number(n) => n.as_f64().unwrap_or(0.0),
        JsonValue::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    // Strings like "inf"/"NaN" parse but are not valid metric values
    if n.is_finite() { n } else { 0.0 }
}

// ============================================================================
// DERIVED RATIOS
// ============================================================================

/// Click-through rate: clicks / impressions
pub fn calculate_ctr(clicks: f64, impressions: f64) -> f64 {
    if impressions == 0.0 {
        return 0.0;
    }
    clicks / impressions
}

/// Cost per click: spend / clicks
pub fn calculate_cpc(spend: f64, clicks: f64) -> f64 {
    if clicks == 0.0 {
        return 0.0;
    }
    spend / clicks
}

/// Cost per mille: spend per thousand impressions
pub fn calculate_cpm(spend: f64, impressions: f64) -> f64 {
    if impressions == 0.0 {
        return 0.0;
    }
    spend * 1000.0 / impressions
}

/// Cost per acquisition: spend / conversions
pub fn calculate_cpa(spend: f64, conversions: f64) -> f64 {
    if conversions == 0.0 {
        return 0.0;
    }
    spend / conversions
}

/// Return on ad spend: conversion value / spend
pub fn calculate_roas(conversion_value: f64, spend: f64) -> f64 {
    if spend == 0.0 {
        return 0.0;
    }
    conversion_value / spend
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Normalize one raw metric record.
///
/// Converts the two monetary fields from micros, coerces the three count
/// fields, then computes all five derived ratios from the unrounded base
/// values. Never fails; an empty or fully-malformed input yields an
/// all-zero record.
pub fn normalize_metrics(raw: &RawMetrics) -> NormalizedMetrics {
    let spend = micros_to_decimal(&raw.cost_micros);
    let impressions = to_number(&raw.impressions);
    let clicks = to_number(&raw.clicks);
    let conversions = to_number(&raw.conversions);
    let conversion_value = micros_to_decimal(&raw.conversions_value);

    NormalizedMetrics {
        spend,
        impressions,
        clicks,
        conversions,
        conversion_value,
        ctr: calculate_ctr(clicks, impressions),
        cpc: calculate_cpc(spend, clicks),
        cpm: calculate_cpm(spend, impressions),
        cpa: calculate_cpa(spend, conversions),
        roas: calculate_roas(conversion_value, spend),
    }
}

// ============================================================================
// DISPLAY ROUNDING
// ============================================================================

/// Round half-away-from-zero at the given decimal precision.
///
/// Display-only: derived ratios are always computed from unrounded base
/// values first, rounding is last-mile.
pub fn round_metric(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Produce a display copy of a normalized record.
///
/// CTR keeps 4 decimals (typical values like 0.0172 would be destroyed at
/// 2), counts round to whole units, everything currency-denominated rounds
/// to cents.
pub fn format_metrics(metrics: &NormalizedMetrics) -> NormalizedMetrics {
    NormalizedMetrics {
        spend: round_metric(metrics.spend, 2),
        impressions: round_metric(metrics.impressions, 0),
        clicks: round_metric(metrics.clicks, 0),
        conversions: round_metric(metrics.conversions, 2),
        conversion_value: round_metric(metrics.conversion_value, 2),
        ctr: round_metric(metrics.ctr, 4),
        cpc: round_metric(metrics.cpc, 2),
        cpm: round_metric(metrics.cpm, 2),
        cpa: round_metric(metrics.cpa, 2),
        roas: round_metric(metrics.roas, 2),
    }
}
