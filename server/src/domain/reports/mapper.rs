//! Row field mapping
//!
//! Assembles [`StandardizedRow`]s from raw search rows. Every nested access
//! tolerates a missing parent or leaf: identifiers default to empty strings,
//! names and dates to `None`. Mapping is pure and row-independent.

use serde_json::Value as JsonValue;

use super::metrics::{format_metrics, normalize_metrics};
use super::types::{PLATFORM, RawMetrics, RawRow, StandardizedRow};

/// Coerce a raw id value to a string identifier.
///
/// Ids arrive as strings in REST responses but are tolerated as numbers;
/// anything else yields the empty-string default.
fn id_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Map one raw row to a standardized row.
///
/// Currency resolves from the row's own customer when declared, else the
/// caller-supplied default. Metrics are normalized and then display-rounded;
/// the row does not retain full-precision values. The adset pair is always
/// `None` (no ad-set level on this platform) and the attribution pair is not
/// sourced from this row shape.
pub fn map_to_standardized_row(row: &RawRow, default_currency: &str) -> StandardizedRow {
    let customer = row.customer.as_ref();
    let campaign = row.campaign.as_ref();
    let ad = row.ad_group_ad.as_ref().and_then(|aga| aga.ad.as_ref());

    let currency = customer
        .and_then(|c| c.currency_code.clone())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| default_currency.to_string());

    let raw_metrics = row.metrics.clone().unwrap_or_else(RawMetrics::default);
    let metrics = format_metrics(&normalize_metrics(&raw_metrics));

    StandardizedRow {
        platform: PLATFORM,
        account_id: customer.map(|c| id_string(&c.id)).unwrap_or_default(),
        account_name: customer.and_then(|c| c.descriptive_name.clone()),
        date: row.segments.as_ref().and_then(|s| s.date.clone()),
        campaign_id: campaign.map(|c| id_string(&c.id)),
        campaign_name: campaign.and_then(|c| c.name.clone()),
        adset_id: None,
        adset_name: None,
        ad_id: ad.map(|a| id_string(&a.id)),
        ad_name: ad.and_then(|a| a.name.clone()),
        currency,
        attribution_model: None,
        attribution_window: None,
        metrics,
    }
}

/// Map a sequence of raw rows, order-preserving, no cross-row state.
pub fn map_rows_to_standardized(rows: &[RawRow], default_currency: &str) -> Vec<StandardizedRow> {
    rows.iter()
        .map(|row| map_to_standardized_row(row, default_currency))
        .collect()
}
