//! Report row types
//!
//! Raw shapes mirror the Google Ads REST search response (camelCase JSON,
//! int64 metrics serialized as strings). Normalized/standardized shapes are
//! the platform-agnostic output of the mapping pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Platform tag stamped on every standardized row
pub const PLATFORM: &str = "google";

// ============================================================================
// RAW INPUT SHAPES (Google Ads search response)
// ============================================================================

/// One result row from a `googleAds:search` response.
///
/// Every nested object is optional: which ones are present depends on the
/// reporting level the query was built for, and partially-populated rows
/// must never fail to deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRow {
    pub customer: Option<RawCustomer>,
    pub campaign: Option<RawCampaign>,
    pub ad_group_ad: Option<RawAdGroupAd>,
    pub metrics: Option<RawMetrics>,
    pub segments: Option<RawSegments>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCustomer {
    /// Customer id; string in REST responses, but tolerated as a number
    pub id: JsonValue,
    pub descriptive_name: Option<String>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCampaign {
    pub id: JsonValue,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAdGroupAd {
    pub ad: Option<RawAd>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAd {
    pub id: JsonValue,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSegments {
    /// Present only when the query segments by date (YYYY-MM-DD)
    pub date: Option<String>,
}

/// Raw metric fields as they arrive on the wire.
///
/// Each field may be a JSON number, a numeric string (the common case for
/// int64 fields), null, or absent entirely. Coercion to `f64` happens in
/// [`super::metrics`]; absent and unparsable are both treated as zero there.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMetrics {
    pub cost_micros: JsonValue,
    pub impressions: JsonValue,
    pub clicks: JsonValue,
    pub conversions: JsonValue,
    pub conversions_value: JsonValue,
}

// ============================================================================
// NORMALIZED OUTPUT SHAPES
// ============================================================================

/// Fully-computed metric record: five base quantities plus five derived
/// ratios, every field finite. Currency fields are whole currency units
/// (micros already divided out).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NormalizedMetrics {
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub conversions: f64,
    pub conversion_value: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub cpa: f64,
    pub roas: f64,
}

/// Canonical, platform-tagged reporting row.
///
/// Identifier fields default to empty strings, name/date fields to `None`;
/// the adset pair is always `None` (Google Ads has no ad-set level, the pair
/// exists for cross-platform schema parity) and the attribution pair is
/// reserved for future extraction. Metric fields carry display-rounded
/// values, see [`super::metrics::format_metrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardizedRow {
    pub platform: &'static str,
    pub account_id: String,
    pub account_name: Option<String>,
    pub date: Option<String>,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    pub adset_id: Option<String>,
    pub adset_name: Option<String>,
    pub ad_id: Option<String>,
    pub ad_name: Option<String>,
    pub currency: String,
    pub attribution_model: Option<String>,
    pub attribution_window: Option<String>,
    #[serde(flatten)]
    pub metrics: NormalizedMetrics,
}

// ============================================================================
// REPORTING LEVEL
// ============================================================================

/// Reporting granularity: which identity dimensions a query groups by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    #[default]
    Account,
    Campaign,
    Ad,
}

impl ReportLevel {
    /// Unrecognized input falls back to account level
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "campaign" => Self::Campaign,
            "ad" => Self::Ad,
            _ => Self::Account,
        }
    }
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Campaign => write!(f, "campaign"),
            Self::Ad => write!(f, "ad"),
        }
    }
}
