//! GAQL query assembly
//!
//! Derives the field selection and queryable resource for a reporting level
//! and assembles the final search query text. Field lists form a strict
//! superset chain: ad ⊇ campaign ⊇ account (metric fields are constant
//! across levels).

use chrono::NaiveDate;
use chrono_tz::Tz;

use super::types::ReportLevel;

/// Upstream field identifiers per selection group
pub mod fields {
    pub const ACCOUNT: &[&str] = &[
        "customer.id",
        "customer.descriptive_name",
        "customer.currency_code",
    ];

    pub const CAMPAIGN: &[&str] = &["campaign.id", "campaign.name", "campaign.status"];

    pub const AD: &[&str] = &["ad_group_ad.ad.id", "ad_group_ad.ad.name"];

    pub const METRICS: &[&str] = &[
        "metrics.cost_micros",
        "metrics.impressions",
        "metrics.clicks",
        "metrics.conversions",
        "metrics.conversions_value",
    ];

    /// Date segment, appended only when a daily breakdown is requested
    pub const DATE_SEGMENT: &str = "segments.date";
}

/// Build the ordered query field list for a reporting level.
///
/// Account identity and the raw metric fields are always selected; campaign
/// identity joins at campaign and ad level, ad identity at ad level only.
pub fn build_field_selection(level: ReportLevel) -> Vec<&'static str> {
    let mut selection: Vec<&'static str> = fields::ACCOUNT.to_vec();
    if matches!(level, ReportLevel::Campaign | ReportLevel::Ad) {
        selection.extend_from_slice(fields::CAMPAIGN);
    }
    if level == ReportLevel::Ad {
        selection.extend_from_slice(fields::AD);
    }
    selection.extend_from_slice(fields::METRICS);
    selection
}

/// Map a reporting level to the queryable resource name.
pub fn build_resource_name(level: ReportLevel) -> &'static str {
    match level {
        ReportLevel::Account => "customer",
        ReportLevel::Campaign => "campaign",
        ReportLevel::Ad => "ad_group_ad",
    }
}

// ============================================================================
// DATE RANGES
// ============================================================================

/// Named date-range presets understood by the upstream query language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    Yesterday,
    Last7Days,
    Last14Days,
    #[default]
    Last30Days,
    ThisMonth,
    LastMonth,
}

impl DatePreset {
    /// Parse a preset name; `None` for anything unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "last_7_days" => Some(Self::Last7Days),
            "last_14_days" => Some(Self::Last14Days),
            "last_30_days" => Some(Self::Last30Days),
            "this_month" => Some(Self::ThisMonth),
            "last_month" => Some(Self::LastMonth),
            _ => None,
        }
    }

    /// The GAQL `DURING` literal for this preset
    pub fn gaql(self) -> &'static str {
        match self {
            Self::Today => "TODAY",
            Self::Yesterday => "YESTERDAY",
            Self::Last7Days => "LAST_7_DAYS",
            Self::Last14Days => "LAST_14_DAYS",
            Self::Last30Days => "LAST_30_DAYS",
            Self::ThisMonth => "THIS_MONTH",
            Self::LastMonth => "LAST_MONTH",
        }
    }
}

/// Date window for a report query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    Preset(DatePreset),
    Between { start: NaiveDate, end: NaiveDate },
}

impl Default for DateRange {
    fn default() -> Self {
        Self::Preset(DatePreset::default())
    }
}

impl DateRange {
    /// A custom window covering the last `days` days inclusive of today,
    /// evaluated in the configured reporting timezone.
    pub fn last_days(days: u32, tz: Tz) -> Self {
        let today = chrono::Utc::now().with_timezone(&tz).date_naive();
        let span = i64::from(days.max(1)) - 1;
        Self::Between {
            start: today - chrono::Duration::days(span),
            end: today,
        }
    }

    /// Render the `segments.date` condition for the WHERE clause
    fn condition(&self) -> String {
        match self {
            Self::Preset(preset) => format!("segments.date DURING {}", preset.gaql()),
            Self::Between { start, end } => format!(
                "segments.date BETWEEN '{}' AND '{}'",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

// ============================================================================
// QUERY TEXT
// ============================================================================

/// Assemble the GAQL text for a performance report.
///
/// `segment_by_date` adds `segments.date` to the selection, producing one
/// row per entity per day instead of one aggregate row per entity.
pub fn build_query(
    level: ReportLevel,
    date_range: &DateRange,
    segment_by_date: bool,
    limit: Option<u32>,
) -> String {
    let mut selection = build_field_selection(level);
    if segment_by_date {
        selection.push(fields::DATE_SEGMENT);
    }

    let mut query = format!(
        "SELECT {} FROM {} WHERE {}",
        selection.join(", "),
        build_resource_name(level),
        date_range.condition()
    );

    if let Some(limit) = limit {
        query.push_str(&format!(" LIMIT {}", limit));
    }

    query
}
