use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Deserialize, JsonSchema)]
pub struct GetPerformanceInput {
    /// Customer id, with or without dashes (e.g. "123-456-7890")
    pub customer_id: String,
    /// Reporting level: account, campaign, or ad (default: account)
    pub level: Option<String>,
    /// Named range: today, yesterday, last_7_days, last_14_days,
    /// last_30_days, this_month, last_month (default: last_30_days)
    pub date_preset: Option<String>,
    /// Trailing window in days, resolved in the configured timezone
    /// (overrides date_preset)
    pub last_days: Option<u32>,
    /// Custom range start, YYYY-MM-DD (requires end_date, overrides presets)
    pub start_date: Option<String>,
    /// Custom range end, YYYY-MM-DD
    pub end_date: Option<String>,
    /// Break rows out per day
    pub segment_by_date: Option<bool>,
    /// Max rows (default: 1000)
    pub limit: Option<u32>,
}

#[derive(Deserialize, JsonSchema)]
pub struct ListCampaignsInput {
    pub customer_id: String,
}

#[derive(Deserialize, JsonSchema)]
pub struct ListAdsInput {
    pub customer_id: String,
    /// Restrict to one campaign
    pub campaign_id: Option<String>,
}
