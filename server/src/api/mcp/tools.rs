use std::sync::Arc;

use chrono::NaiveDate;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo, ToolsCapability,
};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::core::config::ReportingConfig;
use crate::core::constants::DEFAULT_REPORT_LIMIT;
use crate::domain::reports::{
    DatePreset, DateRange, ReportLevel, build_query, map_rows_to_standardized,
};
use crate::googleads::GoogleAdsClient;

use super::types::*;

type McpError = rmcp::model::ErrorData;

#[derive(Clone)]
pub struct McpServer {
    ads: Arc<GoogleAdsClient>,
    reporting: ReportingConfig,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(ads: Arc<GoogleAdsClient>, reporting: ReportingConfig) -> Self {
        Self {
            ads,
            reporting,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "AdLens".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

const INSTRUCTIONS: &str = r#"AdLens - query Google Ads performance data as normalized reporting rows.

WORKFLOW:
1. list_accounts to discover accessible customer accounts
2. list_campaigns / list_ads to enumerate entities for a customer
3. get_performance for metrics at account, campaign, or ad level

KEY CONCEPTS:
- Rows are platform-agnostic: ids/names per level, currency, and ten metrics
  (spend, impressions, clicks, conversions, conversion_value, ctr, cpc, cpm,
  cpa, roas)
- Monetary values are whole currency units (micros already converted)
- Ratios are zero when their divisor is zero (paused campaigns report 0, not
  errors)
- adset_id/adset_name are always null: Google Ads has no ad-set level, the
  fields exist for cross-platform schema parity

TIPS:
- Start with get_performance(level="campaign") for an overview
- segment_by_date=true adds a date field and one row per entity per day
- Use last_days for trailing windows, start_date/end_date for exact ranges"#;

#[tool_router]
impl McpServer {
    #[tool(
        description = "Performance report at account, campaign, or ad level. Returns normalized rows: identity fields, currency, spend, impressions, clicks, conversions, conversion_value, ctr, cpc, cpm, cpa, roas."
    )]
    async fn get_performance(
        &self,
        Parameters(input): Parameters<GetPerformanceInput>,
    ) -> Result<CallToolResult, McpError> {
        let level = input
            .level
            .as_deref()
            .map(ReportLevel::parse_or_default)
            .unwrap_or_default();
        let date_range = resolve_date_range(&input, &self.reporting)?;
        let segment_by_date = input.segment_by_date.unwrap_or(false);
        let limit = clamp_limit(input.limit);

        let query = build_query(level, &date_range, segment_by_date, Some(limit));
        tracing::debug!(customer_id = %input.customer_id, %level, "Running performance query");

        let rows = self
            .ads
            .search_all(&input.customer_id, &query)
            .await
            .map_err(mcp_err)?;
        let standardized = map_rows_to_standardized(&rows, &self.reporting.default_currency);

        ok_json(&serde_json::json!({
            "level": level.to_string(),
            "rows": standardized,
            "total": standardized.len(),
        }))
    }

    #[tool(description = "List customer accounts accessible with the configured credentials.")]
    async fn list_accounts(&self) -> Result<CallToolResult, McpError> {
        let accounts = self
            .ads
            .list_accessible_customers()
            .await
            .map_err(mcp_err)?;
        ok_json(&serde_json::json!({ "accounts": accounts, "total": accounts.len() }))
    }

    #[tool(description = "List campaigns for a customer: id, name, status.")]
    async fn list_campaigns(
        &self,
        Parameters(input): Parameters<ListCampaignsInput>,
    ) -> Result<CallToolResult, McpError> {
        let campaigns = self
            .ads
            .list_campaigns(&input.customer_id)
            .await
            .map_err(mcp_err)?;
        ok_json(&serde_json::json!({ "campaigns": campaigns, "total": campaigns.len() }))
    }

    #[tool(description = "List ads for a customer, optionally scoped to one campaign: id, name, status.")]
    async fn list_ads(
        &self,
        Parameters(input): Parameters<ListAdsInput>,
    ) -> Result<CallToolResult, McpError> {
        let ads = self
            .ads
            .list_ads(&input.customer_id, input.campaign_id.as_deref())
            .await
            .map_err(mcp_err)?;
        ok_json(&serde_json::json!({ "ads": ads, "total": ads.len() }))
    }
}

/// Resolve the date window with precedence: explicit start/end dates, then
/// last_days, then a named preset, then the default window.
fn resolve_date_range(
    input: &GetPerformanceInput,
    reporting: &ReportingConfig,
) -> Result<DateRange, McpError> {
    match (&input.start_date, &input.end_date) {
        (Some(start), Some(end)) => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            if start > end {
                return Err(McpError::invalid_params(
                    "start_date must not be after end_date",
                    None,
                ));
            }
            return Ok(DateRange::Between { start, end });
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(McpError::invalid_params(
                "start_date and end_date must be provided together",
                None,
            ));
        }
        (None, None) => {}
    }

    if let Some(days) = input.last_days {
        if days == 0 {
            return Err(McpError::invalid_params("last_days must be at least 1", None));
        }
        return Ok(DateRange::last_days(days, reporting.timezone));
    }

    if let Some(preset) = &input.date_preset {
        return DatePreset::parse(preset)
            .map(DateRange::Preset)
            .ok_or_else(|| {
                McpError::invalid_params(format!("unknown date_preset '{}'", preset), None)
            });
    }

    Ok(DateRange::default())
}

fn parse_date(s: &str) -> Result<NaiveDate, McpError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        McpError::invalid_params(format!("invalid date '{}', expected YYYY-MM-DD", s), None)
    })
}

fn ok_json(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string(value).map_err(mcp_err)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn mcp_err(e: impl std::fmt::Display) -> McpError {
    tracing::debug!(error = %e, "MCP tool error");
    McpError::internal_error(e.to_string(), None)
}

fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_REPORT_LIMIT).clamp(1, DEFAULT_REPORT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn reporting() -> ReportingConfig {
        ReportingConfig {
            default_currency: "USD".to_string(),
            timezone: Tz::UTC,
        }
    }

    fn input() -> GetPerformanceInput {
        GetPerformanceInput {
            customer_id: "123".into(),
            level: None,
            date_preset: None,
            last_days: None,
            start_date: None,
            end_date: None,
            segment_by_date: None,
            limit: None,
        }
    }

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(
            parse_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("06/01/2025").is_err());
        assert!(parse_date("garbage").is_err());
    }

    #[test]
    fn test_resolve_defaults_to_last_30_days() {
        let range = resolve_date_range(&input(), &reporting()).unwrap();
        assert_eq!(range, DateRange::Preset(DatePreset::Last30Days));
    }

    #[test]
    fn test_resolve_custom_dates_take_precedence() {
        let mut i = input();
        i.start_date = Some("2025-06-01".into());
        i.end_date = Some("2025-06-30".into());
        i.date_preset = Some("yesterday".into());
        i.last_days = Some(7);

        let range = resolve_date_range(&i, &reporting()).unwrap();
        assert!(matches!(range, DateRange::Between { .. }));
    }

    #[test]
    fn test_resolve_rejects_unpaired_dates() {
        let mut i = input();
        i.start_date = Some("2025-06-01".into());
        assert!(resolve_date_range(&i, &reporting()).is_err());
    }

    #[test]
    fn test_resolve_rejects_inverted_range() {
        let mut i = input();
        i.start_date = Some("2025-06-30".into());
        i.end_date = Some("2025-06-01".into());
        assert!(resolve_date_range(&i, &reporting()).is_err());
    }

    #[test]
    fn test_resolve_rejects_unknown_preset() {
        let mut i = input();
        i.date_preset = Some("fortnight".into());
        assert!(resolve_date_range(&i, &reporting()).is_err());
    }

    #[test]
    fn test_resolve_rejects_zero_last_days() {
        let mut i = input();
        i.last_days = Some(0);
        assert!(resolve_date_range(&i, &reporting()).is_err());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_REPORT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(10_000)), DEFAULT_REPORT_LIMIT);
    }

    #[test]
    fn test_ok_json_serializes() {
        let result = ok_json(&serde_json::json!({"key": "value"})).unwrap();
        assert!(!result.content.is_empty());
    }
}
