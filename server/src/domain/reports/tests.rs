//! End-to-end tests for the report normalization pipeline

use super::*;
use serde_json::json;

fn parse_row(value: serde_json::Value) -> RawRow {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_full_pipeline_campaign_row() {
    // String-encoded monetary fields alongside plain numbers, as returned
    // by the REST search endpoint
    let row = parse_row(json!({
        "customer": {
            "id": "4861039205",
            "descriptiveName": "Globex Retail",
            "currencyCode": "USD"
        },
        "campaign": { "id": "2210476190", "name": "Summer Sale", "status": "ENABLED" },
        "metrics": {
            "costMicros": "120500000",
            "impressions": 25_000,
            "clicks": 430,
            "conversions": 12,
            "conversionsValue": "1640000000"
        }
    }));

    let mapped = map_to_standardized_row(&row, "USD");

    assert_eq!(mapped.platform, "google");
    assert_eq!(mapped.account_id, "4861039205");
    assert_eq!(mapped.account_name.as_deref(), Some("Globex Retail"));
    assert_eq!(mapped.campaign_id.as_deref(), Some("2210476190"));
    assert_eq!(mapped.campaign_name.as_deref(), Some("Summer Sale"));
    assert_eq!(mapped.currency, "USD");
    assert_eq!(mapped.date, None);

    assert_eq!(mapped.metrics.spend, 120.5);
    assert_eq!(mapped.metrics.impressions, 25_000.0);
    assert_eq!(mapped.metrics.clicks, 430.0);
    assert_eq!(mapped.metrics.conversions, 12.0);
    assert_eq!(mapped.metrics.conversion_value, 1640.0);
    assert_eq!(mapped.metrics.ctr, 0.0172);
    assert_eq!(mapped.metrics.cpc, 0.28);
    assert_eq!(mapped.metrics.cpm, 4.82);
    assert_eq!(mapped.metrics.cpa, 10.04);
    assert_eq!(mapped.metrics.roas, 13.61);
}

#[test]
fn test_full_pipeline_ad_level_with_date_segment() {
    let row = parse_row(json!({
        "customer": { "id": "111", "currencyCode": "EUR" },
        "campaign": { "id": "222", "name": "Brand" },
        "adGroupAd": { "ad": { "id": "333", "name": "Responsive Search Ad" } },
        "segments": { "date": "2025-08-15" },
        "metrics": { "impressions": "1000", "clicks": "17" }
    }));

    let mapped = map_to_standardized_row(&row, "USD");

    assert_eq!(mapped.ad_id.as_deref(), Some("333"));
    assert_eq!(mapped.ad_name.as_deref(), Some("Responsive Search Ad"));
    assert_eq!(mapped.date.as_deref(), Some("2025-08-15"));
    assert_eq!(mapped.currency, "EUR");
    assert_eq!(mapped.metrics.ctr, 0.017);
    // No spend reported: every spend-derived ratio is guarded to zero
    assert_eq!(mapped.metrics.cpc, 0.0);
    assert_eq!(mapped.metrics.cpm, 0.0);
    assert_eq!(mapped.metrics.roas, 0.0);
}

#[test]
fn test_standardized_row_serializes_flat() {
    let row = parse_row(json!({
        "customer": { "id": "1", "currencyCode": "USD" },
        "metrics": { "costMicros": 1_000_000 }
    }));
    let value = serde_json::to_value(map_to_standardized_row(&row, "USD")).unwrap();

    // Metric fields are flattened onto the row object itself
    assert_eq!(value["platform"], "google");
    assert_eq!(value["spend"], 1.0);
    assert_eq!(value["ctr"], 0.0);
    assert_eq!(value["adset_id"], serde_json::Value::Null);
    assert!(value.get("metrics").is_none());
}

#[test]
fn test_query_output_round_trips_through_mapper() {
    // A row carrying exactly the fields build_field_selection asks for at
    // ad level maps with no unmapped leftovers and no missing fields
    let selection = build_field_selection(ReportLevel::Ad);
    assert!(selection.contains(&"customer.currency_code"));
    assert!(selection.contains(&"metrics.conversions_value"));

    let row = parse_row(json!({
        "customer": { "id": "9", "descriptiveName": "n", "currencyCode": "USD" },
        "campaign": { "id": "8", "name": "c", "status": "PAUSED" },
        "adGroupAd": { "ad": { "id": "7", "name": "a" } },
        "metrics": {
            "costMicros": "0",
            "impressions": "0",
            "clicks": "0",
            "conversions": 0,
            "conversionsValue": "0"
        }
    }));
    let mapped = map_to_standardized_row(&row, "USD");
    assert_eq!(mapped.metrics, NormalizedMetrics::default());
    assert_eq!(mapped.campaign_id.as_deref(), Some("8"));
    assert_eq!(mapped.ad_id.as_deref(), Some("7"));
}
