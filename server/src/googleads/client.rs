//! Google Ads REST client
//!
//! Thin plumbing around the `googleAds:search` endpoint: authenticated
//! requests, page-token passthrough, and retry on transient failures.
//! Rows come back untouched as [`RawRow`]s; all interpretation happens in
//! the domain layer.

use serde::Deserialize;
use serde_json::{Value as JsonValue, json};

use crate::core::config::GoogleAdsConfig;
use crate::core::constants::{
    GOOGLE_ADS_API_BASE, GOOGLE_ADS_API_VERSION, HTTP_TIMEOUT_SECS, MAX_SEARCH_PAGES,
};
use crate::core::secret::Secret;
use crate::domain::reports::RawRow;
use crate::utils::retry::{DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS, retry_with_backoff};

use super::auth::TokenProvider;
use super::error::GoogleAdsError;

/// One page of a search response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub results: Vec<RawRow>,
    pub next_page_token: Option<String>,
}

/// Campaign/ad listing entry returned by the thin listing helpers
#[derive(Debug, Clone, serde::Serialize)]
pub struct EntitySummary {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
}

pub struct GoogleAdsClient {
    http: reqwest::Client,
    auth: TokenProvider,
    developer_token: Secret,
    login_customer_id: Option<String>,
    base_url: String,
}

impl GoogleAdsClient {
    pub fn new(config: &GoogleAdsConfig) -> Result<Self, GoogleAdsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        let auth = TokenProvider::new(
            http.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
            config.refresh_token.clone(),
        );

        Ok(Self {
            http,
            auth,
            developer_token: config.developer_token.clone(),
            login_customer_id: config.login_customer_id.clone(),
            base_url: format!("{}/{}", GOOGLE_ADS_API_BASE, GOOGLE_ADS_API_VERSION),
        })
    }

    /// Run one search page for a customer. The page token, when present,
    /// is passed through untouched; cursor bookkeeping stays upstream.
    pub async fn search(
        &self,
        customer_id: &str,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<SearchResponse, GoogleAdsError> {
        let customer_id = sanitize_customer_id(customer_id);
        let url = format!("{}/customers/{}/googleAds:search", self.base_url, customer_id);

        let mut body = json!({ "query": query });
        if let Some(token) = page_token {
            body["pageToken"] = json!(token);
        }

        let value = retry_with_backoff(
            DEFAULT_MAX_ATTEMPTS,
            DEFAULT_BASE_DELAY_MS,
            GoogleAdsError::is_transient,
            || self.post_json(&url, &body),
        )
        .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Follow `nextPageToken` until the result set is exhausted.
    pub async fn search_all(
        &self,
        customer_id: &str,
        query: &str,
    ) -> Result<Vec<RawRow>, GoogleAdsError> {
        let mut rows = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 0..MAX_SEARCH_PAGES {
            let response = self
                .search(customer_id, query, page_token.as_deref())
                .await?;
            rows.extend(response.results);

            match response.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(rows),
            }

            if page + 1 == MAX_SEARCH_PAGES {
                tracing::warn!(
                    customer_id,
                    pages = MAX_SEARCH_PAGES,
                    "Search page cap reached, truncating result set"
                );
            }
        }

        Ok(rows)
    }

    /// Customer resource names the authenticated user can access
    pub async fn list_accessible_customers(&self) -> Result<Vec<String>, GoogleAdsError> {
        let url = format!("{}/customers:listAccessibleCustomers", self.base_url);

        let value = retry_with_backoff(
            DEFAULT_MAX_ATTEMPTS,
            DEFAULT_BASE_DELAY_MS,
            GoogleAdsError::is_transient,
            || self.get_json(&url),
        )
        .await?;

        #[derive(Default, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        struct ListResponse {
            resource_names: Vec<String>,
        }

        let response: ListResponse = serde_json::from_value(value)?;
        Ok(response.resource_names)
    }

    /// Campaigns for a customer: id, name, status.
    pub async fn list_campaigns(
        &self,
        customer_id: &str,
    ) -> Result<Vec<EntitySummary>, GoogleAdsError> {
        let query = "SELECT campaign.id, campaign.name, campaign.status \
                     FROM campaign ORDER BY campaign.id";
        let rows = self.search_all(customer_id, query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.campaign.as_ref())
            .map(|campaign| EntitySummary {
                id: json_id(&campaign.id),
                name: campaign.name.clone(),
                status: campaign.status.clone(),
            })
            .collect())
    }

    /// Ads for a customer, optionally scoped to one campaign.
    pub async fn list_ads(
        &self,
        customer_id: &str,
        campaign_id: Option<&str>,
    ) -> Result<Vec<EntitySummary>, GoogleAdsError> {
        let mut query = String::from(
            "SELECT ad_group_ad.ad.id, ad_group_ad.ad.name, ad_group_ad.status \
             FROM ad_group_ad",
        );
        if let Some(id) = campaign_id {
            // Ids are numeric; strip anything else rather than interpolating
            let id: String = id.chars().filter(char::is_ascii_digit).collect();
            if !id.is_empty() {
                query.push_str(&format!(" WHERE campaign.id = {}", id));
            }
        }

        let rows = self.search_all(customer_id, &query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.ad_group_ad.as_ref())
            .map(|aga| EntitySummary {
                id: aga.ad.as_ref().map(|ad| json_id(&ad.id)).unwrap_or_default(),
                name: aga.ad.as_ref().and_then(|ad| ad.name.clone()),
                status: aga.status.clone(),
            })
            .collect())
    }

    async fn post_json(&self, url: &str, body: &JsonValue) -> Result<JsonValue, GoogleAdsError> {
        let request = self.http.post(url).json(body);
        self.execute(request).await
    }

    async fn get_json(&self, url: &str) -> Result<JsonValue, GoogleAdsError> {
        self.execute(self.http.get(url)).await
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<JsonValue, GoogleAdsError> {
        let token = self.auth.access_token().await?;

        let mut request = request
            .bearer_auth(token)
            .header("developer-token", self.developer_token.expose());
        if let Some(login_id) = &self.login_customer_id {
            request = request.header("login-customer-id", login_id);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleAdsError::Api {
                status: status.as_u16(),
                message: extract_api_error(&body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Strip formatting dashes from customer ids ("123-456-7890" → "1234567890")
pub fn sanitize_customer_id(id: &str) -> String {
    id.chars().filter(|c| *c != '-').collect()
}

fn json_id(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Pull the human-readable message out of an API error body, falling back
/// to the raw (truncated) body when it is not the expected shape.
fn extract_api_error(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<JsonValue>(body) {
        if let Some(message) = value["error"]["message"].as_str() {
            return message.to_string();
        }
    }
    let mut message = body.to_string();
    message.truncate(500);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_customer_id() {
        assert_eq!(sanitize_customer_id("123-456-7890"), "1234567890");
        assert_eq!(sanitize_customer_id("1234567890"), "1234567890");
        assert_eq!(sanitize_customer_id(""), "");
    }

    #[test]
    fn test_extract_api_error_structured() {
        let body = r#"{"error": {"code": 403, "message": "The developer token is not approved.", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(
            extract_api_error(body),
            "The developer token is not approved."
        );
    }

    #[test]
    fn test_extract_api_error_unstructured() {
        assert_eq!(extract_api_error("plain failure"), "plain failure");
    }

    #[test]
    fn test_search_response_deserializes_page_token() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results": [{"customer": {"id": "1"}}], "nextPageToken": "abc"}"#,
        )
        .unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.next_page_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_search_response_deserializes_empty_object() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
        assert!(response.next_page_token.is_none());
    }
}
