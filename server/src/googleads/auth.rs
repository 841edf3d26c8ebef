//! OAuth2 access-token management
//!
//! Exchanges the configured refresh token for short-lived access tokens and
//! caches them until shortly before expiry. The cache is the only shared
//! mutable state in the client; the lock is never held across an await.

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Deserialize;

use crate::core::constants::{OAUTH_TOKEN_URL, TOKEN_REFRESH_MARGIN_SECS};
use crate::core::secret::Secret;

use super::error::GoogleAdsError;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

pub struct TokenProvider {
    http: reqwest::Client,
    client_id: String,
    client_secret: Secret,
    refresh_token: Secret,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        client_id: String,
        client_secret: Secret,
        refresh_token: Secret,
    ) -> Self {
        Self {
            http,
            client_id,
            client_secret,
            refresh_token,
            cached: RwLock::new(None),
        }
    }

    /// Current access token, refreshed from the token endpoint when the
    /// cached one is missing or about to expire.
    pub async fn access_token(&self) -> Result<String, GoogleAdsError> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }
        self.refresh().await
    }

    fn cached_token(&self) -> Option<String> {
        let guard = self.cached.read();
        guard
            .as_ref()
            .filter(|t| t.expires_at > Instant::now())
            .map(|t| t.access_token.clone())
    }

    fn store_token(&self, access_token: String, expires_in_secs: u64) {
        let margin = Duration::from_secs(TOKEN_REFRESH_MARGIN_SECS);
        let lifetime = Duration::from_secs(expires_in_secs);
        let expires_at = Instant::now() + lifetime.saturating_sub(margin);
        *self.cached.write() = Some(CachedToken {
            access_token,
            expires_at,
        });
    }

    async fn refresh(&self) -> Result<String, GoogleAdsError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose()),
            ("refresh_token", self.refresh_token.expose()),
        ];

        let response = self
            .http
            .post(OAUTH_TOKEN_URL)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies from the token endpoint carry no credentials,
            // only error/error_description fields
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleAdsError::Auth(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(expires_in = token.expires_in, "Access token refreshed");
        self.store_token(token.access_token.clone(), token.expires_in);
        Ok(token.access_token)
    }
}
