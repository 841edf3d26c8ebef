//! Google Ads client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoogleAdsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token refresh failed: {0}")]
    Auth(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GoogleAdsError {
    /// Transient failures worth retrying: rate limits and server errors
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = GoogleAdsError::Api {
            status: 403,
            message: "developer token not approved".to_string(),
        };
        assert_eq!(err.to_string(), "API error 403: developer token not approved");
    }

    #[test]
    fn test_transient_classification() {
        let rate_limited = GoogleAdsError::Api {
            status: 429,
            message: "rate limit".into(),
        };
        let server = GoogleAdsError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        let denied = GoogleAdsError::Api {
            status: 403,
            message: "denied".into(),
        };
        let auth = GoogleAdsError::Auth("bad refresh token".into());

        assert!(rate_limited.is_transient());
        assert!(server.is_transient());
        assert!(!denied.is_transient());
        assert!(!auth.is_transient());
    }
}
