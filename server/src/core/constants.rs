//! Application-wide constants

// =============================================================================
// Application identity
// =============================================================================

pub const APP_NAME: &str = "AdLens";
pub const APP_NAME_LOWER: &str = "adlens";

// =============================================================================
// Server defaults
// =============================================================================

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8642;

/// Maximum time to wait for in-flight work during graceful shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Upstream API
// =============================================================================

pub const GOOGLE_ADS_API_BASE: &str = "https://googleads.googleapis.com";
pub const GOOGLE_ADS_API_VERSION: &str = "v17";

pub const OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refresh access tokens this many seconds before their reported expiry
pub const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;

/// Per-request timeout for upstream calls
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Hard cap on pages followed per search; each page holds up to 10k rows
/// upstream
pub const MAX_SEARCH_PAGES: u32 = 50;

// =============================================================================
// Reporting defaults
// =============================================================================

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Default row cap for MCP report responses
pub const DEFAULT_REPORT_LIMIT: u32 = 1000;

// =============================================================================
// Environment variables
// =============================================================================

pub const ENV_LOG: &str = "ADLENS_LOG";
pub const ENV_HOST: &str = "ADLENS_HOST";
pub const ENV_PORT: &str = "ADLENS_PORT";
pub const ENV_DEFAULT_CURRENCY: &str = "ADLENS_DEFAULT_CURRENCY";
pub const ENV_TIMEZONE: &str = "ADLENS_TIMEZONE";

pub const ENV_DEVELOPER_TOKEN: &str = "GOOGLE_ADS_DEVELOPER_TOKEN";
pub const ENV_CLIENT_ID: &str = "GOOGLE_ADS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GOOGLE_ADS_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "GOOGLE_ADS_REFRESH_TOKEN";
pub const ENV_LOGIN_CUSTOMER_ID: &str = "GOOGLE_ADS_LOGIN_CUSTOMER_ID";
