//! Google Ads API collaborator
//!
//! Everything here is thin I/O plumbing: OAuth token exchange, the search
//! endpoint with page-token passthrough, and retry on transient upstream
//! failures. No interpretation of row contents happens at this layer.

pub mod auth;
pub mod client;
pub mod error;

pub use client::{EntitySummary, GoogleAdsClient, SearchResponse};
pub use error::GoogleAdsError;
