//! AdLens server library
//!
//! Normalizes Google Ads reporting data into platform-agnostic rows and
//! serves it over an MCP tool surface.

pub mod api;
pub mod app;
pub mod core;
pub mod domain;
pub mod googleads;
pub mod utils;
