//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;
pub mod secret;
pub mod shutdown;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands};
pub use config::{AppConfig, GoogleAdsConfig, ReportingConfig, ServerConfig};
pub use secret::Secret;
pub use shutdown::ShutdownService;
