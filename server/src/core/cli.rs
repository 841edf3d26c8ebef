use clap::{Parser, Subcommand};

use super::constants::{ENV_DEFAULT_CURRENCY, ENV_HOST, ENV_LOGIN_CUSTOMER_ID, ENV_PORT, ENV_TIMEZONE};

#[derive(Parser)]
#[command(name = "adlens")]
#[command(version, about = "Google Ads reporting MCP server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Fallback ISO 4217 currency for accounts that do not declare one
    #[arg(long, global = true, env = ENV_DEFAULT_CURRENCY)]
    pub default_currency: Option<String>,

    /// IANA timezone used to resolve relative date windows
    #[arg(long, global = true, env = ENV_TIMEZONE)]
    pub timezone: Option<String>,

    /// Manager account id used as login-customer-id header
    #[arg(long, global = true, env = ENV_LOGIN_CUSTOMER_ID)]
    pub login_customer_id: Option<String>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default)
    Start,
    /// Verify credentials by listing accessible accounts, then exit
    Check,
}

/// Values parsed from the command line, merged into AppConfig
#[derive(Debug, Default, Clone)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub default_currency: Option<String>,
    pub timezone: Option<String>,
    pub login_customer_id: Option<String>,
}

pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        default_currency: cli.default_currency,
        timezone: cli.timezone,
        login_customer_id: cli.login_customer_id,
    };
    (config, cli.command)
}
