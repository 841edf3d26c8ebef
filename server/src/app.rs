//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::googleads::GoogleAdsClient;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub ads: Arc<GoogleAdsClient>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Check) => return Self::run_check(&cli_config).await,
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config)?;
        Self::start_server(app).await
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let ads = Arc::new(
            GoogleAdsClient::new(&config.google_ads)
                .context("Failed to initialize Google Ads client")?,
        );

        let shutdown = ShutdownService::new();
        shutdown.install_signal_handlers();

        Ok(Self {
            shutdown,
            config,
            ads,
        })
    }

    /// Verify credentials by listing accessible accounts, then exit
    async fn run_check(cli: &CliConfig) -> Result<()> {
        let app = Self::init(cli)?;

        let customers = app
            .ads
            .list_accessible_customers()
            .await
            .context("Credential check failed")?;

        println!("Credentials OK. Accessible accounts:");
        for resource_name in &customers {
            println!("  {}", resource_name);
        }
        if customers.is_empty() {
            println!("  (none)");
        }
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        let shutdown = app.shutdown.clone();

        let server = ApiServer::new(app);
        server.start().await?;

        shutdown.shutdown().await;
        Ok(())
    }
}
