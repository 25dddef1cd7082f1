use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fpl_moments::aggregate::build_report;
use fpl_moments::api::state::AppState;
use fpl_moments::cache::TtlCache;
use fpl_moments::config::AppConfig;
use fpl_moments::fetch::{FplClient, SeasonDataSource};
use fpl_moments::limit::RateLimiter;

#[derive(Parser)]
#[command(name = "fpl-moments")]
#[command(about = "Season wrapped stats for Fantasy Premier League managers")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch and print one manager's season report
    Wrapped {
        /// Manager (entry) id
        manager_id: u64,
    },
}

fn load_config(path: &str) -> Result<AppConfig> {
    let path = PathBuf::from(path);
    if path.exists() {
        Ok(AppConfig::from_file(&path)?)
    } else {
        Ok(AppConfig::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting fpl-moments v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let client = FplClient::new(&config.upstream)?;
            let state = AppState {
                source: Arc::new(client),
                report_cache: Arc::new(TtlCache::new(Duration::from_secs(
                    config.cache.ttl_seconds,
                ))),
                limiter: Arc::new(RateLimiter::new(
                    Duration::from_secs(config.rate_limit.window_seconds),
                    config.rate_limit.max_requests,
                )),
                config: Arc::new(config.clone()),
            };

            let app = fpl_moments::api::build_router(state);
            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Wrapped { manager_id } => {
            let client = FplClient::new(&config.upstream)?;
            let data = client.season(manager_id).await?;
            let report = build_report(
                &data.summary,
                &data.history,
                &data.picks,
                &data.transfers,
                &data.bootstrap,
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
