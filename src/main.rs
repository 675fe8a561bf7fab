//! Provider directory server entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use provider_directory::api::{create_router, AppState};
use provider_directory::config::Config;
use provider_directory::directory::DataStore;
use provider_directory::metrics;
use provider_directory::utils::shutdown_signal;

/// Healthcare provider directory.
#[derive(Parser, Debug)]
#[command(name = "provider-directory")]
#[command(about = "Serve a provider directory filtered by specialty, city and insurance plan")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Listen host (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the directory page and search API (default).
    Serve {
        /// Listen host (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load both datasets and print a summary.
    CheckData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration first, so RUST_LOG/LOG_JSON from .env apply to logging
    let config = Config::load().context("Configuration load failed")?;

    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::Serve { host, port }) => cmd_serve(config, host, port).await,
        Some(Command::CheckData) => cmd_check_data(&config),
        None => cmd_serve(config, args.host, args.port).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("provider_directory=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if config.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

/// Load the datasets and serve HTTP until shutdown.
async fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    info!(
        providers = %config.providers_path.display(),
        plans = %config.plans_path.display(),
        "Loading datasets..."
    );
    let store = DataStore::from_config(&config).map_err(|e| {
        error!("Startup failed: {}", e);
        e
    })?;

    let handle = metrics::install_recorder().context("Metrics recorder install failed")?;
    let mut app_state = AppState::new(store).with_metrics(handle);
    if config.static_dir.is_dir() {
        app_state = app_state.with_static_dir(&config.static_dir);
    } else {
        warn!(
            "Static directory {} not found; page script will not be served",
            config.static_dir.display()
        );
    }
    let router = create_router(app_state);

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Load both datasets and print what the page would offer.
fn cmd_check_data(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PROVIDER DIRECTORY - DATA CHECK");
    println!("======================================================================");

    print!("Loading datasets... ");
    let store = match DataStore::from_config(config) {
        Ok(store) => {
            println!("OK");
            store
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Dataset load failed"));
        }
    };

    let options = store.filter_options();
    println!("----------------------------------------------------------------------");
    println!("  Providers:   {}", store.providers().len());
    println!("  Plans:       {}", store.plans().len());
    println!("  Specialties: {}", options.specialties.join(", "));
    println!("  Cities:      {}", options.cities.join(", "));
    println!("======================================================================");

    Ok(())
}
