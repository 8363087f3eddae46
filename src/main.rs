//! Command Relay
//!
//! HTTP service tracking registered clients and the join-room commands
//! addressed on their behalf.

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use command_relay::{store, ApiServer, ApiServerConfig, RegistryService, Result, StoreBackend};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Command Relay - client registry and join-room command log
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listening port
    #[arg(long, env = "PORT", default_value_t = command_relay::api::DEFAULT_PORT)]
    port: u16,

    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Store backend
    #[arg(long, env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Sqlite)]
    store: StoreBackend,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting Command Relay");
    info!("  Version: {}", command_relay::VERSION);
    info!("  Listen: {}:{}", args.host, args.port);
    info!("  Store: {}", args.store);

    let config = ApiServerConfig::from_host_port(&args.host, args.port)?;

    let registry = RegistryService::new(store::open(args.store)?);
    info!("Registry initialized ({} backend)", registry.backend());

    let server = std::sync::Arc::new(ApiServer::new(config, registry));

    let signal_server = server.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal_server.shutdown(),
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    server.run().await?;

    info!("Shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    for directive in ["hyper=warn", "tower=warn", "tower_http=info", "axum=info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
