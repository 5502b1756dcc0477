//! Type generator HTTP gateway binary.

use clap::Parser;
use pgmeta_gateway::{create_router, AppState, Args, GatewayConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line args
    let args = Args::parse();
    let config = GatewayConfig::from(&args);

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    info!(
        listen = %config.listen_addr,
        body_limit = config.body_limit,
        excluded_schemas = ?config.default_excluded_schemas,
        "Starting type generator gateway"
    );

    let listen_addr = config.listen_addr.clone();
    let app = create_router(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("Gateway listening on {}", listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
