use tokio::io::BufReader;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use humidity_api::config::PollerConfig;
use humidity_api::poller::{self, render, HumidityClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, the dashboard owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,humidity_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PollerConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Configuration loaded");

    let client = HumidityClient::new(&config)?;
    poller::run(
        &client,
        config.poll_interval,
        BufReader::new(tokio::io::stdin()),
        shutdown_signal(),
        |dashboard| print!("\x1b[2J\x1b[H{}", render::render(dashboard)),
    )
    .await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down...");
}
