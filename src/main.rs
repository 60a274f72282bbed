use std::sync::Arc;

use flightfinder_api::{routes, AirportProvider, Config, Error, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse_args();

    // RUST_LOG wins; otherwise debug in development, info elsewhere.
    let default_level = if config.environment.is_development() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let provider = Arc::new(AirportProvider::sample());
    info!(
        environment = %config.environment,
        airports = provider.len(),
        cors_origins = ?config.cors_origins,
        "starting flightfinder-api",
    );

    let app = routes::app(&config, provider);
    Server::bind(config.addr).await?.serve(app).await
}
