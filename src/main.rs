use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reservation_gateway::config::loader;
use reservation_gateway::GatewayServer;

#[tokio::main]
async fn main() {
    // Optional .env file for local development.
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservation_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("reservation-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match loader::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        environment = %config.environment.name,
        allowed_origins = config.cors.allowed_origins.len(),
        "configuration loaded"
    );

    let server = GatewayServer::new(config);
    if let Err(err) = server.run().await {
        tracing::error!(error = %err, "gateway terminated with a fatal error");
        std::process::exit(1);
    }

    tracing::info!("shutdown complete");
}
