use std::net::SocketAddr;

use push_trigger::config::AppConfig;
use push_trigger::domain::trigger::TriggerRegistry;
use push_trigger::utils::logging::init_logging;
use push_trigger::{app, AppState};

#[tokio::main]
async fn main() {
    // 1. environment
    dotenvy::dotenv().ok();

    // 2. logging
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let _guard = init_logging(&log_dir);

    // 3. configuration and trigger rules
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let registry = match TriggerRegistry::from_config(&config) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load trigger rules");
            std::process::exit(1);
        }
    };

    // 4. serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = app(AppState::new(config, registry));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
    }
}
