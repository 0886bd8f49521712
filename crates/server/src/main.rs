//! careline-server: healthcare concierge HTTP server binary entrypoint.

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use careline_server::config::Config;
use careline_server::session::{SESSION_TTL, SessionStore};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();

    // Log startup info
    if config.anthropic_api_key.is_some() {
        tracing::info!("Anthropic API key configured, chat and pharmacy enabled");
    } else {
        tracing::warn!("ANTHROPIC_API_KEY not set, chat and pharmacy disabled");
    }
    if config.fleet_backend_url.is_some() {
        tracing::info!("Fleet backend configured");
    } else {
        tracing::warn!("FLEET_BACKEND_URL not set, serving the built-in demo fleet");
    }
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    // Conversation store and its expiry sweeper
    let sessions = SessionStore::new(SESSION_TTL);
    SessionStore::spawn_sweeper(sessions.clone());

    // Build application
    let app = careline_server::build_app(sessions, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting Careline server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
