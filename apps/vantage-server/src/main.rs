//! Vantage Server Binary
//!
//! Starts the portfolio dashboard server.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p vantage-server
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `APCA_API_KEY_ID`: Brokerage API key
//! - `APCA_API_SECRET_KEY`: Brokerage API secret
//!
//! ## Optional
//! - `VANTAGE_ENV`: PAPER | LIVE (default: PAPER)
//! - `APCA_API_BASE_URL`: explicit trading API endpoint override
//! - `HTTP_PORT`: HTTP server port (default: 8080)
//! - `DATA_DIR`: flat-file data directory (default: data)
//! - `STATIC_DIR`: browser asset directory (default: public)
//! - `TRADE_WINDOW_DAYS`: trade history lookback (default: 90)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use vantage_server::broker::AlpacaClient;
use vantage_server::config::ServerConfig;
use vantage_server::dashboard::DashboardService;
use vantage_server::data::FileStore;
use vantage_server::server::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting Vantage dashboard server");

    let config = ServerConfig::from_env()?;
    tracing::info!(
        environment = config.environment.as_str(),
        http_port = config.http_port,
        trade_window_days = config.trade_window_days,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    let broker = AlpacaClient::new(
        config.credentials.clone(),
        config.base_url.clone(),
        config.timeout,
    )?;
    let store = FileStore::new(config.data_dir.clone());
    let service = DashboardService::new(broker, store, config.trade_window_days);

    let state = AppState {
        service: Arc::new(service),
    };
    let app = create_router(state, &config.static_dir);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/dashboard");
    tracing::info!("  *    static assets from {}", config.static_dir.display());

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Dashboard server stopped");
    Ok(())
}

/// Load a .env file when present; absence is fine.
fn load_dotenv() {
    // Runs before tracing init so RUST_LOG from .env takes effect.
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with environment filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Resolve when the process receives a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
