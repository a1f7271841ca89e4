use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use latchkey_api::config::ServerConfig;
use latchkey_api::router::build_app_router;
use latchkey_api::state::AppState;
use latchkey_bridge::BridgeClient;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "latchkey_api=debug,latchkey_bridge=debug,latchkey_core=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        host = %config.host,
        port = config.port,
        bridge = %config.bridge.endpoint(),
        device_id = config.bridge.device_id(),
        "Loaded server configuration"
    );

    // --- Bridge client ---
    let bridge = Arc::new(BridgeClient::new(
        config.bridge.clone(),
        config.bridge_timeouts,
    ));

    // --- App state ---
    let state = match AppState::new(config.clone(), bridge) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Locale catalogs failed validation");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        default_locale = %state.locales.default_locale(),
        locales = ?state.locales.locales(),
        "Locales registered"
    );

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip: IpAddr = match config.host.parse() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
            return ExitCode::FAILURE;
        }
    };
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind to address");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Graceful shutdown complete");
    ExitCode::SUCCESS
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). In-flight requests,
/// including bridge calls already sent, are allowed to finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
