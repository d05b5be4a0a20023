//! Dockdash: a small operational dashboard for containers.
//!
//! This library lists containers whose name matches a configured filter, derives a
//! point-in-time CPU and memory snapshot for each from the engine's stats, and toggles a
//! container between running and stopped on request.
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod container;
pub mod dashboard;
pub mod discovery;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod runtime;

/// Runs the dashboard.
///
/// Reads the configuration, connects to the container engine once, and serves the HTTP
/// dashboard until Ctrl-C or SIGTERM is received.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid configuration (e.g., an unparsable `DASHBOARD_LISTEN_ADDR`).
/// - Failure to construct the container engine client.
/// - Failure to bind the listen address.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    log::debug!("Configuration: {:?}", config);

    let runtime = runtime::DockerRuntime::connect()?;
    let dashboard = Arc::new(dashboard::Dashboard::new(runtime, config.name_filter));
    let state = api::AppState::new(dashboard, config.title);

    api::APIServer::new(state)
        .listen(config.listen_addr, shutdown_signal())
        .await?;
    log::info!("Dashboard stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                log::error!("failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutting down");
}
