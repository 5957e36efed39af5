//! # bidgate-server
//!
//! The bidgate HTTP API. Each route validates its input, calls the record
//! store, billing provider, or analysis workflow, and reshapes the answer
//! into the types in `bidgate_core::responses`.
//!
//! Upstream failures are handled once, at the route, according to
//! [`policy::Endpoint::failure_policy`].

pub mod error;
pub mod policy;
mod routes;
pub mod schema;
pub mod state;

use anyhow::Context;
use bidgate_config::BidgateConfig;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;

pub use routes::router;
pub use state::AppState;

/// Bind, serve, and return after a graceful shutdown.
///
/// # Errors
///
/// Fails if upstream clients cannot be built or the address cannot be bound.
pub async fn serve(config: &BidgateConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state, config.server.max_upload_bytes);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, "bidgate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("bidgate stopped");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(error) = ctrl_c().await {
            tracing::error!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received SIGTERM, shutting down");
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }
}
