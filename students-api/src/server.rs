//! Serving the router with a bounded graceful shutdown.

use std::future::Future;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tracing::{info, warn};

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_DEADLINE: Duration = Duration::from_secs(5);

/// Errors from running the server.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("server IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] JoinError),

    #[error("graceful shutdown exceeded {0:?}")]
    DeadlineExceeded(Duration),
}

/// Serves `router` on `listener` until `shutdown` resolves, then drains
/// in-flight requests for at most `deadline`.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    deadline: Duration,
) -> Result<(), ServeError>
where
    F: Future<Output = ()>,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        res = &mut server => {
            // Server stopped on its own before any signal.
            return Ok(res??);
        }
        () = shutdown => {
            info!(deadline = ?deadline, "shutdown requested, draining connections");
        }
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(deadline, server).await {
        Ok(res) => {
            res??;
            info!("server stopped");
            Ok(())
        }
        Err(_) => {
            warn!(deadline = ?deadline, "in-flight requests did not finish in time");
            Err(ServeError::DeadlineExceeded(deadline))
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        () = terminate => info!("received SIGTERM"),
    }
}
