//! Graceful shutdown trigger for the HTTP server.

use std::future::Future;
use std::io;

/// Resolve once ctrl-c is received.
///
/// Pass to `axum::serve(..).with_graceful_shutdown`.
pub async fn shutdown_signal() {
    wait_for(tokio::signal::ctrl_c()).await;
}

/// Resolve when `signal` reports a shutdown request.
///
/// If the signal cannot be listened for, this never resolves: the server
/// keeps running instead of shutting down on startup.
pub async fn wait_for<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn received_signal_triggers_shutdown() {
        let signal = async { io::Result::Ok(()) };

        let result = tokio::time::timeout(Duration::from_millis(100), wait_for(signal)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn signal_listener_failure_keeps_server_running() {
        let failing = async { io::Result::<()>::Err(io::Error::other("no signal handler")) };

        let result = tokio::time::timeout(Duration::from_millis(100), wait_for(failing)).await;

        assert!(result.is_err());
    }
}
