use anyhow::Result;
use tokio::signal;

/// Signals that can trigger shutdown.
enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

impl ShutdownSignal {
    fn name(&self) -> &'static str {
        match self {
            ShutdownSignal::CtrlC => "ctrl_c",
            #[cfg(unix)]
            ShutdownSignal::Sigterm => "sigterm",
        }
    }
}

/// Wait for Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    let received = tokio::select! {
        result = wait_ctrl_c() => result?,
        result = wait_sigterm() => result?,
    };

    tracing::info!(
        signal = received.name(),
        "Shutdown signal received, draining in-flight submissions"
    );
    Ok(())
}

/// Future suitable for `axum::serve(..).with_graceful_shutdown(..)`.
///
/// Falls back to plain Ctrl+C when the primary waiter fails.
pub async fn shutdown_signal() {
    if let Err(e) = wait_for_shutdown().await {
        tracing::warn!(error = %e, "shutdown: signal waiter failed, falling back to ctrl_c()");
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "shutdown: ctrl_c() failed, stopping immediately");
        }
    }
}

async fn wait_ctrl_c() -> Result<ShutdownSignal> {
    signal::ctrl_c().await.map_err(|e| {
        tracing::error!(%e, "Error handling Ctrl+C signal");
        e
    })?;
    Ok(ShutdownSignal::CtrlC)
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    let mut signal_handler =
        signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(|e| {
            tracing::error!(%e, "Failed to install SIGTERM handler");
            e
        })?;
    signal_handler.recv().await;
    Ok(ShutdownSignal::Sigterm)
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    std::future::pending::<Result<ShutdownSignal>>().await
}
