use crate::Result;
use std::future::Future;
use tokio::signal::unix::{signal, SignalKind};
use tracing::debug;

/// Installs SIGTERM and SIGINT handlers and returns a future resolving on the
/// first of either.
pub fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    let mut sig_term = signal(SignalKind::terminate())?;
    let mut sig_int = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sig_term.recv() => debug!("Received SIGTERM"),
            _ = sig_int.recv() => debug!("Received SIGINT"),
        }
    })
}
