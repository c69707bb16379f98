pub mod dump;
pub mod latest;
pub mod selection;
pub mod summary;
pub mod viewer;

use std::future::Future;

use tokio::signal;

use crate::error::{InspectError, InspectResult};

pub const ERROR_MARKER: &str = "❌";

/// Runs `command` to completion, or returns `None` once Ctrl+C arrives.
pub async fn run_until_interrupted<F, T>(command: F) -> Option<InspectResult<T>>
where
    F: Future<Output = InspectResult<T>>,
{
    tokio::select! {
        result = command => Some(result),
        _ = shutdown_signal() => None,
    }
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }

    tracing::info!("Interrupt received");
}

pub fn report_failure(err: &InspectError) {
    tracing::error!(error = %err, kind = ?err.kind(), "Command failed");
    eprintln!("{ERROR_MARKER} Error: {}", err.diagnostic());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_until_interrupted_returns_result() {
        let result = run_until_interrupted(async { Ok::<_, InspectError>(7) }).await;
        assert_eq!(result.unwrap().unwrap(), 7);
    }
}
