//! Failure reporting.
//!
//! Every failed call is handed to a [`DiagnosticSink`] before the error is
//! returned to the caller. Reporting is fire-and-forget and cannot change the
//! result of the call.

use crate::error::Error;

/// Receives a record of each failed request.
pub trait DiagnosticSink: Send + Sync {
    /// Record a failure. Must not block.
    fn report(&self, message: &str, error: Option<&Error>);
}

/// Default sink: emits a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str, error: Option<&Error>) {
        match error {
            Some(err) => tracing::error!(
                status = err.status_code(),
                error = %err,
                "{}",
                message
            ),
            None => tracing::error!("{}", message),
        }
    }
}
