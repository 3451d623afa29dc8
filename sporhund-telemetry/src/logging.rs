//! Structured logging with tracing.

use sporhund_core::Diagnostics;
use tracing_subscriber::{fmt, EnvFilter};

pub struct EventLogger;

impl EventLogger {
    /// Install the global fmt subscriber. `RUST_LOG` wins over the
    /// configured fallback filter.
    pub fn init(fallback: &str) {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
            )
            .with_target(false)
            .init()
    }
}

/// Diagnostics sink forwarding to the tracing macros.
///
/// This is the production implementation of the injected sink: components
/// hold the trait object, only the binary decides it talks to tracing.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}
