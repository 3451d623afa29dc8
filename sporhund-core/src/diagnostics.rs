//! Injected diagnostics sink.
//!
//! Components that report operator-facing conditions receive the sink
//! explicitly instead of talking to a process-global logger. The analysis
//! passes themselves stay pure functions of their inputs; only the
//! orchestration layer speaks to the sink.

pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sink that discards everything. Library default and test stand-in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
