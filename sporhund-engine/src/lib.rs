//! # Sporhund Engine
//!
//! Coordinates one batch transformation: capture file in, analysis report
//! out. The aggregation and detection passes run in parallel over the same
//! immutable record set; the only blocking stage is the initial bulk read.

mod error;
mod runtime;

pub use error::AnalysisError;
pub use runtime::{AnalysisReport, AnalysisRuntime};
