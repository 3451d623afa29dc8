//! Error types for capture reading.

use std::path::PathBuf;

use thiserror::Error;

/// A capture that cannot be opened or read is fatal to the whole run;
/// nothing partial is produced.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open capture file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: pcap::Error,
    },

    #[error("failed to read frame from capture: {0}")]
    Read(#[from] pcap::Error),
}
