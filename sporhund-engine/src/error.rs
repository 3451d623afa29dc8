use sporhund_capture::CaptureError;
use sporhund_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
