//! Report artifact configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Where and in which formats report artifacts are written.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ReportConfig {
    /// Directory for artifacts whose paths are given relative.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Artifact set to produce (csv, html, or both).
    #[validate(custom(function = validation::validate_report_format))]
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_output_dir() -> PathBuf {
    ".".into()
}

fn default_format() -> String {
    "csv".into()
}

impl ReportConfig {
    pub fn wants_csv(&self) -> bool {
        matches!(self.format.as_str(), "csv" | "both")
    }

    pub fn wants_html(&self) -> bool {
        matches!(self.format.as_str(), "html" | "both")
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: default_format(),
        }
    }
}
