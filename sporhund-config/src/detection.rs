//! Port-scan detection configuration.

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Detection parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DetectionConfig {
    /// Distinct destination ports a source must reach before it is flagged.
    /// Zero or negative flags every source with port-bearing traffic.
    #[serde(default = "default_port_scan_threshold")]
    pub port_scan_threshold: i64,

    /// Source networks whose findings are suppressed after detection.
    #[validate(custom(function = validation::validate_cidr_list))]
    #[serde(default)]
    pub whitelist: Vec<IpNetwork>,
}

fn default_port_scan_threshold() -> i64 {
    100
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            port_scan_threshold: default_port_scan_threshold(),
            whitelist: Vec::new(),
        }
    }
}
