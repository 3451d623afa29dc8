//! Reverse address resolution configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Resolution is best-effort and off by default; a capture full of public
/// addresses can otherwise spend most of a run waiting on PTR lookups.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct ResolverConfig {
    /// Annotate rendered reports with resolved hostnames.
    #[serde(default)]
    pub enabled: bool,
}
