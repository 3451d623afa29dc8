//! # Sporhund Configuration System
//!
//! Hierarchical configuration for the analyzer: defaults, then YAML files,
//! then environment variables, validated before anything runs.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod detection;
mod error;
mod report;
mod resolver;
mod telemetry;
mod validation;

pub use detection::DetectionConfig;
pub use error::ConfigError;
pub use report::ReportConfig;
pub use resolver::ResolverConfig;
pub use telemetry::TelemetryConfig;

/// Top-level configuration container for all Sporhund components.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct SporhundConfig {
    /// Port-scan detection parameters.
    #[validate(nested)]
    pub detection: DetectionConfig,

    /// Reverse address resolution for rendered reports.
    #[validate(nested)]
    pub resolver: ResolverConfig,

    /// Report artifact parameters.
    #[validate(nested)]
    pub report: ReportConfig,

    /// Logging configuration.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl SporhundConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/sporhund.yaml` - base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - environment-specific overrides.
    /// 4. `SPORHUND_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(SporhundConfig::default()));

        if Path::new("config/sporhund.yaml").exists() {
            figment = figment.merge(Yaml::file("config/sporhund.yaml"));
        }

        if let Ok(env) = std::env::var("SPORHUND_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        figment
            .merge(Env::prefixed("SPORHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path, still honoring environment
    /// overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(SporhundConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("SPORHUND_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn full_config_validation() {
        let config = SporhundConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn environment_override() {
        // Key chosen to not collide with what the other tests assert on;
        // the test binary runs them in parallel against one environment.
        std::env::set_var("SPORHUND_TELEMETRY__LOG_LEVEL", "debug");
        let config = SporhundConfig::load().unwrap();
        assert_eq!(config.telemetry.log_level, "debug");
        std::env::remove_var("SPORHUND_TELEMETRY__LOG_LEVEL");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = SporhundConfig::load_from_path("no/such/config.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "detection:\n  port_scan_threshold: 7\nresolver:\n  enabled: true"
        )
        .unwrap();

        let config = SporhundConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.detection.port_scan_threshold, 7);
        assert!(config.resolver.enabled);
        // Untouched sections keep their defaults.
        assert_eq!(config.report.format, "csv");
    }

    #[test]
    fn invalid_report_format_fails_validation() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "report:\n  format: pdf").unwrap();

        let result = SporhundConfig::load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
