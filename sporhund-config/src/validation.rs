//! Custom validation functions for configuration.

use ipnetwork::IpNetwork;
use validator::ValidationError;

/// Reject whitelist entries that would suppress every source.
pub fn validate_cidr_list(cidrs: &[IpNetwork]) -> Result<(), ValidationError> {
    if cidrs.iter().any(|network| network.prefix() == 0) {
        return Err(ValidationError::new("unspecified_network"));
    }
    Ok(())
}

/// Validate the report artifact format.
pub fn validate_report_format(format: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(csv|html|both)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(format) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_report_format"))
    }
}

/// Validate the fallback log filter level.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid =
        ["trace", "debug", "info", "warn", "error"].contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
