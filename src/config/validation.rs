//! Configuration validation.
//!
//! # Responsibilities
//! - Turn raw environment strings into a typed [`ServiceConfig`]
//! - Validate value ranges (port in 1..=65535, known environment names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RawConfig → Result<ServiceConfig, Vec<ConfigIssue>>

use std::net::IpAddr;

use crate::config::schema::{Environment, ServiceConfig, DEFAULT_PORT};

/// Unparsed values as found in the environment. `None` means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    pub node_env: Option<String>,
    pub port: Option<String>,
    pub host: Option<String>,
}

/// A single invalid configuration field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ConfigIssue {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigIssue {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

/// Validate every field, collecting all issues before giving up.
pub fn validate(raw: &RawConfig) -> Result<ServiceConfig, Vec<ConfigIssue>> {
    let defaults = ServiceConfig::default();
    let mut issues = Vec::new();

    let environment = match raw.node_env.as_deref() {
        None => Environment::default(),
        Some(value) => value.parse().unwrap_or_else(|()| {
            issues.push(ConfigIssue::new(
                "NODE_ENV",
                format!("expected one of development, production, test, got {value:?}"),
            ));
            Environment::default()
        }),
    };

    let port = match raw.port.as_deref() {
        None => DEFAULT_PORT,
        Some(value) => validate_port(value).unwrap_or_else(|reason| {
            issues.push(ConfigIssue::new("PORT", reason));
            DEFAULT_PORT
        }),
    };

    let host = match raw.host.as_deref() {
        None => defaults.host,
        Some(value) => value.trim().parse::<IpAddr>().unwrap_or_else(|_| {
            issues.push(ConfigIssue::new("HOST", format!("expected an IP address, got {value:?}")));
            defaults.host
        }),
    };

    if issues.is_empty() {
        Ok(ServiceConfig { environment, host, port })
    } else {
        Err(issues)
    }
}

fn validate_port(value: &str) -> Result<u16, String> {
    let number: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("expected a positive integer, got {value:?}"))?;
    match u16::try_from(number) {
        Ok(0) => Err("must be greater than 0".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("must be between 1 and 65535, got {number}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(node_env: Option<&str>, port: Option<&str>, host: Option<&str>) -> RawConfig {
        RawConfig {
            node_env: node_env.map(String::from),
            port: port.map(String::from),
            host: host.map(String::from),
        }
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = validate(&RawConfig::default()).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn explicit_values_are_applied() {
        let config = validate(&raw(Some("production"), Some("8080"), Some("127.0.0.1"))).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let issues = validate(&raw(Some("staging"), Some("abc"), Some("nowhere"))).unwrap_err();
        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["NODE_ENV", "PORT", "HOST"]);
        assert_eq!(issues[1].to_string(), "PORT: expected a positive integer, got \"abc\"");
    }

    #[test]
    fn port_must_be_positive_and_in_range() {
        assert!(validate(&raw(None, Some("0"), None)).is_err());
        assert!(validate(&raw(None, Some("-1"), None)).is_err());
        assert!(validate(&raw(None, Some(""), None)).is_err());
        let issues = validate(&raw(None, Some("70000"), None)).unwrap_err();
        assert_eq!(issues[0].reason, "must be between 1 and 65535, got 70000");
    }
}
