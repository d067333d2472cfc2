//! Configuration loading from the environment.

use std::env::{self, VarError};

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate, ConfigIssue, RawConfig};

pub const NODE_ENV: &str = "NODE_ENV";
pub const PORT: &str = "PORT";
pub const HOST: &str = "HOST";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("invalid environment variables: {}", join_issues(.0))]
    Validation(Vec<ConfigIssue>),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load `.env` (if present) and validate the process environment.
///
/// Variables already set in the process take precedence over the file.
pub fn load() -> Result<ServiceConfig, ConfigError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(ConfigError::DotEnv(e));
        }
    }

    let vars = [NODE_ENV, PORT, HOST].into_iter().filter_map(|key| match env::var(key) {
        Ok(value) => Some((key.to_string(), value)),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            Some((key.to_string(), raw.to_string_lossy().into_owned()))
        }
    });

    from_vars(vars)
}

/// Build a config from explicit key/value pairs. Unknown keys are ignored.
pub fn from_vars<I, K, V>(vars: I) -> Result<ServiceConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut raw = RawConfig::default();
    for (key, value) in vars {
        match key.as_ref() {
            NODE_ENV => raw.node_env = Some(value.into()),
            PORT => raw.port = Some(value.into()),
            HOST => raw.host = Some(value.into()),
            _ => {}
        }
    }

    validate(&raw).map_err(ConfigError::Validation)
}
