//! Server configuration, read from the environment at startup.
//!
//! | Variable                       | Meaning                      | Default        |
//! |--------------------------------|------------------------------|----------------|
//! | `SECRET`                       | shared signing secret        | required       |
//! | `FOOSBOT_BIND`                 | listen address               | `0.0.0.0:9000` |
//! | `FOOSBOT_MAX_REQUEST_AGE_SECS` | signed-timestamp window      | off            |
//! | `FOOSBOT_MAX_BODY_BYTES`       | request body limit           | `65536`        |

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use foosbot_session::{SignatureVerifier, VerifierConfig};

pub const SECRET_VAR: &str = "SECRET";
pub const BIND_VAR: &str = "FOOSBOT_BIND";
pub const MAX_REQUEST_AGE_VAR: &str = "FOOSBOT_MAX_REQUEST_AGE_SECS";
pub const MAX_BODY_BYTES_VAR: &str = "FOOSBOT_MAX_BODY_BYTES";

const DEFAULT_BIND: &str = "0.0.0.0:9000";
/// Slash-command forms are a few hundred bytes.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Errors found while reading the configuration.
///
/// All of them are fatal to startup: the server never binds with a
/// half-valid config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    /// A variable is set but can't be parsed.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Everything the binary needs to start a server.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// The signing secret shared with the chat platform.
    pub secret: Vec<u8>,

    /// Freshness window for signed timestamps. `None` disables the check.
    pub max_request_age: Option<Duration>,

    /// Bodies larger than this fail with `BodyReadFailed`.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// [`ConfigError::Missing`] if `SECRET` is unset or empty,
    /// [`ConfigError::Invalid`] if any optional variable doesn't parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup` instead of the real
    /// environment. Tests use this to avoid mutating process state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_VAR)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing(SECRET_VAR))?;

        let bind = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind.parse().map_err(|e| ConfigError::Invalid {
            var: BIND_VAR,
            reason: format!("{bind:?}: {e}"),
        })?;

        let max_request_age = lookup(MAX_REQUEST_AGE_VAR)
            .map(|raw| parse_number::<u64>(MAX_REQUEST_AGE_VAR, &raw))
            .transpose()?
            .map(Duration::from_secs);

        let max_body_bytes = lookup(MAX_BODY_BYTES_VAR)
            .map(|raw| parse_number::<usize>(MAX_BODY_BYTES_VAR, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Ok(Self {
            bind_addr,
            secret: secret.into_bytes(),
            max_request_age,
            max_body_bytes,
        })
    }

    /// Builds the request verifier for this configuration.
    pub fn verifier(&self) -> SignatureVerifier {
        SignatureVerifier::with_config(
            self.secret.clone(),
            VerifierConfig {
                max_request_age: self.max_request_age,
            },
        )
    }
}

fn parse_number<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: format!("{raw:?}: {e}"),
    })
}

// Hand-written so the secret never ends up in a log line.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("secret", &"<redacted>")
            .field("max_request_age", &self.max_request_age)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Builds a config from a fixed set of variables.
    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_from_lookup_secret_only_uses_defaults() {
        let config = config_from(&[("SECRET", "s3cr3t")]).unwrap();
        assert_eq!(config.secret, b"s3cr3t");
        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_request_age, None);
        assert_eq!(config.max_body_bytes, 65536);
    }

    #[test]
    fn test_from_lookup_missing_secret_is_fatal() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SECRET")));
    }

    #[test]
    fn test_from_lookup_empty_secret_is_fatal() {
        let err = config_from(&[("SECRET", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_from_lookup_reads_optional_values() {
        let config = config_from(&[
            ("SECRET", "x"),
            ("FOOSBOT_BIND", "127.0.0.1:8088"),
            ("FOOSBOT_MAX_REQUEST_AGE_SECS", "300"),
            ("FOOSBOT_MAX_BODY_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8088);
        assert_eq!(config.max_request_age, Some(Duration::from_secs(300)));
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn test_from_lookup_invalid_values_are_errors() {
        let err = config_from(&[("SECRET", "x"), ("FOOSBOT_BIND", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FOOSBOT_BIND", .. }));

        let err = config_from(&[
            ("SECRET", "x"),
            ("FOOSBOT_MAX_REQUEST_AGE_SECS", "five minutes"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("FOOSBOT_MAX_REQUEST_AGE_SECS"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config_from(&[("SECRET", "hunter2")]).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
