//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the store backend is usable (root set, origin is plain http)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::str::FromStr;

use tracing::Level;

use crate::config::schema::{RouterConfig, StoreConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_bind_address(&config.listener.bind_address) {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!(
                "'{}' is not a socket address or host:port",
                config.listener.bind_address
            ),
        ));
    }

    match &config.store {
        StoreConfig::Directory { root } => {
            if root.as_os_str().is_empty() {
                errors.push(ValidationError::new("store.root", "must not be empty"));
            }
        }
        StoreConfig::Origin { url } => {
            if url.scheme() != "http" {
                errors.push(ValidationError::new(
                    "store.url",
                    format!("unsupported scheme '{}', expected http", url.scheme()),
                ));
            }
            if url.host_str().is_none() {
                errors.push(ValidationError::new("store.url", "missing host"));
            }
            if url.path() != "/" || url.query().is_some() {
                errors.push(ValidationError::new(
                    "store.url",
                    "must be a bare origin without path or query",
                ));
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }

    if Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A literal socket address, or `host:port` left for the listener to resolve.
fn is_bind_address(address: &str) -> bool {
    if address.parse::<SocketAddr>().is_ok() {
        return true;
    }
    match address.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains([':', '[', ']', '/'])
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use url::Url;

    fn fields(config: &RouterConfig) -> Vec<&'static str> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_listener_and_timeouts() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "localhost".into();
        config.timeouts.request_secs = 0;
        config.timeouts.connect_secs = 0;
        assert_eq!(
            fields(&config),
            vec![
                "listener.bind_address",
                "timeouts.request_secs",
                "timeouts.connect_secs"
            ]
        );
    }

    #[test]
    fn test_bind_address_accepts_host_names() {
        for address in ["localhost:8080", "0.0.0.0:8080", "[::1]:8080", "site.internal:80"] {
            let mut config = RouterConfig::default();
            config.listener.bind_address = address.into();
            assert!(validate_config(&config).is_ok(), "{address}");
        }
        for address in [":8080", "localhost:http", "::1:8080", "localhost:70000"] {
            let mut config = RouterConfig::default();
            config.listener.bind_address = address.into();
            assert_eq!(fields(&config), vec!["listener.bind_address"], "{address}");
        }
    }

    #[test]
    fn test_empty_directory_root() {
        let mut config = RouterConfig::default();
        config.store = StoreConfig::Directory {
            root: PathBuf::new(),
        };
        assert_eq!(fields(&config), vec!["store.root"]);
    }

    #[test]
    fn test_origin_must_be_bare_http() {
        let mut config = RouterConfig::default();
        config.store = StoreConfig::Origin {
            url: Url::parse("https://assets.example.com/site?x=1").unwrap(),
        };
        assert_eq!(fields(&config), vec!["store.url", "store.url"]);

        config.store = StoreConfig::Origin {
            url: Url::parse("http://127.0.0.1:9000").unwrap(),
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_observability() {
        let mut config = RouterConfig::default();
        config.observability.log_level = "loud".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();
        assert_eq!(
            fields(&config),
            vec!["observability.log_level", "observability.metrics_address"]
        );
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = RouterConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }
}
