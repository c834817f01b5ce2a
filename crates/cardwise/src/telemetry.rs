//! Tracing setup for the recommendation service. `RUST_LOG` wins when set;
//! otherwise the configured `APP_LOG_LEVEL` directive is used.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidDirective { directive: String, source: ParseError },
    AlreadyInitialized(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidDirective { directive, .. } => {
                write!(f, "log filter directive '{directive}' is not valid")
            }
            TelemetryError::AlreadyInitialized(err) => {
                write!(f, "tracing subscriber could not be installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidDirective { source, .. } => Some(source),
            TelemetryError::AlreadyInitialized(err) => Some(&**err),
        }
    }
}

/// Install the global subscriber. Fails if the configured directive does not
/// parse or a subscriber is already in place.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(config)?)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInitialized)
}

fn resolve_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => filter_from_directive(&config.log_level),
    }
}

fn filter_from_directive(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::InvalidDirective {
        directive: directive.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_level_directives_parse() {
        assert!(filter_from_directive("info").is_ok());
        assert!(filter_from_directive("cardwise=debug,warn").is_ok());
    }

    #[test]
    fn malformed_directives_are_rejected_with_the_offending_value() {
        let error = filter_from_directive("cardwise=debug=extra").expect_err("invalid directive");

        match &error {
            TelemetryError::InvalidDirective { directive, .. } => {
                assert_eq!(directive, "cardwise=debug=extra");
            }
            other => panic!("expected directive error, got {other:?}"),
        }
        assert!(error.to_string().contains("cardwise=debug=extra"));
    }
}
