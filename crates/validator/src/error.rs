// Path: crates/validator/src/error.rs
use bitads_types::app::ScopeId;
use bitads_types::error::{ErrorCode, ScoringError};
use thiserror::Error;

/// Errors raised while loading state or running a validation cycle.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Invalid validator configuration: {0}")]
    Config(ScoringError),
    #[error("Scope '{scope}' failed to score: {source}")]
    Scoring {
        scope: ScopeId,
        #[source]
        source: ScoringError,
    },
    #[error("Port '{port}' failed for scope '{scope}': {source}")]
    Port {
        scope: ScopeId,
        port: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to list campaigns: {0}")]
    Campaigns(anyhow::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CycleError {
    pub(crate) fn scoring(scope: &ScopeId, source: ScoringError) -> Self {
        Self::Scoring {
            scope: scope.clone(),
            source,
        }
    }

    pub(crate) fn port(scope: &ScopeId, port: &'static str, source: anyhow::Error) -> Self {
        Self::Port {
            scope: scope.clone(),
            port,
            source,
        }
    }

    /// The scope the error belongs to, if it is scope-local.
    pub fn scope(&self) -> Option<&ScopeId> {
        match self {
            Self::Scoring { scope, .. } | Self::Port { scope, .. } => Some(scope),
            _ => None,
        }
    }
}

impl ErrorCode for CycleError {
    fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CYCLE_INVALID_CONFIG",
            Self::Scoring { source, .. } => source.code(),
            Self::Port { .. } => "CYCLE_PORT_FAILURE",
            Self::Campaigns(_) => "CYCLE_CAMPAIGNS_UNAVAILABLE",
            Self::Io(_) => "CYCLE_IO_ERROR",
            Self::Toml(_) => "CYCLE_TOML_ERROR",
            Self::Json(_) => "CYCLE_JSON_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_errors_keep_their_code() {
        let err = CycleError::scoring(
            &ScopeId::campaign(4),
            ScoringError::invalid_input("revenue_usd", "negative"),
        );
        assert_eq!(err.code(), "SCORING_INVALID_INPUT");
        assert_eq!(err.scope(), Some(&ScopeId::campaign(4)));
        assert!(err.to_string().contains("campaign:4"));
    }

    #[test]
    fn port_errors_name_the_port() {
        let err = CycleError::port(&ScopeId::network(), "weight_sink", anyhow::anyhow!("timeout"));
        assert_eq!(err.code(), "CYCLE_PORT_FAILURE");
        assert!(err.to_string().contains("weight_sink"));
    }
}
