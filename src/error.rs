//! Errors raised while running a reminder cycle.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("error fetching {source_name}: {source}")]
    Transport {
        source_name: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("received non-OK HTTP status from {source_name} service: {status}")]
    UpstreamStatus {
        source_name: &'static str,
        status: StatusCode,
    },

    #[error("error decoding {source_name} data: {source}")]
    Decode {
        source_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Name of the source (`events` or `users`) the fetch was for.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Transport { source_name, .. }
            | Self::UpstreamStatus { source_name, .. }
            | Self::Decode { source_name, .. } => *source_name,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid reminder duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("invalid value {value:?} for `{key}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to write reminder: {0}")]
    Io(#[from] std::io::Error),

    #[error("reminder rejected: {0}")]
    Rejected(String),
}

/// Why a cycle stopped before delivering anything.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
