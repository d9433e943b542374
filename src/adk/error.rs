// SPDX-License-Identifier: MIT

//! Typed error handling for hike-butler
//!
//! Adapters log once and propagate these; the UI boundary turns them into
//! plain `Error: ...` strings.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ButlerError>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum ButlerError {
    /// API errors from external services (OpenAI-compatible endpoints)
    #[error("API error from {provider}: {message}")]
    Api { provider: String, message: String },

    /// Configuration file and settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider / model construction errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Vector and relational store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Workflow graph errors
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Sql(#[from] sqlx::Error),

    /// Max graph steps reached
    #[error("Max {kind} reached: {limit}")]
    MaxIterations { kind: String, limit: u32 },

    #[error("{0}")]
    Other(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("invalid settings in '{key}': {message}")]
    Invalid { key: String, message: String },
}

/// Model/provider errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API key not configured for provider: {0}")]
    ApiKeyMissing(String),

    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("invalid response from model: {0}")]
    InvalidResponse(String),
}

/// Storage adapter errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("embedding dimension mismatch: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    #[error("stored profile for '{0}' is not valid JSON")]
    CorruptProfile(String),
}

/// Workflow graph errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("entry point not set")]
    MissingEntryPoint,

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    #[error("node '{0}' already has an outgoing edge")]
    DuplicateEdge(String),

    #[error("node '{0}' has no outgoing edge")]
    DanglingNode(String),

    #[error("router for '{node}' returned unmapped label '{label}'")]
    UnmappedRoute { node: String, label: String },

    #[error("invalid phase: {0}")]
    InvalidPhase(String),
}

impl ButlerError {
    /// Create an API error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<String> for ButlerError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ButlerError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_error_display() {
        let err: ButlerError = ConfigError::NotFound("config/config.yaml".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: config file not found: config/config.yaml"
        );

        let err: ButlerError = ModelError::ApiKeyMissing("qwen".into()).into();
        assert_eq!(
            err.to_string(),
            "Model error: API key not configured for provider: qwen"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = StorageError::LengthMismatch {
            field: "ids",
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "ids has 2 entries, expected 3");
    }
}
