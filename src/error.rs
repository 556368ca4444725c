use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by client operations.
///
/// These indicate that the library was called incorrectly (invalid input or missing configuration)
/// and are raised before any request is made. Network failures and non-2xx responses are not
/// errors; they are reported through [`Outcome`](crate::Outcome).
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Event data did not serialize to a JSON object.
    #[error("`data` must be a map: {0}")]
    InvalidData(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("API token cannot be empty")]
    EmptyApiToken,
    #[error("project cannot be empty")]
    EmptyProject,
    #[error("invalid base_url configuration")]
    InvalidBaseUrl(#[source] url::ParseError),
    #[error("configuration is incomplete, api_token and project must be set")]
    NotConfigured,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("missing required keys: {0:?}")]
    MissingRequiredKeys(Vec<String>),
    #[error("found invalid keys: {0:?}")]
    InvalidKeys(Vec<String>),
    #[error("invalid value for '{key}': '{}'. Expected a map", display_value(.value))]
    NotAMap { key: String, value: Value },
    #[error("invalid key: '{0}'. Keys must be lowercase and may include dashes")]
    InvalidMapKey(String),
    #[error("invalid value for '{key}': '{}'. Values must be a string, boolean, or number", display_value(.value))]
    InvalidMapValue { key: String, value: Value },
    #[error("invalid value for insight: '{}'. Values must be a string or number", display_value(.0))]
    InvalidInsightValue(Value),
    #[error("invalid value for insight mutation: '{}'. Value must be a number", display_value(.0))]
    InvalidMutationValue(Value),
}

/// Failure reported by a [`Transport`](crate::Transport) before any HTTP response was received.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    // reqwest::Error is not clonable, so we're wrapping it in an Arc.
    #[error(transparent)]
    Network(Arc<reqwest::Error>),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        TransportError::Network(Arc::new(value.without_url()))
    }
}

/// Render a JSON value for error messages: strings without quotes, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
