//! Error types for forgeteam

use std::time::Duration;
use thiserror::Error;

use crate::team::TeamId;

/// Result type alias for forgeteam operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Team(#[from] TeamError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("Declaration error: {0}")]
    Declaration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Reconciliation errors surfaced to the caller of the team core.
///
/// Every variant is returned as-is; the core never retries and never
/// substitutes a fallback value.
#[derive(Debug, Error)]
pub enum TeamError {
    /// Malformed declaration. Caller's fault, never retryable.
    #[error("Invalid team specification: {0}")]
    Validation(String),

    /// The parent organization does not exist.
    #[error("Organization with name '{0}' not found")]
    OrganizationNotFound(String),

    /// A team with the same name already exists and adoption was not requested.
    #[error("Team '{name}' already exists in organization '{organization}'")]
    AlreadyExists { name: String, organization: String },

    /// The team id vanished remotely.
    #[error("Team with id {0} not found")]
    NotFound(TeamId),

    /// Transport failure or timeout. Retryable by the caller.
    #[error("Network error: {0}")]
    Network(String),

    /// Any other platform failure (authentication, server errors, ...).
    #[error(transparent)]
    Remote(ApiError),
}

impl TeamError {
    /// Whether the caller may retry the failed operation unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            TeamError::Network(_) => true,
            TeamError::Remote(ApiError::RateLimit(_)) | TeamError::Remote(ApiError::ServerError(_)) => {
                true
            }
            _ => false,
        }
    }
}

impl From<ApiError> for TeamError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => TeamError::Network(msg),
            other => TeamError::Remote(other),
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check the token or credentials in your configuration.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Forgejo URL not configured. Set `url` in the config file or pass --url.")]
    MissingUrl,

    #[error("No credentials configured. Set a token or username/password.")]
    MissingCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// State store errors
#[derive(Debug, Error)]
pub enum StateError {
    #[error("State database error: {0}")]
    Database(String),

    #[error("State I/O error: {0}")]
    Io(String),

    #[error("Could not determine home directory for the state file")]
    NoHome,

    #[error("Corrupt state entry '{address}': {message}")]
    Corrupt { address: String, message: String },

    #[error("No state entry for address '{0}'")]
    UnknownAddress(String),
}

impl From<rusqlite::Error> for StateError {
    fn from(err: rusqlite::Error) -> Self {
        StateError::Database(err.to_string())
    }
}
