//! Error types for the scalectl CLI

use thiserror::Error;

/// Result type alias for scalectl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not logged in. Run `scalectl login` to sign in.")]
    NotLoggedIn,
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
///
/// The HTTP pipeline produces `Status`, `Network` and `InvalidResponse`.
/// The service layer folds all of them into `Failed`, carrying the one
/// message a user should see.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("{message}")]
    Failed {
        message: String,
        status: Option<u16>,
    },
}

impl ApiError {
    /// HTTP status carried by this error, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Failed { status, .. } => *status,
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    /// Error string supplied by the backend, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
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
    #[error("Configuration file not found. Run `scalectl init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Local validation failures, raised before any network call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password must contain {}.", .0.join(", "))]
    WeakPassword(Vec<&'static str>),

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("{field} must be between {min} and {max}.")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{0} must be greater than zero.")]
    NotPositive(&'static str),
}
