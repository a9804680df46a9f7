//! Error types for cdk-bootstrap-core

use thiserror::Error;

/// Result type alias using cdk-bootstrap-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
///
/// Configuration errors are fatal to a bootstrap pass and never retried.
/// Inconsistent-state errors indicate a broken builder contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InconsistentState,
    Io,
}

/// Core error types for the bootstrap policy core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Required field is empty
    #[error("Required field is empty: {field}")]
    EmptyField { field: String },

    /// Field is not an alphanumeric/hyphen token
    #[error("Invalid {field} '{value}': only ASCII letters, digits and '-' are allowed")]
    InvalidToken { field: String, value: String },

    /// Bucket or repository name override breaks the service naming rules
    #[error("Invalid {field} '{value}': not a valid resource name")]
    InvalidResourceName { field: String, value: String },

    /// Trusted principal is not an account id
    #[error("Malformed trusted principal '{value}' in {list}: expected a 12-digit account id")]
    MalformedPrincipal { list: String, value: String },

    /// Execution policy reference is not a managed policy ARN
    #[error("Malformed execution policy reference '{value}': expected arn:<partition>:iam::<account|aws>:policy/<name>")]
    MalformedPolicyArn { value: String },

    /// Bootstrap environment is invalid
    #[error("Invalid environment {field} '{value}'")]
    InvalidEnvironment { field: String, value: String },

    /// A derived specification references something outside the current pass
    #[error("Inconsistent bootstrap state: {message}")]
    InconsistentState { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an empty field error
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    /// Create an invalid token error
    pub fn invalid_token(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidToken {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an invalid resource name error
    pub fn invalid_resource_name(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidResourceName {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a malformed principal error
    pub fn malformed_principal(list: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedPrincipal {
            list: list.into(),
            value: value.into(),
        }
    }

    /// Create a malformed policy ARN error
    pub fn malformed_policy_arn(value: impl Into<String>) -> Self {
        Self::MalformedPolicyArn {
            value: value.into(),
        }
    }

    /// Create an invalid environment error
    pub fn invalid_environment(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnvironment {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an inconsistent state error
    pub fn inconsistent_state(message: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InconsistentState { .. } => ErrorKind::InconsistentState,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
            _ => ErrorKind::Configuration,
        }
    }

    /// Whether this error was caused by invalid configuration
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}
