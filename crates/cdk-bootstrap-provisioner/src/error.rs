//! Error types for a bootstrap pass

use thiserror::Error;

use cdk_bootstrap_core::ErrorKind;

/// Result type alias for the bootstrap pipeline
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors raised while running a bootstrap pass
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Invalid configuration or a broken internal invariant
    #[error(transparent)]
    Core(#[from] cdk_bootstrap_core::Error),

    /// A collaborator call failed; the error is passed through unchanged
    #[error("{operation} failed: {source}")]
    Provider {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ProvisionError {
    /// Wrap a collaborator error with the operation that produced it
    pub fn provider(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Provider { operation, source }
    }

    /// Classification of core errors; `None` for collaborator failures
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Core(err) => Some(err.kind()),
            Self::Provider { .. } => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == Some(ErrorKind::Configuration)
    }

    /// Failing collaborator operation, if any
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Provider { operation, .. } => Some(operation),
            Self::Core(_) => None,
        }
    }
}
