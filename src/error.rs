//! Error types for stack planning.

use crate::models::SubnetId;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single subnet lookup against the network provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("subnet not found")]
    NotFound,

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider error: {0}")]
    Provider(String),
}

/// Errors surfaced while building or writing the stack plan.
///
/// None of these are recovered locally.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("required configuration '{0}' is not set")]
    ConfigurationMissing(String),

    #[error("could not resolve CIDR block for subnet '{subnet_id}': {cause}")]
    ResolutionFailure {
        subnet_id: SubnetId,
        cause: LookupError,
    },

    #[error("provider error: {0}")]
    ProviderError(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("error serializing plan: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("error writing plan: {0}")]
    Io(#[from] std::io::Error),
}
