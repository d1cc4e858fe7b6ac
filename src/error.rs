//! Error taxonomy for a generation attempt.

use thiserror::Error;

/// Input problems caught before any network I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a product name")]
    MissingProductName,
    #[error("Please select a tone")]
    MissingTone,
}

/// Why the remote generator did not produce a description.
///
/// Every kind is recovered the same way (fallback text plus a notice); the
/// split exists so callers and logs can tell an unreachable service apart
/// from one that answered badly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    #[error("description service unreachable: {0}")]
    Unreachable(String),
    #[error("description service returned HTTP {0}")]
    Status(u16),
    #[error("malformed response from description service: {0}")]
    Malformed(String),
}

impl RemoteFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteFailure::Unreachable(_) => "unreachable",
            RemoteFailure::Status(_) => "status",
            RemoteFailure::Malformed(_) => "malformed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteFailure),
}

/// Reasons a submit never reached the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a generation is already in progress")]
    InProgress,
}
