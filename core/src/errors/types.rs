//! Error kinds raised by the verification flow and its collaborators

use rj_shared::validation::FieldErrors;
use thiserror::Error;

use crate::domain::entities::VerificationStage;

/// Local input failures, detected before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhoneFormat,

    #[error("Please enter all {expected} digits of the code")]
    IncompleteCode { expected: usize },

    #[error("{0}")]
    Profile(FieldErrors),

    #[error("Operation not allowed while {actual}; expected {expected}")]
    StageMismatch {
        expected: VerificationStage,
        actual: VerificationStage,
    },
}

/// Backend failure: either a well-formed failure reply or a transport error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Identity provider failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    /// Provider refused to send a code (invalid number, quota, anti-abuse check)
    #[error("Failed to send code: {message}")]
    IssuanceFailed { message: String },

    /// Wrong code, expired challenge, or a handle that was already consumed
    #[error("Invalid OTP. Please try again.")]
    InvalidOrExpiredCode,

    /// Provider could not be reached while confirming
    #[error("Identity provider unavailable: {message}")]
    ProviderUnavailable { message: String },
}

impl ChallengeError {
    pub fn issuance(message: impl Into<String>) -> Self {
        Self::IssuanceFailed {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
        }
    }
}
