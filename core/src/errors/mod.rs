//! Domain-specific error types and error handling.
//!
//! Every collaborator failure is converted into a [`VerificationError`] at the
//! orchestrator boundary, so callers never see raw transport errors.

mod types;


pub use types::{ChallengeError, RemoteError, ValidationFailure};

use rj_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Errors surfaced by the phone verification flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Local, pre-network input failure; never retried automatically
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    /// Backend unreachable or replied with a failure; message is shown verbatim
    #[error("{0}")]
    Remote(#[from] RemoteError),

    /// Identity provider rejected issuance or confirmation
    #[error(transparent)]
    Challenge(#[from] ChallengeError),

    /// Resend requested before the countdown elapsed; informational
    #[error("Please wait {remaining_seconds} seconds before requesting a new code")]
    CooldownActive { remaining_seconds: u32 },
}

impl VerificationError {
    /// Stable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::Validation(ValidationFailure::StageMismatch { .. }) => {
                error_codes::STAGE_MISMATCH
            }
            VerificationError::Validation(_) => error_codes::VALIDATION_ERROR,
            VerificationError::Remote(_) => error_codes::REMOTE_ERROR,
            VerificationError::Challenge(ChallengeError::IssuanceFailed { .. }) => {
                error_codes::CHALLENGE_ISSUANCE_FAILED
            }
            VerificationError::Challenge(ChallengeError::InvalidOrExpiredCode) => {
                error_codes::VERIFICATION_CODE_INVALID
            }
            VerificationError::Challenge(ChallengeError::ProviderUnavailable { .. }) => {
                error_codes::IDENTITY_PROVIDER_UNAVAILABLE
            }
            VerificationError::CooldownActive { .. } => error_codes::COOLDOWN_ACTIVE,
        }
    }

    /// Whether this is the informational cooldown notice rather than a failure
    pub fn is_cooldown(&self) -> bool {
        matches!(self, VerificationError::CooldownActive { .. })
    }
}

impl IntoErrorResponse for VerificationError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.to_string());
        match self {
            VerificationError::Validation(ValidationFailure::Profile(fields)) => {
                response.add_detail("fields", fields)
            }
            VerificationError::Validation(ValidationFailure::IncompleteCode { expected }) => {
                response.add_detail("expected_length", expected)
            }
            VerificationError::Validation(ValidationFailure::StageMismatch { expected, actual }) => {
                response
                    .add_detail("expected_stage", expected)
                    .add_detail("actual_stage", actual)
            }
            VerificationError::CooldownActive { remaining_seconds } => {
                response.add_detail("remaining_seconds", remaining_seconds)
            }
            _ => response,
        }
    }
}

/// Result alias used across the verification flow
pub type VerificationResult<T> = Result<T, VerificationError>;
