//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborator contracts declared in
//! `rj_core`:
//! - **Backend**: reqwest client for the rental backend (`/auth/login`,
//!   `/auth/signup`, `/auth/logout`) with a per-session cookie jar
//! - **Identity**: Firebase Identity Toolkit phone auth, a development mock,
//!   and the reCAPTCHA-backed anti-abuse verifier

/// Rental backend HTTP client
pub mod backend;

/// Identity provider and anti-abuse verifier implementations
pub mod identity;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{BackendClient, BackendOutcome};
pub use identity::{
    create_otp_challenge, FirebasePhoneAuth, MockIdentityProvider, RecaptchaVerifier,
    RecaptchaVerifierFactory,
};

use rj_core::errors::RemoteError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected reply from the identity provider
    #[error("Identity provider error: {0}")]
    Identity(String),
}

impl From<InfrastructureError> for RemoteError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Http(e) => RemoteError::new(e.to_string()),
            other => RemoteError::new(other.to_string()),
        }
    }
}
