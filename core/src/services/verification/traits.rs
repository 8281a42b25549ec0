//! Collaborator contracts for backend, identity provider and anti-abuse verifier

use async_trait::async_trait;

use crate::domain::value_objects::{ChallengeHandle, OtpCode, PhoneNumber, ProviderUserId};
use crate::errors::{ChallengeError, RemoteError};

/// Backend query: is this phone already registered?
///
/// A well-formed "not found" reply is `Ok(false)`; only transport or decoding
/// failures are errors. Safe to call repeatedly.
#[async_trait]
pub trait ExistenceCheck: Send + Sync {
    async fn check(&self, phone: &PhoneNumber) -> Result<bool, RemoteError>;
}

/// Backend account creation for a phone that passed OTP confirmation
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    async fn register(&self, name: &str, email: &str, phone: &PhoneNumber) -> Result<(), RemoteError>;
}

/// Backend session termination; not part of the verification flow
#[async_trait]
pub trait SessionRevoker: Send + Sync {
    async fn logout(&self) -> Result<(), RemoteError>;
}

/// Identity provider OTP operations
#[async_trait]
pub trait OtpChallenge: Send + Sync {
    /// Request delivery of a code to `phone`, gated by the anti-abuse verifier
    async fn issue(
        &self,
        phone: &PhoneNumber,
        verifier: &dyn AntiAbuseVerifier,
    ) -> Result<ChallengeHandle, ChallengeError>;

    /// Confirm `code` against `handle`; single use per handle
    async fn confirm(
        &self,
        handle: &ChallengeHandle,
        code: &OtpCode,
    ) -> Result<ProviderUserId, ChallengeError>;
}

/// Anti-abuse challenge bound to a UI anchor
#[async_trait]
pub trait AntiAbuseVerifier: Send + Sync {
    fn anchor_id(&self) -> &str;

    /// Token proving the challenge was passed, sent along with issuance
    async fn token(&self) -> Result<String, ChallengeError>;

    /// Teardown; the instance is not used afterwards
    fn clear(&self);
}

/// Builds verifiers; called at most once per session
pub trait VerifierFactory: Send + Sync {
    type Verifier: AntiAbuseVerifier;

    fn create(&self, anchor_id: &str) -> Result<Self::Verifier, ChallengeError>;
}
