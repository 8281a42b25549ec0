//! Wiring of collaborators into a fresh verification session

use std::sync::Arc;

use rj_core::services::{
    AccountRegistry, AttestationSlot, ExistenceCheck, OtpChallenge, PhoneVerificationOrchestrator,
    SessionRevoker, VerificationConfig, VerifierFactory,
};
use rj_infra::{BackendClient, InfrastructureError, RecaptchaVerifierFactory};
use rj_shared::config::{BackendConfig, IdentityProviderConfig};

/// Orchestrator type held by every session
pub type SessionOrchestrator<V> =
    PhoneVerificationOrchestrator<dyn ExistenceCheck, dyn AccountRegistry, dyn OtpChallenge, V>;

/// Everything one visitor's flow needs
pub struct SessionParts<V: VerifierFactory> {
    pub orchestrator: SessionOrchestrator<V>,
    /// Where request handlers drop the browser's anti-abuse token
    pub attestation: AttestationSlot,
    pub revoker: Arc<dyn SessionRevoker>,
}

/// Builds the collaborators of a new session
pub trait SessionFactory: Send + Sync + 'static {
    type Verifiers: VerifierFactory + 'static;

    fn create(&self) -> Result<SessionParts<Self::Verifiers>, InfrastructureError>;
}

/// Production factory: one backend client (and cookie jar) per session,
/// a shared identity provider, reCAPTCHA verifiers fed from the request body
pub struct LiveSessionFactory {
    backend: BackendConfig,
    challenge: Arc<dyn OtpChallenge>,
    verification: VerificationConfig,
    fallback_token: Option<String>,
}

impl LiveSessionFactory {
    pub fn new(
        backend: BackendConfig,
        identity: &IdentityProviderConfig,
        challenge: Arc<dyn OtpChallenge>,
        verification: VerificationConfig,
    ) -> Self {
        Self {
            backend,
            challenge,
            verification,
            fallback_token: identity.fallback_token().map(str::to_string),
        }
    }
}

impl SessionFactory for LiveSessionFactory {
    type Verifiers = RecaptchaVerifierFactory;

    fn create(&self) -> Result<SessionParts<RecaptchaVerifierFactory>, InfrastructureError> {
        let client = Arc::new(BackendClient::new(&self.backend)?);
        let existence: Arc<dyn ExistenceCheck> = client.clone();
        let registry: Arc<dyn AccountRegistry> = client.clone();
        let revoker: Arc<dyn SessionRevoker> = client;

        let attestation = AttestationSlot::new();
        let verifiers =
            RecaptchaVerifierFactory::new(attestation.clone(), self.fallback_token.clone());

        let orchestrator = PhoneVerificationOrchestrator::new(
            existence,
            registry,
            Arc::clone(&self.challenge),
            verifiers,
            self.verification.clone(),
        );

        Ok(SessionParts {
            orchestrator,
            attestation,
            revoker,
        })
    }
}
