//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    AccountRegistry, AntiAbuseVerifier, AttestationSlot, CodeSent, ExistenceCheck, OtpChallenge,
    PhoneVerificationOrchestrator, ResendCooldown, RouteSignal, SessionRevoker, VerificationConfig,
    VerificationSnapshot, VerifierFactory, VerifierSlot,
};
