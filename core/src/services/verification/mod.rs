//! Phone verification module
//!
//! This module sequences the three collaborators of a rider login:
//! - Backend existence check and account registration
//! - Identity provider OTP issuance and confirmation
//! - Anti-abuse verifier required before issuance
//!
//! The orchestrator owns one [`VerificationSession`](crate::domain::VerificationSession)
//! plus the resend countdown and the lazily built verifier.

mod attestation;
mod config;
mod cooldown;
mod orchestrator;
mod traits;
mod types;
mod verifier_slot;


pub use attestation::AttestationSlot;
pub use config::VerificationConfig;
pub use cooldown::ResendCooldown;
pub use orchestrator::PhoneVerificationOrchestrator;
pub use traits::{
    AccountRegistry, AntiAbuseVerifier, ExistenceCheck, OtpChallenge, SessionRevoker,
    VerifierFactory,
};
pub use types::{CodeSent, RouteSignal, VerificationSnapshot};
pub use verifier_slot::VerifierSlot;
