//! reCAPTCHA-backed anti-abuse verifier
//!
//! The widget is rendered by the browser at the configured anchor; the token it
//! yields reaches the server through an [`AttestationSlot`]. In development a
//! fixed test token may stand in when the browser supplied none.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

use rj_core::errors::ChallengeError;
use rj_core::services::{AntiAbuseVerifier, AttestationSlot, VerifierFactory};

pub struct RecaptchaVerifier {
    anchor_id: String,
    slot: AttestationSlot,
    fallback_token: Option<String>,
    cleared: AtomicBool,
}

impl RecaptchaVerifier {
    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AntiAbuseVerifier for RecaptchaVerifier {
    fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    async fn token(&self) -> Result<String, ChallengeError> {
        if self.is_cleared() {
            return Err(ChallengeError::issuance("reCAPTCHA verifier was cleared"));
        }

        self.slot
            .take()
            .or_else(|| self.fallback_token.clone())
            .ok_or_else(|| ChallengeError::issuance("reCAPTCHA verification required"))
    }

    fn clear(&self) {
        self.cleared.store(true, Ordering::SeqCst);
        self.slot.clear();
    }
}

/// Builds verifiers reading from one session's attestation slot
#[derive(Clone)]
pub struct RecaptchaVerifierFactory {
    slot: AttestationSlot,
    fallback_token: Option<String>,
}

impl RecaptchaVerifierFactory {
    pub fn new(slot: AttestationSlot, fallback_token: Option<String>) -> Self {
        Self {
            slot,
            fallback_token,
        }
    }
}

impl VerifierFactory for RecaptchaVerifierFactory {
    type Verifier = RecaptchaVerifier;

    fn create(&self, anchor_id: &str) -> Result<RecaptchaVerifier, ChallengeError> {
        if anchor_id.trim().is_empty() {
            return Err(ChallengeError::issuance("reCAPTCHA anchor element is not configured"));
        }

        Ok(RecaptchaVerifier {
            anchor_id: anchor_id.to_string(),
            slot: self.slot.clone(),
            fallback_token: self.fallback_token.clone(),
            cleared: AtomicBool::new(false),
        })
    }
}
