//! Session-scoped, lazily built anti-abuse verifier

use tracing;

use crate::errors::ChallengeError;

use super::traits::{AntiAbuseVerifier, VerifierFactory};

/// Holds at most one verifier for the lifetime of a session.
///
/// The verifier is built on first use and reused for every later issuance;
/// the provider rate-limits or rejects duplicate widgets otherwise.
/// [`teardown`](Self::teardown) clears it and also runs on drop.
pub struct VerifierSlot<F: VerifierFactory> {
    factory: F,
    anchor_id: String,
    verifier: Option<F::Verifier>,
    constructions: u32,
}

impl<F: VerifierFactory> VerifierSlot<F> {
    pub fn new(factory: F, anchor_id: impl Into<String>) -> Self {
        Self {
            factory,
            anchor_id: anchor_id.into(),
            verifier: None,
            constructions: 0,
        }
    }

    /// Existing verifier, or a new one bound to the anchor
    pub fn get_or_create(&mut self) -> Result<&F::Verifier, ChallengeError> {
        if self.verifier.is_none() {
            let verifier = self.factory.create(&self.anchor_id)?;
            self.constructions += 1;
            tracing::debug!(
                anchor_id = %self.anchor_id,
                event = "verifier_created",
                "Anti-abuse verifier created"
            );
            self.verifier = Some(verifier);
        }

        self.verifier
            .as_ref()
            .ok_or_else(|| ChallengeError::issuance("anti-abuse verifier unavailable"))
    }

    pub fn is_active(&self) -> bool {
        self.verifier.is_some()
    }

    /// How many verifiers this slot has built
    pub fn constructions(&self) -> u32 {
        self.constructions
    }

    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    pub fn teardown(&mut self) {
        if let Some(verifier) = self.verifier.take() {
            verifier.clear();
            tracing::debug!(
                anchor_id = %self.anchor_id,
                event = "verifier_cleared",
                "Anti-abuse verifier torn down"
            );
        }
    }
}

impl<F: VerifierFactory> Drop for VerifierSlot<F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
