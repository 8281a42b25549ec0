//! Phone verification state machine

use std::sync::Arc;
use tracing;

use crate::domain::entities::{VerificationSession, VerificationStage};
use crate::domain::value_objects::{OtpCode, PhoneNumber, ProfileDraft};
use crate::errors::{ChallengeError, ValidationFailure, VerificationError, VerificationResult};

use super::config::VerificationConfig;
use super::cooldown::ResendCooldown;
use super::traits::{AccountRegistry, ExistenceCheck, OtpChallenge, VerifierFactory};
use super::types::{CodeSent, RouteSignal, VerificationSnapshot};
use super::verifier_slot::VerifierSlot;

/// Sequences existence check, OTP issuance/confirmation and profile
/// completion for a single verification session.
///
/// Stages: `EnteringPhone -> AwaitingOtp -> {Done | CompletingProfile -> Done}`.
/// Every operation takes `&mut self`, so at most one is in flight per session.
/// Every failure leaves the session in the stage it was in before the call.
pub struct PhoneVerificationOrchestrator<E, R, O, F>
where
    E: ExistenceCheck + ?Sized,
    R: AccountRegistry + ?Sized,
    O: OtpChallenge + ?Sized,
    F: VerifierFactory,
{
    /// Backend existence query
    existence: Arc<E>,
    /// Backend account creation
    registry: Arc<R>,
    /// Identity provider
    challenge: Arc<O>,
    /// Anti-abuse verifier, built on first issuance
    verifier: VerifierSlot<F>,
    /// Resend countdown
    cooldown: ResendCooldown,
    session: VerificationSession,
    config: VerificationConfig,
}

impl<E, R, O, F> PhoneVerificationOrchestrator<E, R, O, F>
where
    E: ExistenceCheck + ?Sized,
    R: AccountRegistry + ?Sized,
    O: OtpChallenge + ?Sized,
    F: VerifierFactory,
{
    /// Create an orchestrator with a fresh `EnteringPhone` session
    pub fn new(
        existence: Arc<E>,
        registry: Arc<R>,
        challenge: Arc<O>,
        verifier_factory: F,
        config: VerificationConfig,
    ) -> Self {
        let verifier = VerifierSlot::new(verifier_factory, config.anchor_id.clone());
        Self {
            existence,
            registry,
            challenge,
            verifier,
            cooldown: ResendCooldown::new(),
            session: VerificationSession::new(),
            config,
        }
    }

    /// Submit the rider's phone number.
    ///
    /// Runs the existence check, then issues a challenge. Issuance waits for
    /// the check because the post-confirmation branch depends on its result.
    /// Nothing is committed to the session unless both calls succeed.
    pub async fn submit_phone(&mut self, raw_phone: &str) -> VerificationResult<CodeSent> {
        self.session.require_stage(VerificationStage::EnteringPhone)?;
        let phone = PhoneNumber::parse(raw_phone)?;
        let masked = phone.masked();

        let exists = match self.existence.check(&phone).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(
                    phone = %masked,
                    error = %e,
                    event = "existence_check_failed",
                    "Existence check failed"
                );
                return Err(e.into());
            }
        };

        let verifier = self.verifier.get_or_create()?;
        let handle = match self.challenge.issue(&phone, verifier).await {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(
                    phone = %masked,
                    error = %e,
                    event = "challenge_issue_failed",
                    "OTP issuance failed; existence result discarded"
                );
                return Err(e.into());
            }
        };

        self.session.begin_challenge(phone, exists, handle);
        self.cooldown.start(self.config.resend_cooldown_seconds);

        tracing::info!(
            phone = %masked,
            exists = exists,
            event = "phone_submitted",
            "Verification code sent"
        );

        Ok(CodeSent {
            resend_after_seconds: self.config.resend_cooldown_seconds,
        })
    }

    /// Confirm the code the rider typed.
    ///
    /// A code of the wrong length never reaches the provider. The challenge
    /// handle is consumed by the attempt whatever its outcome; after a failure
    /// the rider has to request a new code.
    pub async fn submit_otp(&mut self, raw_code: &str) -> VerificationResult<RouteSignal> {
        self.session.require_stage(VerificationStage::AwaitingOtp)?;
        let code = OtpCode::parse(raw_code, self.config.otp_length)?;

        let Some(handle) = self.session.take_challenge() else {
            tracing::warn!(event = "otp_without_challenge", "No live challenge to confirm");
            return Err(ChallengeError::InvalidOrExpiredCode.into());
        };

        let user_id = match self.challenge.confirm(&handle, &code).await {
            Ok(user_id) => user_id,
            Err(e) => {
                tracing::warn!(
                    phone = %self.masked_phone(),
                    error = %e,
                    event = "otp_rejected",
                    "OTP confirmation failed"
                );
                return Err(e.into());
            }
        };

        self.cooldown.cancel();

        let phone = self
            .session
            .phone()
            .cloned()
            .ok_or(ValidationFailure::InvalidPhoneFormat)?;

        if self.session.exists() == Some(true) {
            self.session.confirm_existing();
            self.verifier.teardown();
            tracing::info!(
                phone = %phone.masked(),
                event = "otp_confirmed",
                next = "home",
                "Registered rider verified"
            );
            Ok(RouteSignal::Home)
        } else {
            self.session.confirm_new(user_id.clone());
            tracing::info!(
                phone = %phone.masked(),
                event = "otp_confirmed",
                next = "complete_profile",
                "New rider verified; profile required"
            );
            Ok(RouteSignal::CompleteProfile { phone, user_id })
        }
    }

    /// Request a new code for the same phone.
    ///
    /// Outside `AwaitingOtp` or while the countdown is running this is a no-op
    /// reported as `CooldownActive`. The countdown restarts before issuance; on
    /// failure the previous handle stays in place.
    pub async fn resend_code(&mut self) -> VerificationResult<CodeSent> {
        let remaining = self.cooldown.remaining();
        if self.session.stage() != VerificationStage::AwaitingOtp || remaining > 0 {
            tracing::debug!(
                stage = %self.session.stage(),
                remaining_seconds = remaining,
                event = "resend_blocked",
                "Resend ignored"
            );
            return Err(VerificationError::CooldownActive {
                remaining_seconds: remaining,
            });
        }

        let Some(phone) = self.session.phone().cloned() else {
            return Err(ValidationFailure::InvalidPhoneFormat.into());
        };

        self.cooldown.start(self.config.resend_cooldown_seconds);

        let verifier = self.verifier.get_or_create()?;
        match self.challenge.issue(&phone, verifier).await {
            Ok(handle) => {
                self.session.replace_challenge(handle);
                tracing::info!(
                    phone = %phone.masked(),
                    event = "code_resent",
                    "Verification code resent"
                );
                Ok(CodeSent {
                    resend_after_seconds: self.config.resend_cooldown_seconds,
                })
            }
            Err(e) => {
                tracing::warn!(
                    phone = %phone.masked(),
                    error = %e,
                    event = "resend_failed",
                    "OTP re-issuance failed"
                );
                Err(e.into())
            }
        }
    }

    /// Register a new rider with the backend.
    ///
    /// The draft is kept in the session before validation, so neither a field
    /// error nor a backend failure loses what the rider typed.
    pub async fn complete_profile(&mut self, draft: ProfileDraft) -> VerificationResult<RouteSignal> {
        self.session.require_stage(VerificationStage::CompletingProfile)?;
        self.session.store_draft(draft.clone());

        draft.validate().map_err(ValidationFailure::Profile)?;

        let phone = self
            .session
            .phone()
            .cloned()
            .ok_or(ValidationFailure::InvalidPhoneFormat)?;

        if let Err(e) = self
            .registry
            .register(draft.name.trim(), draft.email.trim(), &phone)
            .await
        {
            tracing::warn!(
                phone = %phone.masked(),
                error = %e,
                event = "registration_failed",
                "Account registration failed"
            );
            return Err(e.into());
        }

        self.session.complete_profile();
        self.verifier.teardown();

        tracing::info!(
            phone = %phone.masked(),
            event = "profile_completed",
            "Rider account created"
        );

        Ok(RouteSignal::Home)
    }

    /// Drop the current attempt and go back to phone entry.
    ///
    /// The verifier survives; it belongs to the page, not the phone number.
    pub fn change_number(&mut self) -> VerificationResult<()> {
        if self.session.stage().is_terminal() {
            return Err(ValidationFailure::StageMismatch {
                expected: VerificationStage::AwaitingOtp,
                actual: VerificationStage::Done,
            }
            .into());
        }

        self.cooldown.cancel();
        self.session.reset();
        tracing::info!(event = "number_changed", "Verification restarted");
        Ok(())
    }

    /// Tear the session down: stop the countdown, clear the verifier, reset.
    pub fn abandon(&mut self) {
        self.cooldown.cancel();
        self.verifier.teardown();
        if self.session.stage() != VerificationStage::EnteringPhone {
            tracing::info!(
                stage = %self.session.stage(),
                event = "session_abandoned",
                "Verification abandoned"
            );
        }
        self.session.reset();
    }

    pub fn snapshot(&self) -> VerificationSnapshot {
        let remaining = self.cooldown.remaining();
        let stage = self.session.stage();
        VerificationSnapshot {
            stage,
            phone: self.session.phone().map(PhoneNumber::masked),
            exists: self.session.exists(),
            resend_cooldown_seconds: remaining,
            can_resend: stage == VerificationStage::AwaitingOtp && remaining == 0,
            otp_length: self.config.otp_length,
            draft: self.session.draft().cloned(),
        }
    }

    pub fn stage(&self) -> VerificationStage {
        self.session.stage()
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Seconds left before a resend is allowed
    pub fn resend_cooldown_seconds(&self) -> u32 {
        self.cooldown.remaining()
    }

    pub fn verifier_active(&self) -> bool {
        self.verifier.is_active()
    }

    /// Number of verifiers built for this session (at most one unless torn down)
    pub fn verifier_constructions(&self) -> u32 {
        self.verifier.constructions()
    }

    fn masked_phone(&self) -> String {
        self.session
            .phone()
            .map(PhoneNumber::masked)
            .unwrap_or_else(|| "****".to_string())
    }
}
