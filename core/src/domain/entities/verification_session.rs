//! Verification session entity threaded across the phone, OTP and profile steps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::{ChallengeHandle, PhoneNumber, ProfileDraft, ProviderUserId};
use crate::errors::ValidationFailure;

/// Stage of a verification attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStage {
    #[default]
    EnteringPhone,
    AwaitingOtp,
    CompletingProfile,
    /// Terminal; a fresh session is required to verify again
    Done,
}

impl VerificationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStage::EnteringPhone => "entering_phone",
            VerificationStage::AwaitingOtp => "awaiting_otp",
            VerificationStage::CompletingProfile => "completing_profile",
            VerificationStage::Done => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VerificationStage::Done)
    }
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state of one verification attempt.
///
/// Fields are only written through the transition methods below, so the
/// stage and the data it implies cannot drift apart:
/// - `AwaitingOtp` always has a phone and a known existence result
/// - `CompletingProfile` always has a provider user id
#[derive(Debug, Clone, Default)]
pub struct VerificationSession {
    phone: Option<PhoneNumber>,
    exists: Option<bool>,
    challenge: Option<ChallengeHandle>,
    stage: VerificationStage,
    provider_user_id: Option<ProviderUserId>,
    draft: Option<ProfileDraft>,
}

impl VerificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> VerificationStage {
        self.stage
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Existence result, `None` until the check has resolved for this attempt
    pub fn exists(&self) -> Option<bool> {
        self.exists
    }

    pub fn existence_known(&self) -> bool {
        self.exists.is_some()
    }

    pub fn has_challenge(&self) -> bool {
        self.challenge.is_some()
    }

    pub fn challenge(&self) -> Option<&ChallengeHandle> {
        self.challenge.as_ref()
    }

    pub fn provider_user_id(&self) -> Option<&ProviderUserId> {
        self.provider_user_id.as_ref()
    }

    pub fn draft(&self) -> Option<&ProfileDraft> {
        self.draft.as_ref()
    }

    /// Fail with `StageMismatch` unless the session is in `expected`
    pub fn require_stage(&self, expected: VerificationStage) -> Result<(), ValidationFailure> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(ValidationFailure::StageMismatch {
                expected,
                actual: self.stage,
            })
        }
    }

    /// Existence check and issuance both succeeded
    pub fn begin_challenge(&mut self, phone: PhoneNumber, exists: bool, handle: ChallengeHandle) {
        self.phone = Some(phone);
        self.exists = Some(exists);
        self.challenge = Some(handle);
        self.stage = VerificationStage::AwaitingOtp;
    }

    /// Remove the handle for a confirmation attempt; it is never reused
    pub fn take_challenge(&mut self) -> Option<ChallengeHandle> {
        self.challenge.take()
    }

    /// A resend produced a new handle that supersedes the old one
    pub fn replace_challenge(&mut self, handle: ChallengeHandle) {
        self.challenge = Some(handle);
    }

    /// Confirmed for a registered phone: the attempt is finished
    pub fn confirm_existing(&mut self) {
        self.challenge = None;
        self.stage = VerificationStage::Done;
    }

    /// Confirmed for an unregistered phone: profile details are needed next
    pub fn confirm_new(&mut self, user_id: ProviderUserId) {
        self.challenge = None;
        self.provider_user_id = Some(user_id);
        self.draft = Some(ProfileDraft::default());
        self.stage = VerificationStage::CompletingProfile;
    }

    /// Keep what the user typed so a failed registration loses nothing
    pub fn store_draft(&mut self, draft: ProfileDraft) {
        self.draft = Some(draft);
    }

    /// Registration succeeded
    pub fn complete_profile(&mut self) {
        self.draft = None;
        self.stage = VerificationStage::Done;
    }

    /// Back to a blank `EnteringPhone` session
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
