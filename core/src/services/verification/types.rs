//! Types returned by the verification orchestrator

use serde::Serialize;

use crate::domain::entities::VerificationStage;
use crate::domain::value_objects::{PhoneNumber, ProfileDraft, ProviderUserId};

/// A code was issued; resend is blocked for `resend_after_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeSent {
    pub resend_after_seconds: u32,
}

/// Where the UI should navigate after a successful step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum RouteSignal {
    Home,
    CompleteProfile {
        phone: PhoneNumber,
        user_id: ProviderUserId,
    },
}

/// Read-only view of a session for status endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationSnapshot {
    pub stage: VerificationStage,
    /// Masked phone, e.g. `987****210`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    pub resend_cooldown_seconds: u32,
    pub can_resend: bool,
    pub otp_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<ProfileDraft>,
}
