//! Configuration for the verification orchestrator

use rj_shared::config::VerificationSettings;

/// Tunables the orchestrator needs at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Digits in an OTP; must match what the provider issues
    pub otp_length: usize,
    /// Seconds before a new code may be requested
    pub resend_cooldown_seconds: u32,
    /// UI anchor the anti-abuse verifier is bound to
    pub anchor_id: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self::from(&VerificationSettings::default())
    }
}

impl From<&VerificationSettings> for VerificationConfig {
    fn from(settings: &VerificationSettings) -> Self {
        Self {
            otp_length: settings.otp_length,
            resend_cooldown_seconds: settings.resend_cooldown_seconds,
            anchor_id: settings.anchor_id.clone(),
        }
    }
}
