//! Phone verification flow configuration

use serde::{Deserialize, Serialize};

/// Settings shared by the verification flow and its presentation layer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationSettings {
    /// Number of digits in an OTP code
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,

    /// Seconds before another code may be requested
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: u32,

    /// Country code prepended for SMS delivery; never stored with the number
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// DOM anchor the anti-abuse widget is rendered into
    #[serde(default = "default_anchor_id")]
    pub anchor_id: String,
}

impl VerificationSettings {
    /// OTP lengths the identity providers are deployed with
    pub const SUPPORTED_OTP_LENGTHS: [usize; 2] = [4, 6];
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            otp_length: default_otp_length(),
            resend_cooldown_seconds: default_resend_cooldown(),
            country_code: default_country_code(),
            anchor_id: default_anchor_id(),
        }
    }
}

fn default_otp_length() -> usize {
    6
}

fn default_resend_cooldown() -> u32 {
    30
}

fn default_country_code() -> String {
    String::from("+91")
}

fn default_anchor_id() -> String {
    String::from("recaptcha-container")
}
