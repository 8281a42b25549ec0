//! Identity provider configuration

use serde::{Deserialize, Serialize};

/// Firebase Identity Toolkit REST endpoint
pub const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Which identity provider delivers and confirms OTP codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProviderKind {
    /// Firebase phone authentication over the Identity Toolkit REST API
    Firebase,
    /// In-process provider that logs codes instead of sending SMS
    Mock,
}

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityProviderConfig {
    /// Selected provider
    pub provider: IdentityProviderKind,

    /// Web API key of the Firebase project
    #[serde(default)]
    pub api_key: String,

    /// Identity Toolkit base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// reCAPTCHA site key handed to the browser widget
    #[serde(default)]
    pub recaptcha_site_key: String,

    /// Token used when the browser does not present one (test phone numbers, mock provider)
    #[serde(default)]
    pub test_recaptcha_token: String,

    /// Timeout for a single provider request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            provider: IdentityProviderKind::Firebase,
            api_key: String::new(),
            base_url: default_base_url(),
            recaptcha_site_key: String::new(),
            test_recaptcha_token: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl IdentityProviderConfig {
    /// Configuration for the in-process mock provider
    pub fn mock() -> Self {
        Self {
            provider: IdentityProviderKind::Mock,
            test_recaptcha_token: String::from("mock-recaptcha-token"),
            ..Default::default()
        }
    }

    /// Fallback anti-abuse token, if one is configured
    pub fn fallback_token(&self) -> Option<&str> {
        let token = self.test_recaptcha_token.trim();
        (!token.is_empty()).then_some(token)
    }
}

fn default_base_url() -> String {
    String::from(DEFAULT_IDENTITY_TOOLKIT_URL)
}

fn default_request_timeout() -> u64 {
    20
}
