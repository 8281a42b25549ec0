//! Identity Provider Module
//!
//! OTP issuance and confirmation behind the `OtpChallenge` contract.
//!
//! ## Providers
//!
//! - **Firebase**: Identity Toolkit REST API (`accounts:sendVerificationCode`,
//!   `accounts:signInWithPhoneNumber`)
//! - **Mock**: development stand-in that logs the code instead of sending it
//!
//! The anti-abuse side is [`RecaptchaVerifier`], fed with tokens the browser
//! widget produced.

use std::sync::Arc;

use rj_core::services::OtpChallenge;
use rj_shared::config::{IdentityProviderConfig, IdentityProviderKind, VerificationSettings};

use crate::InfrastructureError;

pub mod firebase;
pub mod mock;
pub mod recaptcha;

#[cfg(test)]
mod tests;

pub use firebase::FirebasePhoneAuth;
pub use mock::MockIdentityProvider;
pub use recaptcha::{RecaptchaVerifier, RecaptchaVerifierFactory};

/// Create the identity provider named in configuration
///
/// # Arguments
///
/// * `identity` - provider selection and credentials
/// * `verification` - OTP length and country code shared with the orchestrator
pub fn create_otp_challenge(
    identity: &IdentityProviderConfig,
    verification: &VerificationSettings,
) -> Result<Arc<dyn OtpChallenge>, InfrastructureError> {
    match identity.provider {
        IdentityProviderKind::Firebase => {
            let provider = FirebasePhoneAuth::new(identity, &verification.country_code)?;
            tracing::info!(
                provider = "firebase",
                base_url = %identity.base_url,
                "Identity provider initialized"
            );
            Ok(Arc::new(provider))
        }
        IdentityProviderKind::Mock => {
            tracing::warn!(
                provider = "mock",
                "Using mock identity provider; OTP codes are written to the log"
            );
            Ok(Arc::new(MockIdentityProvider::new(verification.otp_length)))
        }
    }
}
