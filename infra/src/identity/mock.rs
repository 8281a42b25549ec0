//! Mock identity provider for development
//!
//! Generates a random code, writes it to the log instead of sending an SMS,
//! and accepts that code exactly once per challenge.

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

use rj_core::domain::{ChallengeHandle, OtpCode, PhoneNumber, ProviderUserId};
use rj_core::errors::ChallengeError;
use rj_core::services::{AntiAbuseVerifier, OtpChallenge};

struct PendingChallenge {
    phone: String,
    code: String,
}

pub struct MockIdentityProvider {
    otp_length: usize,
    pending: Mutex<HashMap<String, PendingChallenge>>,
}

impl MockIdentityProvider {
    pub fn new(otp_length: usize) -> Self {
        Self {
            otp_length,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Unconfirmed code issued for `phone`, if any
    pub fn latest_code(&self, phone: &str) -> Option<String> {
        self.pending
            .lock()
            .ok()?
            .values()
            .find(|p| p.phone == phone)
            .map(|p| p.code.clone())
    }

    /// Number of challenges still waiting for confirmation
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.otp_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    fn generate_handle() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        format!("mock-session-{}", suffix)
    }
}

#[async_trait]
impl OtpChallenge for MockIdentityProvider {
    async fn issue(
        &self,
        phone: &PhoneNumber,
        verifier: &dyn AntiAbuseVerifier,
    ) -> Result<ChallengeHandle, ChallengeError> {
        verifier.token().await?;

        let code = self.generate_code();
        let handle = Self::generate_handle();

        let mut pending = self
            .pending
            .lock()
            .map_err(|_| ChallengeError::issuance("mock provider state poisoned"))?;
        // A newer challenge for the same phone replaces older ones
        pending.retain(|_, p| p.phone != phone.as_str());
        pending.insert(
            handle.clone(),
            PendingChallenge {
                phone: phone.as_str().to_string(),
                code: code.clone(),
            },
        );

        info!(
            phone = %phone.masked(),
            code = %code,
            event = "mock_otp_issued",
            "Mock OTP issued"
        );

        Ok(ChallengeHandle::new(handle))
    }

    async fn confirm(
        &self,
        handle: &ChallengeHandle,
        code: &OtpCode,
    ) -> Result<ProviderUserId, ChallengeError> {
        let challenge = self
            .pending
            .lock()
            .map_err(|_| ChallengeError::unavailable("mock provider state poisoned"))?
            .remove(handle.as_str());

        match challenge {
            Some(challenge) if challenge.code == code.as_str() => {
                Ok(ProviderUserId::new(format!("mock-{}", challenge.phone)))
            }
            Some(challenge) => {
                warn!(
                    phone = %rj_shared::phone::mask_phone_number(&challenge.phone),
                    event = "mock_otp_rejected",
                    "Mock OTP mismatch"
                );
                Err(ChallengeError::InvalidOrExpiredCode)
            }
            None => Err(ChallengeError::InvalidOrExpiredCode),
        }
    }
}
