//! Firebase Identity Toolkit phone authentication
//!
//! Issuance posts the E.164 number and a reCAPTCHA token and receives a
//! `sessionInfo`, which is the challenge handle. Confirmation posts the
//! `sessionInfo` and the code and receives the provider user id.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use rj_core::domain::{ChallengeHandle, OtpCode, PhoneNumber, ProviderUserId};
use rj_core::errors::ChallengeError;
use rj_core::services::{AntiAbuseVerifier, OtpChallenge};
use rj_shared::config::IdentityProviderConfig;

use crate::InfrastructureError;

const SEND_CODE_PATH: &str = "accounts:sendVerificationCode";
const SIGN_IN_PATH: &str = "accounts:signInWithPhoneNumber";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendVerificationCodeRequest<'a> {
    phone_number: &'a str,
    recaptcha_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendVerificationCodeResponse {
    session_info: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithPhoneNumberRequest<'a> {
    session_info: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithPhoneNumberResponse {
    local_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firebase phone auth over the Identity Toolkit REST API
pub struct FirebasePhoneAuth {
    http: Client,
    api_key: String,
    base_url: String,
    country_code: String,
}

impl FirebasePhoneAuth {
    pub fn new(config: &IdentityProviderConfig, country_code: &str) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "identity.api_key is required for the firebase provider".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country_code: country_code.to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn post<B: Serialize>(&self, method: &str, body: &B) -> Result<Response, reqwest::Error> {
        self.http
            .post(self.url(method))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
    }

    /// Provider error code such as `INVALID_CODE`, or a generic fallback
    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => format!("identity provider returned status {}", status.as_u16()),
        }
    }
}

/// Provider errors that blame the code or its session, not the provider.
/// Messages look like `INVALID_CODE` or `INVALID_CODE : details`.
fn is_code_rejection(message: &str) -> bool {
    let code = message.split([' ', ':']).next().unwrap_or_default();
    matches!(
        code,
        "INVALID_CODE" | "INVALID_SESSION_INFO" | "SESSION_EXPIRED" | "CODE_EXPIRED"
    )
}

#[async_trait]
impl OtpChallenge for FirebasePhoneAuth {
    async fn issue(
        &self,
        phone: &PhoneNumber,
        verifier: &dyn AntiAbuseVerifier,
    ) -> Result<ChallengeHandle, ChallengeError> {
        let recaptcha_token = verifier.token().await?;
        let phone_number = phone.with_country_code(&self.country_code);
        let request = SendVerificationCodeRequest {
            phone_number: &phone_number,
            recaptcha_token: &recaptcha_token,
        };

        let response = self
            .post(SEND_CODE_PATH, &request)
            .await
            .map_err(|e| ChallengeError::issuance(e.to_string()))?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            warn!(
                phone = %phone.masked(),
                provider_error = %message,
                "Firebase refused to send verification code"
            );
            return Err(ChallengeError::issuance(message));
        }

        let body: SendVerificationCodeResponse = response
            .json()
            .await
            .map_err(|e| ChallengeError::issuance(InfrastructureError::from(e).to_string()))?;

        debug!(phone = %phone.masked(), "Firebase verification code sent");
        Ok(ChallengeHandle::new(body.session_info))
    }

    async fn confirm(
        &self,
        handle: &ChallengeHandle,
        code: &OtpCode,
    ) -> Result<ProviderUserId, ChallengeError> {
        let request = SignInWithPhoneNumberRequest {
            session_info: handle.as_str(),
            code: code.as_str(),
        };

        let response = self
            .post(SIGN_IN_PATH, &request)
            .await
            .map_err(|e| ChallengeError::unavailable(e.to_string()))?;
        let status = response.status();

        if status.is_server_error() {
            let message = Self::error_message(response).await;
            return Err(ChallengeError::unavailable(message));
        }
        if !status.is_success() {
            let message = Self::error_message(response).await;
            if is_code_rejection(&message) {
                debug!(provider_error = %message, "Firebase rejected verification code");
                return Err(ChallengeError::InvalidOrExpiredCode);
            }
            warn!(provider_error = %message, "Firebase refused to confirm verification code");
            return Err(ChallengeError::unavailable(message));
        }

        let body: SignInWithPhoneNumberResponse = response.json().await.map_err(|e| {
            ChallengeError::unavailable(
                InfrastructureError::Identity(format!("malformed sign-in reply: {}", e)).to_string(),
            )
        })?;

        Ok(ProviderUserId::new(body.local_id))
    }
}
