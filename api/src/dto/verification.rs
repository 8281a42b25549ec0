use rj_core::domain::{ProfileDraft, VerificationStage};
use rj_core::services::RouteSignal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitPhoneRequest {
    /// Ten local digits, without the country code
    #[validate(length(max = 20, message = "Phone number is too long"))]
    pub phone: String,

    /// Token produced by the reCAPTCHA widget in the browser
    #[serde(default)]
    #[validate(length(min = 1, max = 4096, message = "reCAPTCHA token is malformed"))]
    pub recaptcha_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitOtpRequest {
    #[validate(length(max = 12, message = "Code is too long"))]
    pub code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 4096, message = "reCAPTCHA token is malformed"))]
    pub recaptcha_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteProfileRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 254, message = "Email is too long"))]
    pub email: String,
}

impl From<CompleteProfileRequest> for ProfileDraft {
    fn from(request: CompleteProfileRequest) -> Self {
        ProfileDraft::new(request.name, request.email)
    }
}

/// A code is on its way to the rider
#[derive(Debug, Clone, Serialize)]
pub struct CodeSentResponse {
    pub stage: VerificationStage,
    /// Masked, e.g. `987****210`
    pub phone: Option<String>,
    pub otp_length: usize,
    pub resend_after_seconds: u32,
}

/// Outcome of a step that may finish the flow
#[derive(Debug, Clone, Serialize)]
pub struct StepResponse {
    pub stage: VerificationStage,
    pub next: RouteSignal,
}
