//! Request and response bodies

pub mod auth;
pub mod verification;

pub use auth::LogoutResponse;
pub use verification::{
    CodeSentResponse, CompleteProfileRequest, ResendCodeRequest, StepResponse, SubmitOtpRequest,
    SubmitPhoneRequest,
};
