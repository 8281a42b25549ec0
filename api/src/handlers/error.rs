//! HTTP error mapping
//!
//! Every failure leaving a handler goes through [`ApiError`], which renders
//! the shared [`ErrorResponse`] body with a status chosen per error kind.

use actix_web::http::{header, StatusCode};
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse, ResponseError};
use rj_core::errors::{ChallengeError, ValidationFailure, VerificationError};
use rj_infra::InfrastructureError;
use rj_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use rj_shared::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Request body failed shape checks before reaching the flow
    #[error("Invalid request")]
    InvalidRequest(FieldErrors),

    #[error("No verification in progress")]
    SessionNotFound,

    /// Another operation holds the session
    #[error("Another request for this verification is still in progress")]
    OperationInProgress,

    #[error("Verification is temporarily unavailable")]
    SessionUnavailable(#[source] InfrastructureError),
}

impl ApiError {
    /// Single-field request error
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.add(field, message);
        ApiError::InvalidRequest(fields)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                fields.add(field, message);
            }
        }
        ApiError::InvalidRequest(fields)
    }
}

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Verification(error) => error.to_error_response(),
            ApiError::InvalidRequest(fields) => {
                ErrorResponse::new(error_codes::BAD_REQUEST, self.to_string())
                    .add_detail("fields", fields)
            }
            ApiError::SessionNotFound => {
                ErrorResponse::new(error_codes::SESSION_NOT_FOUND, self.to_string())
            }
            ApiError::OperationInProgress => {
                ErrorResponse::new(error_codes::OPERATION_IN_PROGRESS, self.to_string())
            }
            ApiError::SessionUnavailable(_) => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, self.to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Verification(error) => match error {
                VerificationError::Validation(ValidationFailure::StageMismatch { .. }) => {
                    StatusCode::CONFLICT
                }
                VerificationError::Validation(_) => StatusCode::BAD_REQUEST,
                VerificationError::Remote(_) => StatusCode::BAD_GATEWAY,
                VerificationError::Challenge(ChallengeError::IssuanceFailed { .. }) => {
                    StatusCode::BAD_GATEWAY
                }
                VerificationError::Challenge(ChallengeError::InvalidOrExpiredCode) => {
                    StatusCode::UNAUTHORIZED
                }
                VerificationError::Challenge(ChallengeError::ProviderUnavailable { .. }) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                VerificationError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            },
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::OperationInProgress => StatusCode::CONFLICT,
            ApiError::SessionUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut response = HttpResponse::build(status);
        if let ApiError::Verification(VerificationError::CooldownActive { remaining_seconds }) =
            self
        {
            response.insert_header((header::RETRY_AFTER, remaining_seconds.to_string()));
        }
        response.json(self.to_error_response())
    }
}

/// JSON extractor settings: malformed bodies become `BAD_REQUEST` responses
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|error: JsonPayloadError, _req: &HttpRequest| {
            ApiError::invalid_field("body", error.to_string()).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rj_core::domain::VerificationStage;
    use rj_core::errors::RemoteError;

    fn status_of(error: impl Into<ApiError>) -> StatusCode {
        error.into().status_code()
    }

    #[test]
    fn test_verification_error_status_mapping() {
        assert_eq!(
            status_of(VerificationError::from(ValidationFailure::InvalidPhoneFormat)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(VerificationError::from(ValidationFailure::StageMismatch {
                expected: VerificationStage::AwaitingOtp,
                actual: VerificationStage::EnteringPhone,
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(VerificationError::from(RemoteError::new("down"))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(VerificationError::from(ChallengeError::issuance("quota"))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(VerificationError::from(ChallengeError::InvalidOrExpiredCode)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(VerificationError::from(ChallengeError::unavailable("timeout"))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(VerificationError::CooldownActive { remaining_seconds: 5 }),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_session_errors() {
        assert_eq!(ApiError::SessionNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::OperationInProgress.status_code(), StatusCode::CONFLICT);

        let response = ApiError::OperationInProgress.to_error_response();
        assert_eq!(response.error, error_codes::OPERATION_IN_PROGRESS);
    }

    #[test]
    fn test_cooldown_sets_retry_after() {
        let response =
            ApiError::from(VerificationError::CooldownActive { remaining_seconds: 17 })
                .error_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "17");
    }

    #[test]
    fn test_remote_message_is_kept_verbatim() {
        let response =
            ApiError::from(VerificationError::from(RemoteError::new("User already exists")))
                .to_error_response();

        assert_eq!(response.error, error_codes::REMOTE_ERROR);
        assert_eq!(response.message, "User already exists");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = ApiError::SessionUnavailable(InfrastructureError::Config(
            "backend.base_url must not be empty".to_string(),
        ));
        let response = error.to_error_response();

        assert_eq!(response.error, error_codes::INTERNAL_ERROR);
        assert!(!response.message.contains("base_url"));
    }
}
