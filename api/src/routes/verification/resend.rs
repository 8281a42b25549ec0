use actix_web::{web, HttpRequest, HttpResponse};
use rj_shared::ApiResponse;
use validator::Validate;

use crate::dto::{CodeSentResponse, ResendCodeRequest};
use crate::handlers::ApiError;
use crate::routes::AppState;
use crate::session::SessionFactory;

use super::current_session;

/// Handler for POST /api/v1/verification/resend
///
/// Sends a new code once the countdown has elapsed. The body is optional and
/// only carries a fresh reCAPTCHA token.
///
/// ## Errors
/// - 404 Not Found: No verification in progress
/// - 409 Conflict: Another request is in flight
/// - 429 Too Many Requests: Countdown still running (`Retry-After` is set)
/// - 502 Bad Gateway: Provider refused to send; the previous code stays valid
pub async fn resend_code<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
    body: Option<web::Json<ResendCodeRequest>>,
) -> Result<HttpResponse, ApiError> {
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    request.validate()?;

    let entry = current_session(&state, &req).await?;
    let mut parts = entry.try_claim().ok_or(ApiError::OperationInProgress)?;
    if let Some(token) = request.recaptcha_token {
        parts.attestation.present(token);
    }

    let sent = parts.orchestrator.resend_code().await?;
    let snapshot = parts.orchestrator.snapshot();

    Ok(HttpResponse::Ok().json(ApiResponse::success(CodeSentResponse {
        stage: snapshot.stage,
        phone: snapshot.phone,
        otp_length: snapshot.otp_length,
        resend_after_seconds: sent.resend_after_seconds,
    })))
}
