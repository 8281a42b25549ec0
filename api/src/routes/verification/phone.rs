use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use rj_shared::ApiResponse;
use validator::Validate;

use crate::dto::{CodeSentResponse, SubmitPhoneRequest};
use crate::handlers::ApiError;
use crate::routes::AppState;
use crate::session::{session_cookie, session_id, SessionEntry, SessionFactory};

/// Handler for POST /api/v1/verification/phone
///
/// Checks whether the number belongs to an account and sends a code.
/// Starts a session (and sets the `rj_verification` cookie) when the caller
/// has none or their previous flow already finished.
///
/// # Request Body
///
/// ```json
/// {
///     "phone": "9876543210",
///     "recaptcha_token": "03AFcWeA..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "stage": "awaiting_otp",
///         "phone": "987****210",
///         "otp_length": 6,
///         "resend_after_seconds": 30
///     },
///     "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Not a ten-digit number
/// - 409 Conflict: A code is already pending, or another request is in flight
/// - 502 Bad Gateway: Backend unreachable or the provider refused to send
pub async fn submit_phone<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
    body: web::Json<SubmitPhoneRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let request = body.into_inner();

    let (entry, created) = session_for_phone(&state, &req).await?;
    let mut parts = entry.try_claim().ok_or(ApiError::OperationInProgress)?;
    if let Some(token) = request.recaptcha_token {
        parts.attestation.present(token);
    }

    let outcome = parts.orchestrator.submit_phone(&request.phone).await;
    let snapshot = parts.orchestrator.snapshot();
    drop(parts);

    let mut response = match outcome {
        Ok(sent) => HttpResponse::Ok().json(ApiResponse::success(CodeSentResponse {
            stage: snapshot.stage,
            phone: snapshot.phone,
            otp_length: snapshot.otp_length,
            resend_after_seconds: sent.resend_after_seconds,
        })),
        Err(error) => ApiError::from(error).error_response(),
    };

    // Set even when the first attempt failed
    if created {
        if let Err(error) = response.add_cookie(&session_cookie(entry.id())) {
            tracing::warn!(error = %error, "Failed to set session cookie");
        }
    }
    Ok(response)
}

/// Reuse the caller's session unless it is missing or finished
async fn session_for_phone<F: SessionFactory>(
    state: &AppState<F>,
    req: &HttpRequest,
) -> Result<(Arc<SessionEntry<F::Verifiers>>, bool), ApiError> {
    if let Some(id) = session_id(req) {
        if let Some(entry) = state.sessions.get(id).await {
            let finished = entry
                .try_claim()
                .map(|parts| parts.orchestrator.stage().is_terminal());
            if finished != Some(true) {
                return Ok((entry, false));
            }
            state.sessions.remove(id).await;
        }
    }

    let parts = state.factory.create().map_err(ApiError::SessionUnavailable)?;
    Ok((state.sessions.insert(parts).await, true))
}
