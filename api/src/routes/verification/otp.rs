use actix_web::{web, HttpRequest, HttpResponse};
use rj_shared::ApiResponse;
use validator::Validate;

use crate::dto::{StepResponse, SubmitOtpRequest};
use crate::handlers::ApiError;
use crate::routes::AppState;
use crate::session::SessionFactory;

use super::current_session;

/// Handler for POST /api/v1/verification/otp
///
/// Confirms the code. Existing riders are done (`next.route == "home"`);
/// new riders move on to profile completion.
///
/// # Request Body
///
/// ```json
/// { "code": "123456" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "stage": "completing_profile",
///         "next": {
///             "route": "complete_profile",
///             "phone": "9876543210",
///             "user_id": "kX2..."
///         }
///     },
///     "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Code shorter than the configured length
/// - 401 Unauthorized: Wrong or expired code
/// - 404 Not Found: No verification in progress
/// - 409 Conflict: No code pending, or another request is in flight
/// - 503 Service Unavailable: Identity provider unreachable
pub async fn submit_otp<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
    body: web::Json<SubmitOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let entry = current_session(&state, &req).await?;
    let mut parts = entry.try_claim().ok_or(ApiError::OperationInProgress)?;

    let next = parts.orchestrator.submit_otp(&body.code).await?;
    let stage = parts.orchestrator.stage();

    Ok(HttpResponse::Ok().json(ApiResponse::success(StepResponse { stage, next })))
}
