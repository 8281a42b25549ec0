use actix_web::{web, HttpRequest, HttpResponse};
use rj_shared::ApiResponse;
use validator::Validate;

use crate::dto::{CompleteProfileRequest, StepResponse};
use crate::handlers::ApiError;
use crate::routes::AppState;
use crate::session::SessionFactory;

use super::current_session;

/// Handler for POST /api/v1/verification/profile
///
/// Registers a new rider with the verified phone.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Asha",
///     "email": "asha@example.com"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: `details.fields` names each invalid field
/// - 409 Conflict: Phone not verified yet, or another request is in flight
/// - 502 Bad Gateway: Backend refused the signup; its message is passed through
pub async fn complete_profile<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
    body: web::Json<CompleteProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let entry = current_session(&state, &req).await?;
    let mut parts = entry.try_claim().ok_or(ApiError::OperationInProgress)?;

    let next = parts
        .orchestrator
        .complete_profile(body.into_inner().into())
        .await?;
    let stage = parts.orchestrator.stage();

    Ok(HttpResponse::Ok().json(ApiResponse::success(StepResponse { stage, next })))
}
