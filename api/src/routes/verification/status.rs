use actix_web::{web, HttpRequest, HttpResponse};
use rj_shared::ApiResponse;

use crate::handlers::ApiError;
use crate::routes::AppState;
use crate::session::{expired_session_cookie, SessionFactory};

use super::current_session;

/// Handler for GET /api/v1/verification
///
/// ```json
/// {
///     "success": true,
///     "data": {
///         "stage": "awaiting_otp",
///         "phone": "987****210",
///         "resend_cooldown_seconds": 12,
///         "can_resend": false,
///         "otp_length": 6
///     },
///     "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
pub async fn snapshot<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
) -> Result<HttpResponse, ApiError> {
    let entry = current_session(&state, &req).await?;
    let parts = entry.claim().await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(parts.orchestrator.snapshot())))
}

/// Handler for DELETE /api/v1/verification
///
/// Abandons the flow, forgets the session and expires its cookie.
pub async fn abandon<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
) -> Result<HttpResponse, ApiError> {
    let entry = current_session(&state, &req).await?;
    entry.claim().await.orchestrator.abandon();
    state.sessions.remove(entry.id()).await;

    Ok(HttpResponse::NoContent()
        .cookie(expired_session_cookie())
        .finish())
}
