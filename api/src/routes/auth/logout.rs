use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use rj_shared::ApiResponse;

use crate::dto::LogoutResponse;
use crate::handlers::ApiError;
use crate::routes::verification::current_session;
use crate::routes::AppState;
use crate::session::{expired_session_cookie, SessionFactory};

/// Handler for POST /api/v1/auth/logout
///
/// Ends the rider's backend session through the same cookie jar that signed
/// them in, then forgets the local session. A backend failure is logged and
/// reported in `backend_acknowledged`; the local session is removed anyway.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "Logged out successfully",
///         "backend_acknowledged": true
///     },
///     "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 404 Not Found: No session cookie
pub async fn logout<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
) -> Result<HttpResponse, ApiError> {
    let entry = current_session(&state, &req).await?;
    let revoker = {
        let mut parts = entry.claim().await;
        parts.orchestrator.abandon();
        Arc::clone(&parts.revoker)
    };
    state.sessions.remove(entry.id()).await;

    let backend_acknowledged = match revoker.logout().await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(error = %error, event = "logout_failed", "Backend logout failed");
            false
        }
    };

    Ok(HttpResponse::Ok()
        .cookie(expired_session_cookie())
        .json(ApiResponse::success(LogoutResponse {
            message: "Logged out successfully".to_string(),
            backend_acknowledged,
        })))
}
