use actix_web::{web, HttpRequest, HttpResponse};
use rj_shared::ApiResponse;

use crate::handlers::ApiError;
use crate::routes::AppState;
use crate::session::SessionFactory;

use super::current_session;

/// Handler for POST /api/v1/verification/change-number
///
/// Drops the pending code and returns to phone entry.
pub async fn change_number<F: SessionFactory>(
    req: HttpRequest,
    state: web::Data<AppState<F>>,
) -> Result<HttpResponse, ApiError> {
    let entry = current_session(&state, &req).await?;
    let mut parts = entry.try_claim().ok_or(ApiError::OperationInProgress)?;

    parts.orchestrator.change_number()?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(parts.orchestrator.snapshot())))
}
