//! Phone verification endpoints
//!
//! - `POST /verification/phone` - submit the phone number, send a code
//! - `POST /verification/otp` - confirm the code
//! - `POST /verification/resend` - send a new code once the countdown elapsed
//! - `POST /verification/profile` - finish a new rider's account
//! - `POST /verification/change-number` - go back to phone entry
//! - `GET /verification` - current state
//! - `DELETE /verification` - abandon the flow

pub mod change_number;
pub mod otp;
pub mod phone;
pub mod profile;
pub mod resend;
pub mod status;

use std::sync::Arc;

use actix_web::HttpRequest;

use crate::handlers::ApiError;
use crate::session::{session_id, SessionEntry, SessionFactory};

use super::AppState;

/// The caller's live session, or `SESSION_NOT_FOUND`
pub(crate) async fn current_session<F: SessionFactory>(
    state: &AppState<F>,
    req: &HttpRequest,
) -> Result<Arc<SessionEntry<F::Verifiers>>, ApiError> {
    let id = session_id(req).ok_or(ApiError::SessionNotFound)?;
    state.sessions.get(id).await.ok_or(ApiError::SessionNotFound)
}
