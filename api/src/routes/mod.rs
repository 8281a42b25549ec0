//! Route handlers and shared application state

pub mod auth;
pub mod verification;

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use crate::session::{SessionFactory, SessionStore};

/// Application state shared by all handlers
pub struct AppState<F: SessionFactory> {
    pub sessions: Arc<SessionStore<F::Verifiers>>,
    pub factory: F,
}

impl<F: SessionFactory> AppState<F> {
    pub fn new(factory: F, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(idle_timeout)),
            factory,
        }
    }
}

/// Register every `/api/v1` route
pub fn configure<F: SessionFactory>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/verification")
            .route("", web::get().to(verification::status::snapshot::<F>))
            .route("", web::delete().to(verification::status::abandon::<F>))
            .route("/phone", web::post().to(verification::phone::submit_phone::<F>))
            .route("/otp", web::post().to(verification::otp::submit_otp::<F>))
            .route("/resend", web::post().to(verification::resend::resend_code::<F>))
            .route("/profile", web::post().to(verification::profile::complete_profile::<F>))
            .route(
                "/change-number",
                web::post().to(verification::change_number::change_number::<F>),
            ),
    )
    .service(web::scope("/auth").route("/logout", web::post().to(auth::logout::logout::<F>)));
}
