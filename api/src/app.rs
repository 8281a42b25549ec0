//! Application factory
//!
//! Builds the Actix-web application around a session factory, so tests can
//! swap in scripted collaborators.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use rj_shared::config::CorsConfig;
use rj_shared::errors::{error_codes, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::json_config;
use crate::middleware::create_cors;
use crate::routes::{self, AppState};
use crate::session::SessionFactory;

/// Create and configure the application with all dependencies
pub fn create_app<F: SessionFactory>(
    app_state: web::Data<AppState<F>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(routes::configure::<F>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "rj-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
