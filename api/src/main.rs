use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use rj_api::{create_app, telemetry, AppState, LiveSessionFactory};
use rj_core::services::VerificationConfig;
use rj_infra::create_otp_challenge;
use rj_shared::AppConfig;

/// How often idle sessions are swept
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        backend = %config.backend.base_url,
        "Starting Raj Motors API server"
    );

    let challenge = create_otp_challenge(&config.identity, &config.verification)
        .context("failed to initialize identity provider")?;
    let factory = LiveSessionFactory::new(
        config.backend.clone(),
        &config.identity,
        challenge,
        VerificationConfig::from(&config.verification),
    );

    let app_state = web::Data::new(AppState::new(
        factory,
        Duration::from_secs(config.server.session_idle_timeout),
    ));
    let sweeper = app_state.sessions.clone().spawn_idle_sweeper(SWEEP_INTERVAL);

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let cors = config.cors.clone();
    let state = app_state.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors))
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    sweeper.abort();
    tracing::info!("Server stopped");
    Ok(())
}
