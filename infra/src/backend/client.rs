//! reqwest client for the rental backend auth endpoints

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use rj_core::domain::PhoneNumber;
use rj_core::errors::RemoteError;
use rj_core::services::{AccountRegistry, ExistenceCheck, SessionRevoker};
use rj_shared::config::BackendConfig;

use crate::InfrastructureError;

use super::outcome::{BackendOutcome, BackendReply};

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const LOGOUT_PATH: &str = "/auth/logout";

#[derive(Serialize)]
struct LoginRequest<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
}

/// Backend client owning one cookie jar.
///
/// The session cookie set by `/auth/login` or `/auth/signup` is stored in the
/// jar and sent back on later calls; nothing here reads it. Build one client
/// per verification session so jars are never shared between riders.
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a client with its own cookie store
    pub fn new(config: &BackendConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "backend base_url must not be empty".to_string(),
            ));
        }

        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST `body` to `path` and decode the `{success, message}` reply.
    ///
    /// 4xx replies are decoded like 2xx ones; the backend answers unknown
    /// phones with a client-error status and a well-formed body. Transport
    /// failures, undecodable bodies and 5xx replies are errors.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<BackendOutcome, RemoteError> {
        let url = self.config.endpoint(path);
        let mut request = self.http.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(InfrastructureError::from)?;
        let status = response.status();

        match response.json::<BackendReply>().await {
            Ok(reply) if status.is_server_error() => {
                let outcome = BackendOutcome::from(reply);
                warn!(
                    path = path,
                    status = status.as_u16(),
                    "Backend reported a server error"
                );
                Err(RemoteError::new(outcome.message().map(str::to_string).unwrap_or_else(
                    || format!("Server error (status {})", status.as_u16()),
                )))
            }
            Ok(reply) => {
                let outcome = BackendOutcome::from(reply);
                debug!(
                    path = path,
                    status = status.as_u16(),
                    success = outcome.is_success(),
                    "Backend replied"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(
                    path = path,
                    status = status.as_u16(),
                    error = %e,
                    "Backend reply could not be decoded"
                );
                Err(RemoteError::new(format!(
                    "Unexpected response from server (status {})",
                    status.as_u16()
                )))
            }
        }
    }
}

#[async_trait]
impl ExistenceCheck for BackendClient {
    async fn check(&self, phone: &PhoneNumber) -> Result<bool, RemoteError> {
        let outcome = self
            .post(LOGIN_PATH, Some(&LoginRequest { phone: phone.as_str() }))
            .await?;
        Ok(outcome.is_success())
    }
}

#[async_trait]
impl AccountRegistry for BackendClient {
    async fn register(&self, name: &str, email: &str, phone: &PhoneNumber) -> Result<(), RemoteError> {
        let request = SignupRequest {
            name,
            email,
            phone: phone.as_str(),
        };
        match self.post(SIGNUP_PATH, Some(&request)).await? {
            BackendOutcome::Success { .. } => Ok(()),
            BackendOutcome::Failure { message } => Err(RemoteError::new(
                message.unwrap_or_else(|| "Registration failed".to_string()),
            )),
        }
    }
}

#[async_trait]
impl SessionRevoker for BackendClient {
    async fn logout(&self) -> Result<(), RemoteError> {
        match self.post::<()>(LOGOUT_PATH, None).await? {
            BackendOutcome::Success { .. } => Ok(()),
            BackendOutcome::Failure { message } => Err(RemoteError::new(
                message.unwrap_or_else(|| "Logout failed".to_string()),
            )),
        }
    }
}
