//! Scripted collaborators shared by the API tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;
use async_trait::async_trait;

use rj_api::session::{SessionFactory, SessionParts, SESSION_COOKIE};
use rj_api::AppState;
use rj_core::domain::PhoneNumber;
use rj_core::errors::RemoteError;
use rj_core::services::{
    AccountRegistry, AttestationSlot, ExistenceCheck, OtpChallenge, PhoneVerificationOrchestrator,
    SessionRevoker, VerificationConfig,
};
use rj_infra::{InfrastructureError, MockIdentityProvider, RecaptchaVerifierFactory};

pub const EXISTING_PHONE: &str = "9876543210";
pub const NEW_PHONE: &str = "9123456780";

/// Rental backend double
#[derive(Default)]
pub struct ScriptedBackend {
    pub registered: Mutex<HashSet<String>>,
    pub registrations: Mutex<Vec<(String, String, String)>>,
    pub check_failure: Mutex<Option<String>>,
    pub register_failure: Mutex<Option<String>>,
    pub logout_failure: Mutex<Option<String>>,
    pub logouts: Mutex<u32>,
}

impl ScriptedBackend {
    pub fn with_registered(phone: &str) -> Self {
        let backend = Self::default();
        backend.registered.lock().unwrap().insert(phone.to_string());
        backend
    }

    pub fn fail_checks(&self, message: &str) {
        *self.check_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_registration(&self, message: &str) {
        *self.register_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_logout(&self, message: &str) {
        *self.logout_failure.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl ExistenceCheck for ScriptedBackend {
    async fn check(&self, phone: &PhoneNumber) -> Result<bool, RemoteError> {
        if let Some(message) = self.check_failure.lock().unwrap().clone() {
            return Err(RemoteError::new(message));
        }
        Ok(self.registered.lock().unwrap().contains(phone.as_str()))
    }
}

#[async_trait]
impl AccountRegistry for ScriptedBackend {
    async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &PhoneNumber,
    ) -> Result<(), RemoteError> {
        if let Some(message) = self.register_failure.lock().unwrap().clone() {
            return Err(RemoteError::new(message));
        }
        self.registrations.lock().unwrap().push((
            name.to_string(),
            email.to_string(),
            phone.as_str().to_string(),
        ));
        self.registered
            .lock()
            .unwrap()
            .insert(phone.as_str().to_string());
        Ok(())
    }
}

#[async_trait]
impl SessionRevoker for ScriptedBackend {
    async fn logout(&self) -> Result<(), RemoteError> {
        *self.logouts.lock().unwrap() += 1;
        match self.logout_failure.lock().unwrap().clone() {
            Some(message) => Err(RemoteError::new(message)),
            None => Ok(()),
        }
    }
}

/// Builds sessions around one scripted backend and the mock identity provider
pub struct TestSessionFactory {
    pub backend: Arc<ScriptedBackend>,
    pub identity: Arc<MockIdentityProvider>,
    pub config: VerificationConfig,
    pub unavailable: bool,
}

impl TestSessionFactory {
    pub fn new(backend: ScriptedBackend) -> Self {
        let config = VerificationConfig::default();
        Self {
            backend: Arc::new(backend),
            identity: Arc::new(MockIdentityProvider::new(config.otp_length)),
            config,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(ScriptedBackend::default())
        }
    }
}

impl SessionFactory for TestSessionFactory {
    type Verifiers = RecaptchaVerifierFactory;

    fn create(&self) -> Result<SessionParts<RecaptchaVerifierFactory>, InfrastructureError> {
        if self.unavailable {
            return Err(InfrastructureError::Config("backend url missing".to_string()));
        }

        let existence: Arc<dyn ExistenceCheck> = self.backend.clone();
        let registry: Arc<dyn AccountRegistry> = self.backend.clone();
        let challenge: Arc<dyn OtpChallenge> = self.identity.clone();
        let revoker: Arc<dyn SessionRevoker> = self.backend.clone();

        let attestation = AttestationSlot::new();
        let verifiers = RecaptchaVerifierFactory::new(attestation.clone(), None);

        Ok(SessionParts {
            orchestrator: PhoneVerificationOrchestrator::new(
                existence,
                registry,
                challenge,
                verifiers,
                self.config.clone(),
            ),
            attestation,
            revoker,
        })
    }
}

/// Shared state plus the handles tests inspect
pub struct TestContext {
    pub state: web::Data<AppState<TestSessionFactory>>,
    pub backend: Arc<ScriptedBackend>,
    pub identity: Arc<MockIdentityProvider>,
}

impl TestContext {
    pub fn new(factory: TestSessionFactory) -> Self {
        let backend = factory.backend.clone();
        let identity = factory.identity.clone();
        Self {
            state: web::Data::new(AppState::new(factory, Duration::from_secs(900))),
            backend,
            identity,
        }
    }

    pub fn with_registered(phone: &str) -> Self {
        Self::new(TestSessionFactory::new(ScriptedBackend::with_registered(phone)))
    }

    pub fn code_for(&self, phone: &str) -> String {
        self.identity
            .latest_code(phone)
            .expect("a code should be pending for this phone")
    }
}

/// The session cookie set on a response
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("response should set the session cookie")
        .into_owned()
}

/// A code of the same length that differs from `code` in every digit
pub fn wrong_code(code: &str) -> String {
    code.chars()
        .map(|c| if c == '0' { '1' } else { '0' })
        .collect()
}
