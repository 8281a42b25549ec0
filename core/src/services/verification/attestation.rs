//! Hand-off point for anti-abuse tokens solved outside the server

use std::sync::{Arc, Mutex, MutexGuard};

/// Shared single-token slot.
///
/// The HTTP layer presents the token the browser widget produced; the
/// verifier takes it when the next issuance needs one. Each token is used
/// at most once.
#[derive(Debug, Clone, Default)]
pub struct AttestationSlot {
    token: Arc<Mutex<Option<String>>>,
}

impl AttestationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token, replacing any unused one
    pub fn present(&self, token: impl Into<String>) {
        *self.lock() = Some(token.into());
    }

    pub fn take(&self) -> Option<String> {
        self.lock().take()
    }

    pub fn is_present(&self) -> bool {
        self.lock().is_some()
    }

    pub fn clear(&self) {
        self.lock().take();
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
