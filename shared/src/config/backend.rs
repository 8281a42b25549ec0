//! Rental backend configuration

use serde::{Deserialize, Serialize};

/// Production rental backend
pub const DEFAULT_BACKEND_URL: &str = "https://raj-motors.onrender.com";

/// Rental backend HTTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash
    pub base_url: String,

    /// Timeout for a single backend request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BACKEND_URL),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    /// Create a backend configuration for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_request_timeout() -> u64 {
    15
}
