//! Shared utilities and common types for the Raj Motors rider services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Error response structures and error codes
//! - Utility functions (phone validation, field validation)
//! - Response envelopes

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, ConfigError, CorsConfig, Environment, IdentityProviderConfig,
    IdentityProviderKind, LogFormat, LoggingConfig, ServerConfig, VerificationSettings,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::ApiResponse;
pub use utils::{phone, validation};
