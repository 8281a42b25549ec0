//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `backend` - Rental backend HTTP endpoint
//! - `environment` - Deployment stage detection
//! - `logging` - Log output settings
//! - `identity` - Identity provider used for OTP delivery
//! - `server` - HTTP server and CORS configuration
//! - `verification` - Phone verification flow constants
//!
//! Values are layered: environment defaults, then an optional
//! `config.{environment}.toml`, then `RJ__`-prefixed environment variables
//! (for example `RJ__VERIFICATION__OTP_LENGTH=4`).

pub mod backend;
pub mod environment;
pub mod logging;
pub mod identity;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use backend::BackendConfig;
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
pub use identity::{IdentityProviderConfig, IdentityProviderKind};
pub use server::{CorsConfig, ServerConfig};
pub use verification::VerificationSettings;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "RJ";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rental backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Identity provider configuration
    #[serde(default)]
    pub identity: IdentityProviderConfig,

    /// Phone verification flow configuration
    #[serde(default)]
    pub verification: VerificationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            backend: BackendConfig::new("http://localhost:3000"),
            identity: IdentityProviderConfig::mock(),
            verification: VerificationSettings::default(),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
            backend: BackendConfig::default(),
            identity: IdentityProviderConfig::default(),
            verification: VerificationSettings::default(),
        }
    }

    /// Defaults for a given environment, before any file or env overrides
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Load configuration from `.env`, the environment's TOML file and
    /// `RJ__` environment variables, then validate it
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = Environment::from_env();

        let defaults = ::config::Config::try_from(&Self::for_environment(env))?;
        let settings = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::with_name(&env.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VerificationSettings::SUPPORTED_OTP_LENGTHS.contains(&self.verification.otp_length) {
            return Err(ConfigError::invalid(
                "verification.otp_length",
                format!(
                    "must be one of {:?}, got {}",
                    VerificationSettings::SUPPORTED_OTP_LENGTHS,
                    self.verification.otp_length
                ),
            ));
        }

        if self.verification.anchor_id.trim().is_empty() {
            return Err(ConfigError::invalid("verification.anchor_id", "must not be empty"));
        }

        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("backend.base_url", "must not be empty"));
        }

        if self.identity.provider == IdentityProviderKind::Firebase
            && self.identity.api_key.trim().is_empty()
        {
            return Err(ConfigError::invalid(
                "identity.api_key",
                "required when the firebase provider is selected",
            ));
        }

        Ok(())
    }
}
