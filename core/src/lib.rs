//! # Raj Motors Core
//!
//! Core domain layer for rider phone verification.
//! This crate contains the domain value objects, the verification session,
//! the error taxonomy, the collaborator contracts (backend, identity
//! provider, anti-abuse verifier) and the orchestrator that sequences them.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
