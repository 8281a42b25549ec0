//! Rental backend client
//!
//! The backend speaks a loose `{success, message}` JSON shape on every auth
//! endpoint. Replies are decoded once into [`BackendOutcome`] and never
//! inspected ad hoc.

mod client;
mod outcome;


pub use client::{BackendClient, LOGIN_PATH, LOGOUT_PATH, SIGNUP_PATH};
pub use outcome::BackendOutcome;
