//! # Raj Motors API
//!
//! HTTP front for rider phone verification. Each browser session owns one
//! verification orchestrator; routes translate requests into orchestrator
//! operations and errors into JSON error bodies.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
pub use session::{LiveSessionFactory, SessionFactory};
