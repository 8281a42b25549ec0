//! Per-visitor verification sessions
//!
//! Each browser gets its own orchestrator, backend cookie jar and
//! attestation slot, addressed by the `rj_verification` cookie.

pub mod cookie;
pub mod factory;
pub mod store;

pub use cookie::{expired_session_cookie, session_cookie, session_id};
pub use factory::{LiveSessionFactory, SessionFactory, SessionOrchestrator, SessionParts};
pub use store::{SessionEntry, SessionStore, SESSION_COOKIE};
