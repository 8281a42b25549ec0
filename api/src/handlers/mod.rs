//! Request handling helpers shared by all routes

pub mod error;

pub use error::{json_config, ApiError};
