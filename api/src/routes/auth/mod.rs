//! Rider account routes

pub mod logout;
