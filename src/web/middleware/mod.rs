//! Dashboard-specific middleware.

pub mod web_auth;
