//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod client;
pub mod health;
pub mod import;
pub mod pagination;
pub mod visit;
