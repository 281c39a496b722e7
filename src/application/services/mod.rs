//! Business logic services for the application layer.

pub mod auth_service;
pub mod client_service;
pub mod import_service;
pub mod visit_service;

pub use auth_service::{AuthService, hash_token_with_secret};
pub use client_service::ClientService;
pub use import_service::{ImportService, assemble_client};
pub use visit_service::VisitService;
