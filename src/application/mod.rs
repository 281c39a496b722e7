//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a narrow API for HTTP
//! handlers, the dashboard and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::import_service::ImportService`] - Workbook bulk import of clients
//! - [`services::client_service::ClientService`] - Client listing, lookup and removal
//! - [`services::visit_service::VisitService`] - Visit queueing and reporting
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
