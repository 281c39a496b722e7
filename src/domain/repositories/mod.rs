//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`ClientRepository`] - Client records and their nested credentials
//! - [`VisitRepository`] - Visitor tracking
//! - [`TokenRepository`] - Admin API tokens

pub mod client_repository;
pub mod token_repository;
pub mod visit_repository;

pub use client_repository::ClientRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use client_repository::MockClientRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
