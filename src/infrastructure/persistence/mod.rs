//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow`.
//!
//! # Repositories
//!
//! - [`PgClientRepository`] - Clients and their nested credentials
//! - [`PgVisitRepository`] - Visitor tracking and aggregates
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_client_repository;
pub mod pg_token_repository;
pub mod pg_visit_repository;

pub use pg_client_repository::PgClientRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_visit_repository::PgVisitRepository;
