//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and workbook handling.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`spreadsheet`] - Workbook decoding (calamine) and template generation (rust_xlsxwriter)

pub mod persistence;
pub mod spreadsheet;
