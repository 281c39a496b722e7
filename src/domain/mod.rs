//! Domain layer containing business entities and logic.
//!
//! Nothing in here depends on HTTP, PostgreSQL or the spreadsheet library.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`sheet`] - Row-oriented workbook model and the import sheet layout
//! - [`sheet_join`] - Joins auxiliary sheet rows onto a client row
//! - [`import_summary`] - Counters and row errors of a bulk import
//! - [`visit_event`] - Visit tracking event model
//! - [`visit_worker`] - Asynchronous visit persistence worker
//!
//! # Bulk Import Flow
//!
//! 1. The upload is decoded into a [`sheet::ClientWorkbook`]
//! 2. Each primary row is joined with [`sheet_join::join_client`]
//! 3. [`crate::application::services::ImportService`] validates, assembles and persists
//! 4. Outcomes accumulate in an [`import_summary::ImportSummary`]

pub mod entities;
pub mod import_summary;
pub mod repositories;
pub mod sheet;
pub mod sheet_join;
pub mod visit_event;
pub mod visit_worker;
