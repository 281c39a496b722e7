//! Core domain entities.
//!
//! Entities are plain data structures without persistence logic.
//!
//! # Entity Types
//!
//! - [`ClientRecord`] - An assembled client with its nested credential records
//! - [`Client`] - A persisted client record
//! - [`Visit`] - A page visit captured by the tracking snippet
//!
//! Creation inputs follow the `NewX` convention ([`NewVisit`]); a client is
//! created from its [`ClientRecord`].

pub mod client;
pub mod visit;

pub use client::{
    AdditionalService, Client, ClientDomain, ClientRecord, ClientSummary, EmailAccount,
    GoogleWorkspace, Website,
};
pub use visit::{NewVisit, PageCount, Visit, VisitSummary};
