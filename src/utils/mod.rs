//! Helper functions shared across layers.
//!
//! - [`cell_normalizer`] - Lenient conversion of spreadsheet cells into dates, amounts and flags
//! - [`client_ip`] - Client IP resolution from the peer address or proxy headers

pub mod cell_normalizer;
pub mod client_ip;
