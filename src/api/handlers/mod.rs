//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod clients;
pub mod health;
pub mod import;
pub mod track;
pub mod visitors;

pub use clients::{client_list_handler, delete_client_handler, get_client_handler};
pub use health::health_handler;
pub use import::{import_clients_handler, import_template_handler};
pub use track::track_handler;
pub use visitors::{delete_visitor_handler, visitor_list_handler, visitor_summary_handler};
