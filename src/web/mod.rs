//! Web dashboard layer for browser-based UI.
//!
//! HTML pages for the client import and a traffic overview, rendered
//! server-side with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie session authentication
//! - [`routes`] - Dashboard route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
