//! HTML template rendering handlers for the web dashboard.

mod dashboard;
mod import;
mod login;

pub use dashboard::dashboard_handler;
pub use import::{import_page_handler, import_submit_handler, template_download_handler};
pub use login::{login_handler, login_submit_handler, logout_handler};
