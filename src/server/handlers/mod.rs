//! HTTP handlers.

mod fetch;
mod status;

pub use fetch::fetch_handler;
pub use status::{health_handler, root_handler, status_handler};
