//! Core types shared across the codebase.

mod link;
mod state;
pub mod template;
mod url;

pub use link::LinkKind;
pub use state::{is_shutdown, setup_shutdown_handler};
pub use template::{Route, ServiceKind, Template, parse_service_mention};
pub use url::UrlPath;
