//! Utility modules shared by the resolver and the CLI.

pub mod date;
pub mod html;
pub mod path;
pub mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
