//! Configuration section definitions.
//!
//! Each module corresponds to a section in `voltpress.toml`:
//!
//! | Module     | TOML Section   | Purpose                                 |
//! |------------|----------------|-----------------------------------------|
//! | `build`    | `[build]`      | Database path, output, export options   |
//! | `content`  | `[content]`    | Landing allowlist, service catalog      |
//! | `site`     | `[site]`       | Site info, contact block, licenses      |
//! | `validate` | `[validate]`   | Link/content validation                 |

mod build;
mod content;
pub mod site;
mod validate;

pub use build::BuildSectionConfig;
pub use content::ContentConfig;
pub use site::{BusinessConfig, ContactConfig, SiteInfoConfig, SiteSectionConfig};
pub use validate::{CheckConfig, ValidateConfig, ValidateLevel};
