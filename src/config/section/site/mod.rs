//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "Acme Electric"
//! tagline = "Licensed electricians since 1998"
//! description = "Residential and commercial electrical contractor"
//! url = "https://acme-electric.com"
//!
//! [site.contact]
//! phone = "(323) 555-0100"
//! email = "office@acme-electric.com"
//! city = "Los Angeles"
//! state = "CA"
//!
//! [site.business]
//! license = "C-10 #1000000"
//! service_area = "Los Angeles County"
//! ```

mod business;
mod contact;
mod info;

pub use business::BusinessConfig;
pub use contact::ContactConfig;
pub use info::SiteInfoConfig;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    pub info: SiteInfoConfig,
    pub contact: ContactConfig,
    pub business: BusinessConfig,
}
