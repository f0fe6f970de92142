//! `[site.contact]` configuration.

use serde::{Deserialize, Serialize};

/// Contact block shown on the home and contact pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub phone: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Free-form working hours, e.g. "Mon-Fri 7am-5pm".
    pub hours: String,
}

impl ContactConfig {
    /// `tel:` href for the phone number, digits and `+` only.
    pub fn phone_href(&self) -> Option<String> {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        (!digits.is_empty()).then(|| format!("tel:{digits}"))
    }

    pub fn email_href(&self) -> Option<String> {
        let email = self.email.trim();
        (!email.is_empty()).then(|| format!("mailto:{email}"))
    }

    /// One-line postal address, skipping empty parts.
    ///
    /// `"123 Main St, Los Angeles, CA 90001"`
    pub fn address_line(&self) -> String {
        let region = [self.state.trim(), self.zip.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [self.street.trim(), self.city.trim(), region.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
