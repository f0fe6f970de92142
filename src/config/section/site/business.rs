//! `[site.business]` configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// Primary contractor license, e.g. "CA License #1234567".
    pub license: String,

    /// Every license held, listed on the about page.
    pub licenses: Vec<String>,

    /// Region description, e.g. "Los Angeles County and statewide".
    pub service_area: String,
}

impl BusinessConfig {
    /// Primary license first, followed by the rest without duplicates.
    pub fn all_licenses(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::with_capacity(self.licenses.len() + 1);
        let primary = self.license.trim();
        if !primary.is_empty() {
            all.push(primary.to_string());
        }
        for license in &self.licenses {
            let license = license.trim();
            if !license.is_empty() && !all.iter().any(|l| l == license) {
                all.push(license.to_string());
            }
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_licenses_dedup() {
        let business = BusinessConfig {
            license: "C-10 #1".into(),
            licenses: vec!["C-10 #1".into(), "B #2".into(), " ".into()],
            service_area: String::new(),
        };
        assert_eq!(business.all_licenses(), vec!["C-10 #1", "B #2"]);
        assert!(BusinessConfig::default().all_licenses().is_empty());
    }
}
