//! `[content]` section configuration.
//!
//! Controls which database rows become routes and how service slugs are
//! labeled.
//!
//! # Example
//!
//! ```toml
//! [content]
//! landing = ["commercial-service", "led-retrofit-services"]
//! catalog = ["ev-charger-installation", "electrical-panel-upgrades"]
//! insights_limit = 0          # 0 = list every post
//!
//! [content.display_names]
//! data-network-av-wiring = "Data, Network & AV Wiring"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::slug::{slugify, title_case_slug};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Slugs a landing page may not take: each one is a fixed route.
const RESERVED_SLUGS: &[&str] = &[
    "about-us",
    "contact-us",
    "service-areas",
    "industry-insights",
    "blog",
];

const DEFAULT_LANDING: &[&str] = &[
    "commercial-electric-vehicle-chargers",
    "commercial-service",
    "electrical-load-studies",
    "led-retrofit-services",
    "residential-ev-charger",
    "statewide-facilities-maintenance",
];

const DEFAULT_CATALOG: &[&str] = &[
    "backup-generator-installation",
    "breaker-panel-service-maintenance",
    "ceiling-fan-fixture-installation",
    "complete-electrical-rewiring",
    "data-network-av-wiring",
    "dedicated-equipment-circuits",
    "electrical-code-compliance-corrections",
    "electrical-panel-upgrades",
    "electrical-safety-inspections",
    "electrical-troubleshooting-repairs",
    "energy-efficiency-upgrades",
    "ev-charger-installation",
    "exhaust-fan-ventilation-wiring",
    "landscape-outdoor-lighting",
    "lighting-installation-retrofitting",
    "outlet-switch-dimmer-services",
    "pool-hot-tub-spa-electrical",
    "security-motion-lighting",
    "smart-automation-systems",
    "whole-building-surge-protection",
];

const DEFAULT_DISPLAY_NAMES: &[(&str, &str)] = &[
    (
        "electrical-troubleshooting-repairs",
        "Electrical Troubleshooting & Repairs",
    ),
    ("pool-hot-tub-spa-electrical", "Pool, Hot Tub & Spa Electrical"),
    ("data-network-av-wiring", "Data, Network & AV Wiring"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Service landing slugs served at `/{slug}/`.
    pub landing: Vec<String>,

    /// Services listed on every location page, in display order.
    pub catalog: Vec<String>,

    /// Label overrides keyed by service slug.
    pub display_names: FxHashMap<String, String>,

    /// Maximum posts on the insights index (0 = unlimited).
    pub insights_limit: usize,
}

pub struct ContentFields {
    pub landing: FieldPath,
    pub catalog: FieldPath,
    pub display_names: FieldPath,
}

impl ContentConfig {
    pub const FIELDS: ContentFields = ContentFields {
        landing: FieldPath::new("content.landing"),
        catalog: FieldPath::new("content.catalog"),
        display_names: FieldPath::new("content.display_names"),
    };

    #[inline]
    pub fn is_landing(&self, slug: &str) -> bool {
        self.landing.iter().any(|s| s == slug)
    }

    #[inline]
    pub fn is_catalog(&self, slug: &str) -> bool {
        self.catalog.iter().any(|s| s == slug)
    }

    /// Display label for a service slug.
    ///
    /// Uses `display_names` when present, otherwise title-cases the slug.
    pub fn service_label(&self, slug: &str) -> String {
        self.display_names
            .get(slug)
            .cloned()
            .unwrap_or_else(|| title_case_slug(slug))
    }

    /// Insight index limit, `None` when unlimited.
    pub fn insights_limit(&self) -> Option<usize> {
        (self.insights_limit > 0).then_some(self.insights_limit)
    }

    /// Validate slug lists.
    ///
    /// # Checks
    /// - every landing/catalog entry is already a slug
    /// - no duplicates
    /// - landing slugs do not shadow fixed routes
    /// - `display_names` keys name catalog services (warning)
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        Self::validate_slugs(&self.landing, Self::FIELDS.landing, diag);
        Self::validate_slugs(&self.catalog, Self::FIELDS.catalog, diag);

        for slug in &self.landing {
            if RESERVED_SLUGS.contains(&slug.as_str()) {
                diag.error_with_hint(
                    Self::FIELDS.landing,
                    format!("'{slug}' is a fixed route and cannot be a landing page"),
                    "remove it from `content.landing`",
                );
            }
        }

        let mut unknown: Vec<_> = self
            .display_names
            .keys()
            .filter(|key| !self.is_catalog(key))
            .collect();
        unknown.sort();
        for key in unknown {
            diag.warn(
                Self::FIELDS.display_names,
                format!("'{key}' is not in `content.catalog`"),
            );
        }
    }

    fn validate_slugs(slugs: &[String], field: FieldPath, diag: &mut ConfigDiagnostics) {
        let mut seen = FxHashSet::default();
        for slug in slugs {
            let normalized = slugify(slug);
            if normalized.is_empty() {
                diag.error(field, "empty slug");
                continue;
            }
            if normalized != *slug {
                diag.error_with_hint(
                    field,
                    format!("'{slug}' is not a URL slug"),
                    format!("use \"{normalized}\""),
                );
            }
            if !seen.insert(slug.as_str()) {
                diag.error(field, format!("'{slug}' is listed more than once"));
            }
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            landing: DEFAULT_LANDING.iter().map(|s| s.to_string()).collect(),
            catalog: DEFAULT_CATALOG.iter().map(|s| s.to_string()).collect(),
            display_names: DEFAULT_DISPLAY_NAMES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            insights_limit: 0,
        }
    }
}
