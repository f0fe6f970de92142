//! `[validate]` section configuration.
//!
//! Configuration for the `voltpress validate` command.
//!
//! # Example
//!
//! ```toml
//! [validate.internal]
//! enable = true               # Check links between site routes
//! level = "error"             # Failure level: error | warn
//!
//! [validate.content]
//! enable = true               # Check tables, landing sections, service bodies
//! level = "warn"
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Internal link validation.
    pub internal: CheckConfig,

    /// Content shape validation.
    pub content: CheckConfig,
}

/// One validation check: whether it runs and how failures count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub enable: bool,

    /// How to treat validation failures: "error" or "warn".
    pub level: ValidateLevel,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            enable: true,
            level: ValidateLevel::default(),
        }
    }
}

impl CheckConfig {
    /// Whether failures of this check should fail the command.
    pub fn is_fatal(&self) -> bool {
        self.enable && self.level == ValidateLevel::Error
    }
}

/// Validation error level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidateLevel {
    /// Failures fail the command.
    #[default]
    Error,
    /// Failures are reported, command succeeds.
    Warn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, test_parse_config};

    #[test]
    fn test_validate_config_defaults() {
        let config = test_parse_config("");
        assert!(config.validate.internal.enable);
        assert!(config.validate.content.enable);
        assert!(config.validate.internal.is_fatal());
        assert_eq!(config.validate.content.level, ValidateLevel::Error);
    }

    #[test]
    fn test_validate_config_custom() {
        let config = test_parse_config(
            r#"[validate.internal]
enable = true
level = "warn"

[validate.content]
enable = false"#,
        );
        assert_eq!(config.validate.internal.level, ValidateLevel::Warn);
        assert!(!config.validate.internal.is_fatal());
        assert!(!config.validate.content.enable);
        assert!(!config.validate.content.is_fatal());
    }

    #[test]
    fn test_validate_unknown_field_detected() {
        let content = "[site.info]\ntitle = \"Test\"\n[validate]\nexternal = true";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.iter().any(|f| f.contains("external")));
    }
}
