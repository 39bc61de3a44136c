//! Menu settings, read from environment variables or deserialized with serde.

use std::env;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings shared by every menu of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Culture used when neither the item, its ancestors nor the user
    /// name one (default: "en").
    pub default_culture: String,

    /// Route labels through the label translator (default: false).
    pub i18n: bool,

    /// Render without whitespace by default (default: false).
    pub render_compressed: bool,

    /// Class of the outermost list when the root sets none (default: "menu").
    pub top_level_class: String,

    /// Routes that match the current URI with or without a trailing slash
    /// (default: "@homepage,homepage").
    pub home_routes: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            default_culture: "en".to_string(),
            i18n: false,
            render_compressed: false,
            top_level_class: "menu".to_string(),
            home_routes: vec!["@homepage".to_string(), "homepage".to_string()],
        }
    }
}

impl MenuConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let default_culture = env::var("IOMENU_DEFAULT_CULTURE").unwrap_or(defaults.default_culture);

        let i18n = env::var("IOMENU_I18N")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .context("IOMENU_I18N must be true or false")?;

        let render_compressed = env::var("IOMENU_RENDER_COMPRESSED")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .context("IOMENU_RENDER_COMPRESSED must be true or false")?;

        let top_level_class = env::var("IOMENU_TOP_LEVEL_CLASS").unwrap_or(defaults.top_level_class);

        let home_routes = env::var("IOMENU_HOME_ROUTES")
            .map(|s| {
                s.split(',')
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.home_routes);

        Ok(Self {
            default_culture,
            i18n,
            render_compressed,
            top_level_class,
            home_routes,
        })
    }

    /// Whether the route gets the trailing-slash tolerance when matching
    /// the current URI.
    pub fn is_home_route(&self, route: &str) -> bool {
        self.home_routes.iter().any(|r| r == route)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MenuConfig::default();
        assert_eq!(config.default_culture, "en");
        assert!(!config.i18n);
        assert!(config.is_home_route("@homepage"));
        assert!(config.is_home_route("homepage"));
        assert!(!config.is_home_route("@blog"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: MenuConfig = serde_yml::from_str("i18n: true\ndefault_culture: fr\n").unwrap();
        assert!(config.i18n);
        assert_eq!(config.default_culture, "fr");
        assert_eq!(config.top_level_class, "menu");
    }
}
