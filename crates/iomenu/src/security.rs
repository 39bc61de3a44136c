//! Route-level security rules.
//!
//! Navigation files usually do not repeat the credentials of the pages
//! they link to. A [`RouteSecurity`] source supplies them per route so the
//! loader can copy them onto the items.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::context::strip_query;
use crate::credentials::Credentials;

/// Supplies the credentials protecting a route.
pub trait RouteSecurity {
    /// Credentials required by the route, or `None` when the route is not
    /// secured (or unknown).
    fn credentials_for(&self, route: &str) -> Option<Credentials>;
}

/// Security settings of one route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteRule {
    #[serde(default, deserialize_with = "deserialize_switch")]
    pub is_secure: bool,
    #[serde(default)]
    pub credentials: Credentials,
}

/// A table of route security rules, keyed by route name.
///
/// ```yaml
/// blog_admin:
///   is_secure: on
///   credentials: [admin, [editor, publisher]]
/// blog:
///   is_secure: off
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecurityRules {
    rules: HashMap<String, RouteRule>,
}

impl SecurityRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, route: &str, rule: RouteRule) -> Self {
        self.rules.insert(route_key(route).to_string(), rule);
        self
    }

    /// Mark a route secure with the given credentials.
    pub fn secure(self, route: &str, credentials: Credentials) -> Self {
        self.rule(
            route,
            RouteRule {
                is_secure: true,
                credentials,
            },
        )
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let rules: HashMap<String, RouteRule> =
            serde_yml::from_str(yaml).context("invalid security rules")?;
        let rules: HashMap<String, RouteRule> = rules
            .into_iter()
            .map(|(route, rule)| (route_key(&route).to_string(), rule))
            .collect();
        debug!(rules = rules.len(), "loaded route security rules");
        Ok(Self { rules })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read security rules {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RouteSecurity for SecurityRules {
    fn credentials_for(&self, route: &str) -> Option<Credentials> {
        self.rules
            .get(route_key(route))
            .filter(|rule| rule.is_secure)
            .map(|rule| rule.credentials.clone())
    }
}

/// `@blog?page=1` and `blog` name the same route.
fn route_key(route: &str) -> &str {
    strip_query(route).trim_start_matches('@')
}

/// Accept `true`/`false` as well as the `on`/`off` spelling.
fn deserialize_switch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Switch {
        Bool(bool),
        Word(String),
    }

    match Switch::deserialize(deserializer)? {
        Switch::Bool(b) => Ok(b),
        Switch::Word(w) => match w.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Ok(true),
            "off" | "no" | "false" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected on/off, got \"{other}\""
            ))),
        },
    }
}
