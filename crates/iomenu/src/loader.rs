//! Menus declared in a navigation file.
//!
//! A navigation file is a YAML mapping from menu name to item data in the
//! [`ItemData`] shape:
//!
//! ```yaml
//! main:
//!   attributes: { class: main-nav }
//!   children:
//!     Home: { route: "@homepage" }
//!     Blog:
//!       route: "@blog"
//!       children:
//!         Archive: { route: /blog/archive }
//! ```
//!
//! Menus keep the order they are declared in.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, info};

use crate::attributes::deserialize_entries;
use crate::export::ItemData;
use crate::item::ItemId;
use crate::security::RouteSecurity;
use crate::tree::MenuTree;

#[derive(Deserialize)]
struct MenusFile(#[serde(deserialize_with = "deserialize_entries")] Vec<(String, ItemData)>);

/// Parsed navigation file.
#[derive(Debug, Clone, Default)]
pub struct NavigationConfig {
    menus: Vec<(String, ItemData)>,
}

impl NavigationConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let MenusFile(menus) = serde_yml::from_str(yaml).context("invalid navigation file")?;
        debug!(menus = menus.len(), "parsed navigation file");
        Ok(Self { menus })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read navigation file {}", path.display()))?;
        let config = Self::from_yaml_str(&yaml)
            .with_context(|| format!("failed to load navigation file {}", path.display()))?;
        info!(path = %path.display(), menus = config.menus.len(), "loaded navigation");
        Ok(config)
    }

    /// Menu names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.menus.iter().map(|(name, _)| name.as_str())
    }

    pub fn menu(&self, name: &str) -> Option<&ItemData> {
        self.menus
            .iter()
            .find(|(menu, _)| menu == name)
            .map(|(_, data)| data)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Copy route credentials onto every routed item of every menu.
    /// Items whose route is not secured keep the credentials they declare.
    /// Returns the number of items that received credentials.
    pub fn apply_security(&mut self, security: &dyn RouteSecurity) -> usize {
        let mut injected = 0usize;
        for (_, menu) in &mut self.menus {
            menu.for_each_mut(&mut |item: &mut ItemData| {
                let Some(route) = item.route.as_deref() else {
                    return;
                };
                if let Some(credentials) = security.credentials_for(route) {
                    item.credentials = credentials;
                    injected += 1;
                }
            });
        }
        debug!(items = injected, "applied route security");
        injected
    }

    /// Build the named menu as a new root of `tree`.
    pub fn build(&self, tree: &mut MenuTree, name: &str) -> Result<ItemId> {
        let Some(data) = self.menu(name) else {
            bail!(
                "no menu named '{name}' (available: {})",
                self.names().collect::<Vec<_>>().join(", ")
            );
        };
        let root = tree
            .create_from_array(data)
            .with_context(|| format!("failed to build menu '{name}'"))?;
        debug!(menu = %name, items = tree.subtree(root).len(), "built menu");
        Ok(root)
    }

    /// Build every menu, in declaration order.
    pub fn build_all(&self, tree: &mut MenuTree) -> Result<Vec<(String, ItemId)>> {
        self.names()
            .map(|name| Ok((name.to_string(), self.build(tree, name)?)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;
    use crate::security::SecurityRules;

    const NAVIGATION: &str = r#"
single_level:
  children:
    Home: { route: "@homepage" }
    Admin: { route: "@admin?section=users" }
multi_level:
  children:
    level_1_1:
      children:
        level_2_1:
          children:
            a: {}
            b: {}
            c: {}
        level_2_2: { route: /about }
"#;

    #[test]
    fn menus_keep_declaration_order() {
        let nav = NavigationConfig::from_yaml_str(NAVIGATION).unwrap();
        assert_eq!(nav.names().collect::<Vec<_>>(), vec!["single_level", "multi_level"]);
    }

    #[test]
    fn builds_nested_menus() {
        let nav = NavigationConfig::from_yaml_str(NAVIGATION).unwrap();
        let mut tree = MenuTree::new();

        let single = nav.build(&mut tree, "single_level").unwrap();
        assert_eq!(tree.count(single), 2);

        let multi = nav.build(&mut tree, "multi_level").unwrap();
        assert_eq!(tree.count(multi), 1);
        let level_1 = tree.child(multi, "level_1_1").unwrap();
        assert_eq!(tree.count(level_1), 2);
        let level_2 = tree.child(level_1, "level_2_1").unwrap();
        assert_eq!(tree.count(level_2), 3);
    }

    #[test]
    fn unknown_menu_lists_available_ones() {
        let nav = NavigationConfig::from_yaml_str(NAVIGATION).unwrap();
        let err = nav.build(&mut MenuTree::new(), "footer").unwrap_err();
        assert!(err.to_string().contains("single_level, multi_level"));
    }

    #[test]
    fn security_is_injected_by_route_name() {
        let mut nav = NavigationConfig::from_yaml_str(NAVIGATION).unwrap();
        let rules = SecurityRules::new().secure("admin", Credentials::all(["admin"]));
        assert_eq!(nav.apply_security(&rules), 1);

        let mut tree = MenuTree::new();
        let single = nav.build(&mut tree, "single_level").unwrap();
        let admin = tree.child(single, "Admin").unwrap();
        assert_eq!(tree[admin].credentials(), &Credentials::all(["admin"]));
        let home = tree.child(single, "Home").unwrap();
        assert!(tree[home].credentials().is_empty());
    }
}
