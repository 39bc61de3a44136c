//! Item labels and their cultures.

use crate::item::ItemId;
use crate::tree::MenuTree;

impl MenuTree {
    /// Culture of an item: its own, else the nearest ancestor's, else the
    /// context user's, else the configured default.
    pub fn culture(&self, id: ItemId) -> &str {
        self.ancestors_and_self(id)
            .find_map(|a| self[a].culture())
            .or_else(|| self.context().user().and_then(|u| u.culture()))
            .unwrap_or(&self.config().default_culture)
    }

    /// The label to show for an item.
    ///
    /// Items with per-culture labels look up `culture` (or the item's
    /// culture), then the default culture. Everything else, and any miss,
    /// uses the explicit label or the name.
    pub fn label(&self, id: ItemId, culture: Option<&str>) -> String {
        let item = &self[id];
        if item.uses_i18n() {
            let culture = culture.unwrap_or_else(|| self.culture(id));
            let found = item
                .i18n_label(culture)
                .or_else(|| item.i18n_label(&self.config().default_culture));
            if let Some(label) = found {
                return label.to_string();
            }
        }
        item.raw_label().to_string()
    }

    /// The label as displayed, passed through the translator when i18n is
    /// enabled.
    pub fn render_label(&self, id: ItemId) -> String {
        let label = self.label(id, None);
        if !self.config().i18n {
            return label;
        }
        match self.context().translator() {
            Some(translator) => translator.translate(&label, self.culture(id)),
            None => label,
        }
    }

    /// Rendered labels from the root down to the item, joined by `separator`.
    pub fn path_as_string(&self, id: ItemId, separator: &str) -> String {
        let mut labels: Vec<String> = self
            .ancestors_and_self(id)
            .map(|a| self.render_label(a))
            .collect();
        labels.reverse();
        labels.join(separator)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::MenuConfig;
    use crate::context::MenuContext;
    use crate::locale::CatalogTranslator;
    use crate::user::SessionUser;

    fn i18n_tree() -> (MenuTree, crate::item::ItemId) {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        let home = tree.add_child(root, "home").unwrap();
        tree[home]
            .set_label("Home")
            .set_i18n_label("en", "Home page")
            .set_i18n_label("fr", "Accueil");
        (tree, home)
    }

    #[test]
    fn label_without_i18n_is_label_or_name() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "Blog").unwrap();
        assert_eq!(tree.label(a, None), "Blog");
        tree[a].set_label("The blog");
        assert_eq!(tree.label(a, Some("fr")), "The blog");
    }

    #[test]
    fn explicit_culture_then_default_culture() {
        let (tree, home) = i18n_tree();
        assert_eq!(tree.label(home, Some("fr")), "Accueil");
        assert_eq!(tree.label(home, Some("de")), "Home page");
        assert_eq!(tree.label(home, None), "Home page");
    }

    #[test]
    fn culture_cascades_through_ancestors_then_user() {
        let (mut tree, home) = i18n_tree();
        tree.set_context(MenuContext::new().with_user(SessionUser::anonymous().with_culture("fr")));
        assert_eq!(tree.culture(home), "fr");
        assert_eq!(tree.label(home, None), "Accueil");

        let root = tree.parent(home).unwrap();
        tree[root].set_culture(Some("en".to_string()));
        assert_eq!(tree.culture(home), "en");
        assert_eq!(tree.label(home, None), "Home page");
    }

    #[test]
    fn missing_translations_fall_back_to_raw_label() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a").unwrap();
        tree[a].set_label("About").set_i18n_label("fr", "A propos");
        assert_eq!(tree.label(a, Some("de")), "About");
    }

    #[test]
    fn translator_only_runs_with_i18n_enabled() {
        let mut tree = MenuTree::new().with_context(
            MenuContext::new().with_translator(CatalogTranslator::new().with("en", "Blog", "Weblog")),
        );
        let root = tree.add_root("root");
        let a = tree.add_child(root, "Blog").unwrap();
        assert_eq!(tree.render_label(a), "Blog");

        tree.set_config(MenuConfig {
            i18n: true,
            ..MenuConfig::default()
        });
        assert_eq!(tree.render_label(a), "Weblog");
        assert_eq!(tree.path_as_string(a, " > "), "root > Weblog");
    }
}
