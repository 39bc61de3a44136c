//! Nested-list markup for a menu.
//!
//! [`ListRenderer`] turns the renderable children of an item into a
//! `<ul>` of `<li>` elements, recursing into each child's own children.
//! Every `<li>` gets its own `class` tokens followed by `current` (or
//! `current_ancestor`), `first` and `last` as they apply. Other renderers
//! can be plugged in through [`MenuRenderer`].

use serde_json::Value;
use tracing::warn;

use crate::attributes::{Attributes, Options};
use crate::config::MenuConfig;
use crate::current::is_truthy;
use crate::item::ItemId;
use crate::tree::MenuTree;

/// Output settings of a render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// No indentation or line breaks.
    pub compressed: bool,
    /// Class of the outermost list when the item sets none.
    pub top_level_class: String,
}

impl RenderOptions {
    pub fn from_config(config: &MenuConfig) -> Self {
        Self {
            compressed: config.render_compressed,
            top_level_class: config.top_level_class.clone(),
        }
    }

    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&MenuConfig::default())
    }
}

/// Renders the children of an item, at most `depth` levels deep
/// (`None` for unlimited).
pub trait MenuRenderer {
    fn render(&self, tree: &MenuTree, id: ItemId, depth: Option<usize>) -> String;
}

/// Renders menus as nested unordered lists.
#[derive(Debug, Clone, Default)]
pub struct ListRenderer {
    options: RenderOptions,
}

#[derive(Clone, Copy)]
enum Line {
    List,
    Item,
    Link,
}

impl ListRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn render_list(&self, tree: &MenuTree, id: ItemId, depth: Option<usize>, nested: bool, out: &mut String) {
        if !tree.has_children(id) || depth == Some(0) || !tree[id].show_children() {
            return;
        }

        let level = tree.level(id);
        let attributes = if nested {
            Attributes::from([("class", format!("menu_level_{level}"))])
        } else {
            let mut attributes = tree[id].attributes().clone();
            if !attributes.contains_key("class") {
                attributes.insert("class", self.options.top_level_class.clone());
            }
            attributes
        };

        let child_depth = depth.map(|d| d - 1);
        self.line(out, level, Line::List, &format!("<ul{}>", tag_options(&attributes)));
        for child in tree.children(id) {
            self.render_item(tree, child, child_depth, out);
        }
        self.line(out, level, Line::List, "</ul>");
    }

    fn render_item(&self, tree: &MenuTree, id: ItemId, depth: Option<usize>, out: &mut String) {
        if !tree.should_be_rendered(id) {
            return;
        }

        let item = &tree[id];
        let mut class: Vec<&str> = match item.attribute("class") {
            Some(class) if !class.is_empty() => class.split(' ').collect(),
            _ => Vec::new(),
        };
        if tree.is_current(id) {
            class.push("current");
        } else if tree.is_current_ancestor(id, depth) {
            class.push("current_ancestor");
        }
        if tree.acts_like_first(id) {
            class.push("first");
        }
        if tree.acts_like_last(id) {
            class.push("last");
        }

        let mut attributes = item.attributes().clone();
        if !class.is_empty() {
            attributes.insert("class", class.join(" "));
        }

        let level = tree.level(id);
        let content = match item.route() {
            Some(route) if !route.is_empty() => tree.render_link(id),
            _ => html_escape(&tree.render_label(id)),
        };

        self.line(out, level, Line::Item, &format!("<li{}>", tag_options(&attributes)));
        self.line(out, level, Line::Link, &content);
        self.render_list(tree, id, depth, true, out);
        self.line(out, level, Line::Item, "</li>");
    }

    fn line(&self, out: &mut String, level: usize, line: Line, html: &str) {
        if self.options.compressed {
            out.push_str(html);
            return;
        }
        let spacing = match line {
            Line::List | Line::Link => level * 4,
            Line::Item => (level * 4).saturating_sub(2),
        };
        out.extend(std::iter::repeat_n(' ', spacing));
        out.push_str(html);
        out.push('\n');
    }
}

impl MenuRenderer for ListRenderer {
    fn render(&self, tree: &MenuTree, id: ItemId, depth: Option<usize>) -> String {
        let mut out = String::new();
        self.render_list(tree, id, depth, false, &mut out);
        out
    }
}

impl MenuTree {
    /// Render the item's children as nested lists using the tree's
    /// configured options.
    pub fn render(&self, id: ItemId, depth: Option<usize>) -> String {
        ListRenderer::new(RenderOptions::from_config(self.config())).render(self, id, depth)
    }

    pub fn render_with(&self, renderer: &dyn MenuRenderer, id: ItemId, depth: Option<usize>) -> String {
        renderer.render(self, id, depth)
    }

    /// The anchor for an item, or its escaped label when it has no route
    /// or the route cannot be resolved.
    ///
    /// `""` and `"#"` routes give a placeholder anchor carrying the url and
    /// link options as attributes. Otherwise the link options `absolute`
    /// and `query_string` shape the href and any other link option becomes
    /// an attribute of the anchor.
    pub fn render_link(&self, id: ItemId) -> String {
        let item = &self[id];
        let label = html_escape(&self.render_label(id));
        let Some(route) = item.route() else {
            return label;
        };

        if route.is_empty() || route == "#" {
            let mut params = item.url_options().merged(item.link_options());
            if !route.is_empty() {
                params.insert("href", Value::from(route));
            }
            return format!("<a{}>{label}</a>", value_options(&params));
        }

        let mut link_options = item.link_options().clone();
        let absolute_link = link_options.remove("absolute");
        let query = link_options.remove("query_string");
        let absolute = item.url_options().get("absolute").is_some_and(is_truthy)
            || absolute_link.as_ref().is_some_and(is_truthy);

        let mut href = match self.get_uri(id, Some(absolute)) {
            Ok(Some(href)) => href,
            Ok(None) => return label,
            Err(e) => {
                warn!(item = %item.name(), error = %e, "rendering menu item without link");
                return label;
            }
        };
        if let Some(query) = query.as_ref().map(value_to_attribute).filter(|q| !q.is_empty()) {
            href.push(if href.contains('?') { '&' } else { '?' });
            href.push_str(&query);
        }

        format!(
            "<a href=\"{}\"{}>{label}</a>",
            html_escape(&href),
            value_options(&link_options)
        )
    }
}

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn tag_options(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(k, v)| format!(" {k}=\"{}\"", html_escape(v)))
        .collect()
}

fn value_options(options: &Options) -> String {
    options
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| format!(" {k}=\"{}\"", html_escape(&value_to_attribute(v))))
        .collect()
}

fn value_to_attribute(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::context::MenuContext;
    use crate::item::NewItem;
    use crate::routes::StaticRoutes;

    fn compressed() -> ListRenderer {
        ListRenderer::new(RenderOptions::default().compressed(true))
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(
            html_escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_menu_renders_nothing() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        assert_eq!(tree.render(root, None), "");

        let a = tree.add_child(root, "a").unwrap();
        tree[a].set_show(false);
        assert_eq!(tree.render(root, None), "");
    }

    #[test]
    fn depth_zero_and_hidden_children_render_nothing() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        tree.add_child(root, "a").unwrap();
        assert_eq!(tree.render(root, Some(0)), "");
        tree[root].set_show_children(false);
        assert_eq!(tree.render(root, None), "");
    }

    #[test]
    fn top_list_defaults_to_menu_class() {
        let mut tree = MenuTree::new();
        let root = tree.add_root(NewItem::new("root").attribute("id", "nav"));
        tree.add_child(root, "Only").unwrap();
        assert_eq!(
            tree.render_with(&compressed(), root, None),
            r#"<ul id="nav" class="menu"><li class="first last">Only</li></ul>"#
        );
    }

    #[test]
    fn depth_limits_nesting() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a").unwrap();
        tree.add_child(a, "b").unwrap();
        assert_eq!(
            tree.render_with(&compressed(), root, Some(1)),
            r#"<ul class="menu"><li class="first last">a</li></ul>"#
        );
        assert_eq!(
            tree.render_with(&compressed(), root, None),
            r#"<ul class="menu"><li class="first last">a<ul class="menu_level_1"><li class="first last">b</li></ul></li></ul>"#
        );
    }

    #[test]
    fn item_class_tokens_come_first() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        tree.add_child(root, NewItem::new("a").attribute("class", "x y").attribute("title", "A"))
            .unwrap();
        assert_eq!(
            tree.render_with(&compressed(), root, None),
            r#"<ul class="menu"><li class="x y first last" title="A">a</li></ul>"#
        );
    }

    #[test]
    fn placeholder_links() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        let hash = tree.add_child(root, NewItem::new("Hash").route("#")).unwrap();
        tree[hash].set_link_options(Options::from([("title", Value::from("t"))]));
        let empty = tree.add_child(root, NewItem::new("Empty").route("")).unwrap();

        assert_eq!(tree.render_link(hash), r##"<a title="t" href="#">Hash</a>"##);
        assert_eq!(tree.render_link(empty), "<a>Empty</a>");
    }

    #[test]
    fn link_options_shape_the_anchor() {
        let routes = StaticRoutes::new("http://localhost").unwrap();
        let mut tree = MenuTree::new().with_context(MenuContext::new().with_routes(routes));
        let root = tree.add_root("root");
        let a = tree.add_child(root, NewItem::new("A").route("/a")).unwrap();
        tree[a].set_link_options(Options::from([
            ("absolute", Value::Bool(true)),
            ("query_string", Value::from("x=1")),
            ("target", Value::from("_blank")),
        ]));
        assert_eq!(
            tree.render_link(a),
            r#"<a href="http://localhost/a?x=1" target="_blank">A</a>"#
        );
    }

    #[test]
    fn unresolvable_route_renders_label() {
        let routes = StaticRoutes::new("http://localhost").unwrap();
        let mut tree = MenuTree::new().with_context(MenuContext::new().with_routes(routes));
        let root = tree.add_root("root");
        let a = tree.add_child(root, NewItem::new("Broken").route("@nowhere")).unwrap();
        tree.add_child(root, NewItem::new("Fine").route("/fine")).unwrap();
        assert_eq!(tree.render_link(a), "Broken");
        assert_eq!(
            tree.render_with(&compressed(), root, None),
            r#"<ul class="menu"><li class="first">Broken</li><li class="last"><a href="/fine">Fine</a></li></ul>"#
        );
    }

    #[test]
    fn pretty_output_indents_by_level() {
        let mut tree = MenuTree::new();
        let root = tree.add_root("root");
        let a = tree.add_child(root, "a").unwrap();
        tree.add_child(a, "b").unwrap();
        let expected = "\
<ul class=\"menu\">
  <li class=\"first last\">
    a
    <ul class=\"menu_level_1\">
      <li class=\"first last\">
        b
      </li>
    </ul>
  </li>
</ul>
";
        assert_eq!(tree.render(root, None), expected);
    }
}
