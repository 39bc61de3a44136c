//! Current-item tracking and URL resolution.
//!
//! An item is current when its resolved absolute URL equals the current
//! URI. The current URI is pushed down the tree by
//! [`MenuTree::set_current_uri`]; items that never received one fall back
//! to their ancestors and finally to the request URI of the context.

use serde_json::Value;
use tracing::warn;

use crate::context::UrlRequest;
use crate::error::{MenuError, MenuResult};
use crate::item::{Currency, ItemId};
use crate::tree::MenuTree;

impl MenuTree {
    /// The URI the item is matched against.
    pub fn current_uri(&self, id: ItemId) -> Option<&str> {
        self.ancestors_and_self(id)
            .find_map(|a| self[a].current_uri())
            .or_else(|| self.context().request_uri())
    }

    /// Force the current flag (`Some`) or go back to computing it (`None`).
    /// A forced flag survives URI changes.
    pub fn set_current(&mut self, id: ItemId, current: Option<bool>) {
        let currency = match current {
            Some(flag) => Currency::Forced(flag),
            None => Currency::Unresolved,
        };
        self[id].currency.set(currency);
    }

    /// Whether the item links to the current URI.
    pub fn is_current(&self, id: ItemId) -> bool {
        let item = &self[id];
        match item.currency.get() {
            Currency::Forced(flag) | Currency::Resolved(flag) => flag,
            Currency::Unresolved => {
                let current = self.matches_current_uri(id);
                item.currency.set(Currency::Resolved(current));
                current
            }
        }
    }

    fn matches_current_uri(&self, id: ItemId) -> bool {
        let Some(current) = self.current_uri(id) else {
            return false;
        };
        let menu_url = match self.get_uri(id, Some(true)) {
            Ok(Some(url)) => url,
            Ok(None) => return false,
            Err(e) => {
                warn!(item = %self[id].name(), error = %e, "cannot resolve menu item url");
                return false;
            }
        };

        // home routes match with or without the trailing slash
        let is_home = self[id]
            .route()
            .is_some_and(|route| self.config().is_home_route(route));
        let menu_url: &str = if is_home && !current.ends_with('/') {
            menu_url.strip_suffix('/').unwrap_or(&menu_url)
        } else {
            &menu_url
        };

        menu_url == current
    }

    /// Whether a current item lies below this one, at most `depth` levels
    /// down (`None` for unlimited). Items hiding their children are never
    /// current ancestors.
    pub fn is_current_ancestor(&self, id: ItemId, depth: Option<usize>) -> bool {
        if !self[id].show_children() || depth == Some(0) {
            return false;
        }
        let child_depth = depth.map(|d| d - 1);
        self.children(id)
            .any(|child| self.is_current(child) || self.is_current_ancestor(child, child_depth))
    }

    /// The current item in this subtree, depth first.
    pub fn get_current(&self, id: ItemId) -> Option<ItemId> {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if self.is_current(next) {
                return Some(next);
            }
            stack.extend(self[next].children().iter().rev().copied());
        }
        None
    }

    /// First of the siblings that would be rendered.
    pub fn acts_like_first(&self, id: ItemId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if self.is_first(id) && self.should_be_rendered(id) {
            return true;
        }
        self.children(parent)
            .find(|&sibling| self.should_be_rendered(sibling))
            == Some(id)
    }

    /// Last of the siblings that would be rendered.
    pub fn acts_like_last(&self, id: ItemId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if self.is_last(id) && self.should_be_rendered(id) {
            return true;
        }
        self[parent]
            .children()
            .iter()
            .rev()
            .copied()
            .find(|&sibling| self.should_be_rendered(sibling))
            == Some(id)
    }

    /// Resolve the item's route to a URL.
    ///
    /// Returns `None` for items without a route or with a `#` placeholder.
    /// An `absolute` url option is honoured unless `absolute` overrides it.
    /// Without a route resolver the route itself is the URL.
    pub fn get_uri(&self, id: ItemId, absolute: Option<bool>) -> MenuResult<Option<String>> {
        let item = &self[id];
        let route = match item.route() {
            None | Some("") | Some("#") => return Ok(None),
            Some(route) => route,
        };

        let mut params = item.url_options().clone();
        let option = params.remove("absolute");
        let absolute = absolute.unwrap_or_else(|| option.as_ref().is_some_and(is_truthy));

        let Some(routes) = self.context().routes() else {
            return Ok(Some(route.to_string()));
        };
        let request = UrlRequest {
            route,
            params: &params,
            absolute,
        };
        routes
            .resolve(&request)
            .map(Some)
            .map_err(|e| MenuError::route_resolution(self.label(id, None), e))
    }

    /// `(label, url)` pairs from the root down to this item, followed by
    /// `extra` crumbs.
    pub fn breadcrumbs(
        &self,
        id: ItemId,
        extra: Vec<(String, Option<String>)>,
    ) -> MenuResult<Vec<(String, Option<String>)>> {
        let mut path: Vec<ItemId> = self.ancestors_and_self(id).collect();
        path.reverse();

        let mut crumbs = Vec::with_capacity(path.len() + extra.len());
        for item in path {
            crumbs.push((self.render_label(item), self.get_uri(item, None)?));
        }
        crumbs.extend(extra);
        Ok(crumbs)
    }
}

/// Truthiness of an option value: `true`, non-zero numbers and strings
/// other than `""`, `"0"` and `"false"`.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.as_str(), "" | "0" | "false"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
