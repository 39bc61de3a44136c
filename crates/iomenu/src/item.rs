//! Menu item data.
//!
//! A [`MenuItem`] holds everything about one entry of a menu: what it is
//! called, where it links, who may see it and how it is rendered. Its place
//! in the tree (parent, children, position) is owned by
//! [`MenuTree`](crate::MenuTree) and can only be changed through it.

use std::cell::Cell;
use std::collections::BTreeMap;

use crate::access::AccessPolicy;
use crate::attributes::{Attributes, Options};
use crate::credentials::Credentials;

/// Handle of an item inside a [`MenuTree`](crate::MenuTree).
///
/// Handles stay valid for the lifetime of the tree that issued them, even
/// after the item has been removed from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    /// Position of the item in its tree's arena. Handles are issued in
    /// creation order and are never reused, so the index is a stable key
    /// for side tables kept next to a tree.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Cached answer to "is this the current item?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Currency {
    Unresolved,
    Resolved(bool),
    /// Set explicitly; survives URI changes.
    Forced(bool),
}

/// One entry of a menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub(crate) name: String,
    label: Option<String>,
    route: Option<String>,
    attributes: Attributes,
    link_options: Options,
    url_options: Options,
    requires_auth: Option<bool>,
    requires_no_auth: Option<bool>,
    credentials: Credentials,
    show: bool,
    pub(crate) show_children: bool,
    i18n_labels: BTreeMap<String, String>,
    culture: Option<String>,
    policy: AccessPolicy,
    child_policy: Option<AccessPolicy>,

    pub(crate) parent: Option<ItemId>,
    pub(crate) children: Vec<ItemId>,
    pub(crate) num: Option<usize>,
    pub(crate) current_uri: Option<String>,
    pub(crate) currency: Cell<Currency>,
    pub(crate) user_access: Cell<Option<bool>>,
}

impl MenuItem {
    pub(crate) fn from_new(new: NewItem, inherited_policy: AccessPolicy) -> Self {
        Self {
            name: new.name,
            label: new.label,
            route: new.route,
            attributes: new.attributes,
            link_options: Options::new(),
            url_options: Options::new(),
            requires_auth: None,
            requires_no_auth: None,
            credentials: Credentials::none(),
            show: true,
            show_children: true,
            i18n_labels: BTreeMap::new(),
            culture: None,
            policy: new.policy.unwrap_or(inherited_policy),
            child_policy: new.child_policy,
            parent: None,
            children: Vec::new(),
            num: None,
            current_uri: None,
            currency: Cell::new(Currency::Unresolved),
            user_access: Cell::new(None),
        }
    }

    /// A detached copy of this item's own data: no parent, no children,
    /// computed caches cleared. A forced current flag is kept.
    pub(crate) fn detached_copy(&self) -> Self {
        let currency = match self.currency.get() {
            forced @ Currency::Forced(_) => forced,
            _ => Currency::Unresolved,
        };
        Self {
            parent: None,
            children: Vec::new(),
            num: None,
            currency: Cell::new(currency),
            user_access: Cell::new(None),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label without any culture lookup: the explicit label, or the name.
    pub fn raw_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The explicitly set label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn clear_label(&mut self) -> &mut Self {
        self.label = None;
        self
    }

    pub fn i18n_labels(&self) -> &BTreeMap<String, String> {
        &self.i18n_labels
    }

    pub fn i18n_label(&self, culture: &str) -> Option<&str> {
        self.i18n_labels.get(culture).map(String::as_str)
    }

    pub fn set_i18n_label(&mut self, culture: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.i18n_labels.insert(culture.into(), label.into());
        self
    }

    pub fn set_i18n_labels(&mut self, labels: BTreeMap<String, String>) -> &mut Self {
        self.i18n_labels = labels;
        self
    }

    /// Whether per-culture labels are defined on this item.
    pub fn uses_i18n(&self) -> bool {
        !self.i18n_labels.is_empty()
    }

    /// Culture set on this item itself.
    pub fn culture(&self) -> Option<&str> {
        self.culture.as_deref()
    }

    pub fn set_culture(&mut self, culture: Option<String>) -> &mut Self {
        self.culture = culture;
        self
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn set_route(&mut self, route: Option<String>) -> &mut Self {
        self.route = route;
        self.invalidate_currency();
        self
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.attributes = attributes;
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name, value.into());
        self
    }

    pub fn link_options(&self) -> &Options {
        &self.link_options
    }

    pub fn set_link_options(&mut self, options: Options) -> &mut Self {
        self.link_options = options;
        self
    }

    pub fn url_options(&self) -> &Options {
        &self.url_options
    }

    pub fn set_url_options(&mut self, options: Options) -> &mut Self {
        self.url_options = options;
        self.invalidate_currency();
        self
    }

    pub fn requires_auth(&self) -> Option<bool> {
        self.requires_auth
    }

    pub fn set_requires_auth(&mut self, requires: Option<bool>) -> &mut Self {
        self.requires_auth = requires;
        self.user_access.set(None);
        self
    }

    pub fn requires_no_auth(&self) -> Option<bool> {
        self.requires_no_auth
    }

    pub fn set_requires_no_auth(&mut self, requires: Option<bool>) -> &mut Self {
        self.requires_no_auth = requires;
        self.user_access.set(None);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn set_credentials(&mut self, credentials: Credentials) -> &mut Self {
        self.credentials = credentials;
        self.user_access.set(None);
        self
    }

    /// Whether this item (and its subtree) is shown at all.
    pub fn show(&self) -> bool {
        self.show
    }

    pub fn set_show(&mut self, show: bool) -> &mut Self {
        self.show = show;
        self
    }

    /// Whether this item's children are shown.
    pub fn show_children(&self) -> bool {
        self.show_children
    }

    pub fn set_show_children(&mut self, show: bool) -> &mut Self {
        self.show_children = show;
        self
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: AccessPolicy) -> &mut Self {
        self.policy = policy;
        self.user_access.set(None);
        self
    }

    /// Policy given to children created by name under this item, when it
    /// differs from this item's own.
    pub fn child_policy(&self) -> Option<AccessPolicy> {
        self.child_policy
    }

    pub fn set_child_policy(&mut self, policy: Option<AccessPolicy>) -> &mut Self {
        self.child_policy = policy;
        self
    }

    /// Position among the parent's children; `None` for roots.
    pub fn num(&self) -> Option<usize> {
        self.num
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The current URI explicitly set on (or pushed down to) this item.
    pub fn current_uri(&self) -> Option<&str> {
        self.current_uri.as_deref()
    }

    pub(crate) fn invalidate_currency(&self) {
        if let Currency::Resolved(_) = self.currency.get() {
            self.currency.set(Currency::Unresolved);
        }
    }

    pub(crate) fn invalidate_caches(&self) {
        self.invalidate_currency();
        self.user_access.set(None);
    }
}

/// Description of an item to create.
///
/// ```
/// use iomenu::NewItem;
///
/// let item = NewItem::new("Blog")
///     .route("@blog")
///     .attribute("class", "blog");
/// assert_eq!(item.name(), "Blog");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    name: String,
    label: Option<String>,
    route: Option<String>,
    attributes: Attributes,
    policy: Option<AccessPolicy>,
    child_policy: Option<AccessPolicy>,
}

impl NewItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A nameless menu root with the given list attributes; children
    /// created under it use `child_policy`.
    pub fn menu_root(attributes: Attributes, child_policy: AccessPolicy) -> Self {
        Self {
            attributes,
            child_policy: Some(child_policy),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value.into());
        self
    }

    /// Access policy of the new item. Defaults to the parent's child policy,
    /// or the parent's own policy.
    pub fn policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn child_policy(mut self, policy: AccessPolicy) -> Self {
        self.child_policy = Some(policy);
        self
    }
}

impl From<&str> for NewItem {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NewItem {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
