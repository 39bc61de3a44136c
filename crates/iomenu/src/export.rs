//! Plain-data form of a menu subtree.
//!
//! [`ItemData`] is what navigation files are written in and what
//! `iomenu export` prints. Exporting a subtree and importing it into a
//! fresh item reproduces every field, including the access policy of each
//! item and the order of children.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::access::AccessPolicy;
use crate::attributes::{Attributes, Options, deserialize_entries, serialize_entries};
use crate::credentials::Credentials;
use crate::error::MenuResult;
use crate::item::{ItemId, NewItem};
use crate::tree::MenuTree;

/// Serializable description of an item and, optionally, its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub route: Option<String>,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default)]
    pub requires_auth: Option<bool>,

    #[serde(default)]
    pub requires_no_auth: Option<bool>,

    #[serde(default)]
    pub credentials: Credentials,

    #[serde(default)]
    pub link_options: Options,

    #[serde(default)]
    pub url_options: Options,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub i18n_labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,

    /// Access policy the item is recreated with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<AccessPolicy>,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub show: bool,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub show_children: bool,

    /// Children by name, in order. `None` when exported without children.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_children",
        deserialize_with = "deserialize_children"
    )]
    pub children: Option<Vec<(String, ItemData)>>,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            name: None,
            label: None,
            route: None,
            attributes: Attributes::new(),
            requires_auth: None,
            requires_no_auth: None,
            credentials: Credentials::none(),
            link_options: Options::new(),
            url_options: Options::new(),
            i18n_labels: BTreeMap::new(),
            culture: None,
            class: None,
            show: true,
            show_children: true,
            children: None,
        }
    }
}

impl ItemData {
    /// Visit this item and every descendant, depth first.
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut ItemData)) {
        f(self);
        if let Some(children) = &mut self.children {
            for (_, child) in children {
                child.for_each_mut(f);
            }
        }
    }
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn serialize_children<S: Serializer>(
    children: &Option<Vec<(String, ItemData)>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match children {
        Some(children) => serialize_entries(children, serializer),
        None => serializer.serialize_none(),
    }
}

fn deserialize_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<(String, ItemData)>>, D::Error> {
    deserialize_entries(deserializer).map(Some)
}

impl MenuTree {
    /// Export an item, and its subtree when `with_children` is set.
    pub fn to_array(&self, id: ItemId, with_children: bool) -> ItemData {
        let item = &self[id];
        let children = with_children.then(|| {
            self.children(id)
                .map(|c| (self[c].name().to_string(), self.to_array(c, true)))
                .collect()
        });

        ItemData {
            name: Some(item.name().to_string()),
            label: item.label().map(str::to_string),
            route: item.route().map(str::to_string),
            attributes: item.attributes().clone(),
            requires_auth: item.requires_auth(),
            requires_no_auth: item.requires_no_auth(),
            credentials: item.credentials().clone(),
            link_options: item.link_options().clone(),
            url_options: item.url_options().clone(),
            i18n_labels: item.i18n_labels().clone(),
            culture: item.culture().map(str::to_string),
            class: Some(item.policy()),
            show: item.show(),
            show_children: item.show_children(),
            children,
        }
    }

    /// Apply exported data to an existing item.
    ///
    /// Only fields present in `data` are applied; the `show` flags always
    /// are. Children are looked up by name (and created when missing)
    /// before their own data is applied, so importing into a populated item
    /// merges.
    pub fn from_array(&mut self, id: ItemId, data: &ItemData) -> MenuResult<()> {
        if let Some(name) = &data.name {
            self.set_name(id, name.as_str())?;
        }

        {
            let item = &mut self[id];
            if let Some(label) = &data.label {
                item.set_label(label.as_str());
            }
            if !data.i18n_labels.is_empty() {
                item.set_i18n_labels(data.i18n_labels.clone());
            }
            if data.culture.is_some() {
                item.set_culture(data.culture.clone());
            }
            if data.route.is_some() {
                item.set_route(data.route.clone());
            }
            if !data.attributes.is_empty() {
                item.set_attributes(data.attributes.clone());
            }
            if data.requires_auth.is_some() {
                item.set_requires_auth(data.requires_auth);
            }
            if data.requires_no_auth.is_some() {
                item.set_requires_no_auth(data.requires_no_auth);
            }
            if !data.credentials.is_empty() {
                item.set_credentials(data.credentials.clone());
            }
            if !data.link_options.is_empty() {
                item.set_link_options(data.link_options.clone());
            }
            if !data.url_options.is_empty() {
                item.set_url_options(data.url_options.clone());
            }
            item.set_show(data.show).set_show_children(data.show_children);
        }

        for (name, child_data) in data.children.iter().flatten() {
            let child = match self.child(id, name) {
                Some(existing) => existing,
                None => {
                    let mut new = NewItem::new(name.as_str());
                    if let Some(policy) = child_data.class {
                        new = new.policy(policy);
                    }
                    self.add_child(id, new)?
                }
            };
            self.from_array(child, child_data)?;
        }
        Ok(())
    }

    /// Build a new root from exported data.
    pub fn create_from_array(&mut self, data: &ItemData) -> MenuResult<ItemId> {
        let name = data.name.clone().unwrap_or_default();
        let root = self.add_root(NewItem::new(name).policy(data.class.unwrap_or_default()));
        self.from_array(root, data)?;
        Ok(root)
    }
}
