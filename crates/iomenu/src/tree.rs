//! The menu tree and its structural operations.
//!
//! All items live in one arena owned by [`MenuTree`] and refer to each other
//! through [`ItemId`] handles. A child's `parent` is a plain handle, so the
//! only owner of an item is the tree itself. An item has at most one parent;
//! it must be removed from its parent before it can be attached elsewhere.
//!
//! ```
//! use iomenu::{MenuTree, NewItem};
//!
//! let mut tree = MenuTree::new();
//! let root = tree.add_root(NewItem::new("root"));
//! let blog = tree.add_child(root, NewItem::new("Blog").route("/blog")).unwrap();
//! tree.add_child(root, "About").unwrap();
//!
//! assert_eq!(tree.count(root), 2);
//! assert_eq!(tree.child(root, "Blog"), Some(blog));
//! assert!(tree.is_first(blog));
//! ```

use std::ops::{Deref, Index, IndexMut};

use tracing::debug;

use crate::access::AccessPolicy;
use crate::config::MenuConfig;
use crate::context::MenuContext;
use crate::error::{MenuError, MenuResult};
use crate::item::{ItemId, MenuItem, NewItem};

/// Identifies a child either by name or by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRef<'a> {
    Name(&'a str),
    Item(ItemId),
}

impl<'a> From<&'a str> for ChildRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for ChildRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl From<ItemId> for ChildRef<'_> {
    fn from(id: ItemId) -> Self {
        Self::Item(id)
    }
}

/// An arena of menu items, possibly holding several independent roots.
#[derive(Debug, Default)]
pub struct MenuTree {
    items: Vec<MenuItem>,
    context: MenuContext,
    config: MenuConfig,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: MenuContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_config(mut self, config: MenuConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context(&self) -> &MenuContext {
        &self.context
    }

    /// Replace the collaborators. Every cached access and current-item
    /// answer is dropped since both depend on them.
    pub fn set_context(&mut self, context: MenuContext) {
        self.context = context;
        for item in &self.items {
            item.invalidate_caches();
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MenuConfig) {
        self.config = config;
        for item in &self.items {
            item.invalidate_currency();
        }
    }

    /// Number of items in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        id.0 < self.items.len()
    }

    /// A navigable view of an item.
    pub fn get(&self, id: ItemId) -> Option<ItemRef<'_>> {
        self.contains(id).then_some(ItemRef { tree: self, id })
    }

    pub(crate) fn push(&mut self, item: MenuItem) -> ItemId {
        let id = ItemId(self.items.len());
        self.items.push(item);
        id
    }

    /// Create a parent-less item.
    pub fn add_root(&mut self, new: impl Into<NewItem>) -> ItemId {
        self.push(MenuItem::from_new(new.into(), AccessPolicy::Standard))
    }

    /// Create a child from a description and append it to `parent`.
    ///
    /// Unless the description names a policy, the child gets the parent's
    /// child policy, or else the parent's own policy.
    pub fn add_child(&mut self, parent: ItemId, new: impl Into<NewItem>) -> MenuResult<ItemId> {
        let new = new.into();
        self.check_free_name(parent, new.name())?;

        let inherited = self[parent]
            .child_policy()
            .unwrap_or_else(|| self[parent].policy());
        let child = self.push(MenuItem::from_new(new, inherited));
        self.link(parent, child);
        Ok(child)
    }

    /// Append an existing parent-less item (and its subtree) to `parent`.
    pub fn attach(&mut self, parent: ItemId, child: ItemId) -> MenuResult<ItemId> {
        if self[child].parent.is_some() {
            return Err(MenuError::AlreadyAttached {
                name: self[child].name.clone(),
            });
        }
        if self.ancestors_and_self(parent).any(|a| a == child) {
            return Err(MenuError::CyclicAttachment {
                name: self[child].name.clone(),
            });
        }
        self.check_free_name(parent, &self[child].name)?;

        self.link(parent, child);
        Ok(child)
    }

    /// Attach without validation. The child inherits the parent's
    /// show-children flag and current URI.
    pub(crate) fn link(&mut self, parent: ItemId, child: ItemId) {
        let num = self[parent].children.len();
        let show_children = self[parent].show_children;
        let current_uri = self[parent].current_uri.clone();

        {
            let item = &mut self[child];
            item.parent = Some(parent);
            item.num = Some(num);
            item.show_children = show_children;
        }
        self[parent].children.push(child);
        self.set_current_uri(child, current_uri);

        debug!(parent = %self[parent].name, child = %self[child].name, num = num, "attached menu item");
    }

    fn check_free_name(&self, parent: ItemId, name: &str) -> MenuResult<()> {
        if self.child(parent, name).is_some() {
            return Err(MenuError::duplicate_name(self[parent].name.clone(), name));
        }
        Ok(())
    }

    /// Look up a child by name.
    pub fn child(&self, parent: ItemId, name: &str) -> Option<ItemId> {
        self[parent]
            .children
            .iter()
            .copied()
            .find(|&c| self[c].name == name)
    }

    /// Look up a child by name, creating it when absent.
    pub fn get_child(&mut self, parent: ItemId, name: &str) -> ItemId {
        if let Some(child) = self.child(parent, name) {
            return child;
        }
        let inherited = self[parent]
            .child_policy()
            .unwrap_or_else(|| self[parent].policy());
        let child = self.push(MenuItem::from_new(NewItem::new(name), inherited));
        self.link(parent, child);
        child
    }

    fn resolve_child(&self, parent: ItemId, child: ChildRef<'_>) -> Option<ItemId> {
        match child {
            ChildRef::Name(name) => self.child(parent, name),
            ChildRef::Item(id) => (self.contains(id) && self[id].parent == Some(parent)).then_some(id),
        }
    }

    /// Detach a child. The removed item keeps its subtree and becomes a
    /// root; the remaining children are renumbered. Unknown children are
    /// ignored.
    pub fn remove_child<'a>(&mut self, parent: ItemId, child: impl Into<ChildRef<'a>>) -> Option<ItemId> {
        let child = self.resolve_child(parent, child.into())?;

        self[parent].children.retain(|&c| c != child);
        {
            let item = &mut self[child];
            item.parent = None;
            item.num = None;
        }
        self.renumber(parent);

        debug!(parent = %self[parent].name, child = %self[child].name, "removed menu item");
        Some(child)
    }

    /// Remove an item from whatever parent it has.
    pub fn detach(&mut self, id: ItemId) -> Option<ItemId> {
        let parent = self[id].parent?;
        self.remove_child(parent, id)
    }

    /// Rename an item. Fails if a sibling already uses the name; the item
    /// keeps its position.
    pub fn set_name(&mut self, id: ItemId, name: impl Into<String>) -> MenuResult<()> {
        let name = name.into();
        if self[id].name == name {
            return Ok(());
        }
        if let Some(parent) = self[id].parent {
            self.check_free_name(parent, &name)?;
        }

        debug!(from = %self[id].name, to = %name, "renamed menu item");
        self[id].name = name;
        Ok(())
    }

    /// Move an item to a position among its siblings.
    pub fn move_to_position(&mut self, id: ItemId, position: usize) -> MenuResult<()> {
        let parent = self.parent_of(id)?;
        self.move_child_to_position(parent, id, position)
    }

    pub fn move_to_first_position(&mut self, id: ItemId) -> MenuResult<()> {
        self.move_to_position(id, 0)
    }

    pub fn move_to_last_position(&mut self, id: ItemId) -> MenuResult<()> {
        let parent = self.parent_of(id)?;
        let last = self.count(parent);
        self.move_child_to_position(parent, id, last)
    }

    /// Move a child to `position`; positions past the end append.
    pub fn move_child_to_position<'a>(
        &mut self,
        parent: ItemId,
        child: impl Into<ChildRef<'a>>,
        position: usize,
    ) -> MenuResult<()> {
        let child = child.into();
        let child = self.resolve_child(parent, child).ok_or_else(|| {
            let name = match child {
                ChildRef::Name(name) => name.to_string(),
                ChildRef::Item(id) => self.get(id).map(|i| i.name().to_string()).unwrap_or_default(),
            };
            MenuError::unknown_child(self[parent].name.clone(), name)
        })?;

        let mut order: Vec<String> = self[parent]
            .children
            .iter()
            .filter(|&&c| c != child)
            .map(|&c| self[c].name.clone())
            .collect();
        order.insert(position.min(order.len()), self[child].name.clone());
        self.reorder_children(parent, &order)
    }

    /// Put the children in the given order. The order must name every
    /// child exactly once.
    pub fn reorder_children<S: AsRef<str>>(&mut self, parent: ItemId, order: &[S]) -> MenuResult<()> {
        let expected = self.count(parent);
        if order.len() != expected {
            return Err(MenuError::ReorderMismatch {
                parent: self[parent].name.clone(),
                expected,
                actual: order.len(),
            });
        }

        let mut reordered = Vec::with_capacity(expected);
        for name in order {
            let name = name.as_ref();
            let child = self
                .child(parent, name)
                .ok_or_else(|| MenuError::unknown_child(self[parent].name.clone(), name))?;
            if reordered.contains(&child) {
                return Err(MenuError::ReorderMismatch {
                    parent: self[parent].name.clone(),
                    expected,
                    actual: order.len(),
                });
            }
            reordered.push(child);
        }

        self[parent].children = reordered;
        self.renumber(parent);
        debug!(parent = %self[parent].name, children = expected, "reordered menu items");
        Ok(())
    }

    pub(crate) fn renumber(&mut self, parent: ItemId) {
        let children = std::mem::take(&mut self[parent].children);
        for (i, &child) in children.iter().enumerate() {
            self[child].num = Some(i);
        }
        self[parent].children = children;
    }

    fn parent_of(&self, id: ItemId) -> MenuResult<ItemId> {
        self[id].parent.ok_or_else(|| MenuError::Detached {
            name: self[id].name.clone(),
        })
    }

    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        self[id].parent
    }

    /// Children in render order.
    pub fn children(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        self[id].children.iter().copied()
    }

    pub fn count(&self, id: ItemId) -> usize {
        self[id].children.len()
    }

    pub fn first_child(&self, id: ItemId) -> Option<ItemId> {
        self[id].children.first().copied()
    }

    pub fn last_child(&self, id: ItemId) -> Option<ItemId> {
        self[id].children.last().copied()
    }

    pub fn is_root(&self, id: ItemId) -> bool {
        self[id].parent.is_none()
    }

    /// First among its siblings. Roots are never first.
    pub fn is_first(&self, id: ItemId) -> bool {
        self[id].parent.is_some() && self[id].num == Some(0)
    }

    /// Last among its siblings. Roots are never last.
    pub fn is_last(&self, id: ItemId) -> bool {
        match self[id].parent {
            Some(parent) => self[id].num == Some(self.count(parent) - 1),
            None => false,
        }
    }

    /// The item followed by its ancestors, nearest first.
    pub fn ancestors_and_self(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        std::iter::successors(Some(id), move |&i| self[i].parent)
    }

    /// Number of parent hops to the root; the root is level 0.
    pub fn level(&self, id: ItemId) -> usize {
        self.ancestors_and_self(id).count() - 1
    }

    pub fn root(&self, id: ItemId) -> ItemId {
        self.ancestors_and_self(id).last().unwrap_or(id)
    }

    /// The item and all of its descendants, depth first in render order.
    pub fn subtree(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self[next].children.iter().rev().copied());
        }
        out
    }

    /// Set the URI the current item is matched against, on this item and
    /// every descendant. Cached current-item answers below are dropped.
    pub fn set_current_uri(&mut self, id: ItemId, uri: Option<String>) {
        for item in self.subtree(id) {
            let item = &mut self[item];
            item.current_uri = uri.clone();
            item.invalidate_currency();
        }
    }
}

impl Index<ItemId> for MenuTree {
    type Output = MenuItem;

    /// Panics if the handle was issued by another tree.
    fn index(&self, id: ItemId) -> &MenuItem {
        &self.items[id.0]
    }
}

impl IndexMut<ItemId> for MenuTree {
    fn index_mut(&mut self, id: ItemId) -> &mut MenuItem {
        &mut self.items[id.0]
    }
}

/// Read-only view of an item that can walk the tree.
///
/// Dereferences to the item's [`MenuItem`] data.
#[derive(Clone, Copy)]
pub struct ItemRef<'a> {
    tree: &'a MenuTree,
    id: ItemId,
}

impl<'a> ItemRef<'a> {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn tree(&self) -> &'a MenuTree {
        self.tree
    }

    /// Child by name.
    pub fn get(&self, name: &str) -> Option<ItemRef<'a>> {
        let id = self.tree.child(self.id, name)?;
        Some(ItemRef { tree: self.tree, id })
    }

    /// Children in render order.
    pub fn iter(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let tree = self.tree;
        tree[self.id].children.iter().map(move |&id| ItemRef { tree, id })
    }

    pub fn parent_ref(&self) -> Option<ItemRef<'a>> {
        let id = self.tree[self.id].parent?;
        Some(ItemRef { tree: self.tree, id })
    }

    pub fn root_ref(&self) -> ItemRef<'a> {
        ItemRef {
            tree: self.tree,
            id: self.tree.root(self.id),
        }
    }

    pub fn level(&self) -> usize {
        self.tree.level(self.id)
    }

    pub fn is_first(&self) -> bool {
        self.tree.is_first(self.id)
    }

    pub fn is_last(&self) -> bool {
        self.tree.is_last(self.id)
    }

    /// Child names in render order.
    pub fn names(&self) -> Vec<&'a str> {
        self.iter().map(|c| c.tree[c.id].name()).collect()
    }
}

impl Deref for ItemRef<'_> {
    type Target = MenuItem;

    fn deref(&self) -> &MenuItem {
        &self.tree[self.id]
    }
}

impl std::fmt::Debug for ItemRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}
