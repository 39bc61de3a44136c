//! Who may see an item.
//!
//! An item is visible to a user when the user's authentication state agrees
//! with the item's `requires_auth`/`requires_no_auth` flags and the user
//! holds the item's credentials. Items using
//! [`AccessPolicy::RequireAnyChild`] additionally need at least one
//! accessible child, so that section headers without reachable entries
//! disappear.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::context::SecurityUser;
use crate::item::ItemId;
use crate::tree::MenuTree;

/// How an item decides whether a user may access it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPolicy {
    /// Own flags and credentials only.
    #[default]
    Standard,
    /// Own flags and credentials, plus at least one accessible child when
    /// the item has children.
    RequireAnyChild,
}

impl MenuTree {
    /// Whether `user` may access the item.
    ///
    /// With `None`, the context's user is checked. Only the item's own part
    /// of the answer is cached on the item; the child scan of
    /// [`AccessPolicy::RequireAnyChild`] runs on every call, so changes
    /// below an item are always seen. A tree without a user grants access
    /// to everything.
    pub fn check_user_access(&self, id: ItemId, user: Option<&dyn SecurityUser>) -> bool {
        let own = match user {
            Some(user) => self.own_access(id, user),
            None => match self.cached_own_access(id) {
                Some(own) => own,
                None => return true,
            },
        };

        let item = &self[id];
        let access = match item.policy() {
            AccessPolicy::Standard => own,
            AccessPolicy::RequireAnyChild if item.is_empty() => own,
            AccessPolicy::RequireAnyChild => {
                own && self
                    .children(id)
                    .any(|child| self.check_user_access(child, user))
            }
        };

        trace!(item = %item.name(), access = access, "evaluated menu item access");
        access
    }

    /// Own access for the context user, cached. `None` when the context
    /// has no user.
    fn cached_own_access(&self, id: ItemId) -> Option<bool> {
        let item = &self[id];
        if let Some(cached) = item.user_access.get() {
            return Some(cached);
        }
        let user = self.context().user()?;
        let own = self.own_access(id, user);
        item.user_access.set(Some(own));
        Some(own)
    }

    /// Auth flags and credentials of the item alone.
    fn own_access(&self, id: ItemId, user: &dyn SecurityUser) -> bool {
        let item = &self[id];
        if user.is_authenticated() {
            item.requires_no_auth() != Some(true) && user.has_credentials(item.credentials())
        } else {
            item.requires_auth() != Some(true) && user.has_credentials(item.credentials())
        }
    }

    /// Whether the item shows up when rendered for the context's user.
    pub fn should_be_rendered(&self, id: ItemId) -> bool {
        self[id].show() && self.check_user_access(id, None)
    }

    /// Whether any child of the item would be rendered.
    pub fn has_children(&self, id: ItemId) -> bool {
        self.children(id).any(|child| self.should_be_rendered(child))
    }
}
