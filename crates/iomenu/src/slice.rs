//! Copies, slices and splits of a subtree.
//!
//! All three produce new, parent-less items in the same arena; nothing is
//! shared with the source subtree.

use crate::item::ItemId;
use crate::tree::MenuTree;

/// One end of a slice: a position (negative counts from the end), a child
/// name or a child handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound<'a> {
    Index(isize),
    Name(&'a str),
    Item(ItemId),
}

impl From<isize> for Bound<'_> {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for Bound<'_> {
    fn from(index: i32) -> Self {
        Self::Index(index as isize)
    }
}

impl From<usize> for Bound<'_> {
    fn from(index: usize) -> Self {
        Self::Index(isize::try_from(index).unwrap_or(isize::MAX))
    }
}

impl<'a> From<&'a str> for Bound<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl From<ItemId> for Bound<'_> {
    fn from(id: ItemId) -> Self {
        Self::Item(id)
    }
}

/// The two halves produced by [`MenuTree::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub primary: ItemId,
    pub secondary: ItemId,
}

impl MenuTree {
    /// Deep copy of an item and its subtree as a new root.
    pub fn copy(&mut self, id: ItemId) -> ItemId {
        let copy = self.push(self[id].detached_copy());
        let children: Vec<ItemId> = self.children(id).collect();
        for child in children {
            let child_copy = self.copy(child);
            self.link(copy, child_copy);
        }
        copy
    }

    /// Copy of the item holding only a contiguous run of its children.
    ///
    /// The run starts at `offset` and spans `length` children: `0` runs to
    /// the end, a positive count takes that many, a negative count stops
    /// that many short of the end, and a name or handle ends the run at that
    /// child. An offset that does not name a child gives an empty copy; an
    /// end past the last child runs to the end.
    ///
    /// ```
    /// use iomenu::MenuTree;
    ///
    /// let mut tree = MenuTree::new();
    /// let root = tree.add_root("root");
    /// for name in ["a", "b", "c", "d"] {
    ///     tree.add_child(root, name).unwrap();
    /// }
    ///
    /// let middle = tree.slice(root, 1, 2);
    /// assert_eq!(tree.get(middle).unwrap().names(), vec!["b", "c"]);
    /// let tail = tree.slice(root, "c", 0);
    /// assert_eq!(tree.get(tail).unwrap().names(), vec!["c", "d"]);
    /// ```
    pub fn slice<'a>(&mut self, id: ItemId, offset: impl Into<Bound<'a>>, length: impl Into<Bound<'a>>) -> ItemId {
        let children: Vec<ItemId> = self.children(id).collect();
        let count = isize::try_from(children.len()).unwrap_or(isize::MAX);

        let (offset, from) = match offset.into() {
            Bound::Index(i) => {
                let i = if i >= 0 { i } else { count.saturating_add(i) };
                (i, usize::try_from(i).ok().filter(|&i| i < children.len()))
            }
            Bound::Name(name) => self.child_position(id, |c| self[c].name() == name),
            Bound::Item(item) => self.child_position(id, |c| c == item),
        };

        let to = match length.into() {
            Bound::Index(len) => {
                let end = match len {
                    0 => count - 1,
                    len if len > 0 => offset.saturating_add(len - 1),
                    len => (count - 1).saturating_add(len),
                };
                usize::try_from(end).ok().filter(|&e| e < children.len())
            }
            Bound::Name(name) => children.iter().position(|&c| self[c].name() == name),
            Bound::Item(item) => {
                let name = self[item].name();
                children.iter().position(|&c| self[c].name() == name)
            }
        };

        let mut picked = Vec::new();
        let mut copying = false;
        for (i, &child) in children.iter().enumerate() {
            if Some(i) == from {
                copying = true;
            }
            if copying {
                picked.push(child);
            }
            if Some(i) == to {
                break;
            }
        }

        let slice = self.push(self[id].detached_copy());
        for child in picked {
            let child_copy = self.copy(child);
            self.link(slice, child_copy);
        }
        slice
    }

    /// Two copies of the item: the first `length` children and the rest.
    /// A name or handle splits after that child.
    pub fn split<'a>(&mut self, id: ItemId, length: impl Into<Bound<'a>>) -> Split {
        let count = self.count(id);
        let length = match length.into() {
            Bound::Index(i) => i,
            Bound::Name(name) => self.split_point(self.child(id, name), count),
            Bound::Item(item) => {
                let item = (self[item].parent() == Some(id)).then_some(item);
                self.split_point(item, count)
            }
        };

        Split {
            primary: self.slice(id, 0, length),
            secondary: self.slice(id, length, 0),
        }
    }

    fn split_point(&self, child: Option<ItemId>, count: usize) -> isize {
        let point = child.and_then(|c| self[c].num()).map_or(count, |num| num + 1);
        isize::try_from(point).unwrap_or(isize::MAX)
    }

    /// Position of the first child matching `pred`, as a slice offset.
    fn child_position(&self, id: ItemId, pred: impl Fn(ItemId) -> bool) -> (isize, Option<usize>) {
        match self.children(id).position(pred) {
            Some(i) => (isize::try_from(i).unwrap_or(isize::MAX), Some(i)),
            None => (0, None),
        }
    }
}
