//! Walking a subtree.

use crate::item::{ItemId, MenuItem};
use crate::tree::MenuTree;

/// Callback for [`MenuTree::walk`]. Items are visited in render order,
/// each before its children.
pub trait MenuVisitor {
    fn visit(&mut self, tree: &MenuTree, id: ItemId, depth: usize);
}

impl<F: FnMut(&MenuTree, ItemId, usize)> MenuVisitor for F {
    fn visit(&mut self, tree: &MenuTree, id: ItemId, depth: usize) {
        self(tree, id, depth);
    }
}

impl MenuTree {
    /// Visit the item and its descendants; `depth` is 0 for the item itself.
    pub fn walk(&self, id: ItemId, visitor: &mut dyn MenuVisitor) {
        let mut stack = vec![(id, 0usize)];
        while let Some((next, depth)) = stack.pop() {
            visitor.visit(self, next, depth);
            stack.extend(self[next].children().iter().rev().map(|&c| (c, depth + 1)));
        }
    }

    /// Apply `f` to the item and every descendant.
    pub fn call_recursively(&mut self, id: ItemId, mut f: impl FnMut(&mut MenuItem)) {
        for item in self.subtree(id) {
            f(&mut self[item]);
        }
    }
}
