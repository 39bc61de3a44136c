#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common helpers for the iomenu integration tests.
//!
//! Tree fixtures come from `iomenu-test-utils`; this module adds what only
//! the tests in this crate need.

#![allow(dead_code)]

use std::path::PathBuf;

use iomenu::{ItemId, ListRenderer, MenuTree, RenderOptions};

pub use iomenu_test_utils::*;

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Render without indentation, regardless of the tree's configuration.
pub fn render_compressed(tree: &MenuTree, id: ItemId, depth: Option<usize>) -> String {
    let renderer = ListRenderer::new(RenderOptions::from_config(tree.config()).compressed(true));
    tree.render_with(&renderer, id, depth)
}
