//! iomenu test utilities.
//!
//! Fixtures shared by the integration tests: the standard test tree, the
//! fully configured menu used for markup snapshots, users and a route table.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use iomenu::{
    Credentials, ItemId, MenuContext, MenuTree, NewItem, Options, SessionUser, StaticRoutes,
};
use serde_json::Value;

/// Base URL of [`test_routes`].
pub const BASE_URL: &str = "http://localhost";

/// Request URI the snapshot menu is rendered for.
pub const CURRENT_URI: &str = "http://localhost/test/menu";

/// Handles of the standard test tree.
///
/// ```text
///          rt
///        /    \
///     pt1      pt2
///   /  |  \     |
/// ch1 ch2 ch3  ch4
///               |
///              gc1
/// ```
#[derive(Debug)]
pub struct TestTree {
    pub tree: MenuTree,
    pub root: ItemId,
    pub pt1: ItemId,
    pub pt2: ItemId,
    pub ch1: ItemId,
    pub ch2: ItemId,
    pub ch3: ItemId,
    pub ch4: ItemId,
    pub gc1: ItemId,
}

/// Build the standard test tree in a fresh [`MenuTree`].
///
/// Parents are created by name lookup, `Child 3` is created on its own and
/// then attached.
pub fn create_test_tree() -> TestTree {
    create_test_tree_in(MenuTree::new())
}

/// Build the standard test tree in the given (possibly configured) tree.
pub fn create_test_tree_in(mut tree: MenuTree) -> TestTree {
    let root = tree.add_root(NewItem::new("Root li").attribute("class", "root"));
    let pt1 = tree.get_child(root, "Parent 1");
    let ch1 = tree.add_child(pt1, "Child 1").expect("fresh name");
    let ch2 = tree.add_child(pt1, "Child 2").expect("fresh name");

    let ch3 = tree.add_root("Child 3");
    tree.attach(pt1, ch3).expect("detached item");

    let pt2 = tree.get_child(root, "Parent 2");
    let ch4 = tree.add_child(pt2, "Child 4").expect("fresh name");
    let gc1 = tree.add_child(ch4, "Grandchild 1").expect("fresh name");

    TestTree {
        tree,
        root,
        pt1,
        pt2,
        ch1,
        ch2,
        ch3,
        ch4,
        gc1,
    }
}

/// Check the shape of the standard test tree.
pub fn check_test_tree(tree: &MenuTree, root: ItemId) {
    let menu = tree.get(root).expect("root exists");
    assert_eq!(menu.len(), 2, "count(rt) returns 2 children");

    let pt1 = menu.get("Parent 1").expect("Parent 1");
    assert_eq!(pt1.len(), 3, "count(pt1) returns 3 children");

    let pt2 = menu.get("Parent 2").expect("Parent 2");
    assert_eq!(pt2.len(), 1, "count(pt2) returns 1 child");

    let ch4 = pt2.get("Child 4").expect("Child 4");
    assert_eq!(ch4.len(), 1, "count(ch4) returns 1 child");

    let gc1 = ch4.get("Grandchild 1").expect("Grandchild 1");
    assert_eq!(gc1.name(), "Grandchild 1");
}

/// Route table with `homepage` at `/` and `test_menu` at `/test/menu`.
pub fn test_routes() -> StaticRoutes {
    StaticRoutes::new(BASE_URL)
        .expect("valid base url")
        .route("homepage", "/")
        .route("test_menu", "/test/menu")
}

/// Context of the snapshot menu: route table, anonymous user and
/// [`CURRENT_URI`].
pub fn snapshot_context() -> MenuContext {
    MenuContext::new()
        .with_routes(test_routes())
        .with_user(anonymous_user())
        .with_request_uri(CURRENT_URI)
}

/// The standard tree configured for the markup snapshot.
///
/// `Parent 1` links absolutely to the homepage; `Child 1` becomes absolute
/// through its link options and carries a query string; `Child 3` needs an
/// authenticated user and is hidden; `Parent 2` has its own class and
/// title; `Child 4` links to the current page.
pub fn snapshot_tree() -> TestTree {
    let mut t = create_test_tree_in(MenuTree::new().with_context(snapshot_context()));
    let tree = &mut t.tree;

    tree[t.pt1]
        .set_route(Some("homepage".to_string()))
        .set_url_options(Options::from([("absolute", Value::Bool(true))]));
    tree[t.ch1]
        .set_route(Some("/parent1/ch1".to_string()))
        .set_link_options(Options::from([
            ("absolute", Value::Bool(true)),
            ("query_string", Value::from("test=1")),
        ]));
    tree[t.ch2].set_route(Some("/parent1/ch2".to_string()));
    tree[t.ch3]
        .set_route(Some("/parent1/ch3".to_string()))
        .set_requires_auth(Some(true));
    tree[t.pt2]
        .set_attribute("class", "parent2_class")
        .set_attribute("title", "parent2 title");
    tree[t.ch4].set_route(Some("@test_menu".to_string()));
    t
}

/// Expected indented markup of [`snapshot_tree`].
pub const SNAPSHOT_PRETTY: &str = r#"<ul class="root">
  <li class="first">
    <a href="http://localhost/">Parent 1</a>
    <ul class="menu_level_1">
      <li class="first">
        <a href="http://localhost/parent1/ch1?test=1">Child 1</a>
      </li>
      <li class="last">
        <a href="/parent1/ch2">Child 2</a>
      </li>
    </ul>
  </li>
  <li class="parent2_class current_ancestor last" title="parent2 title">
    Parent 2
    <ul class="menu_level_1">
      <li class="current first last">
        <a href="/test/menu">Child 4</a>
        <ul class="menu_level_2">
          <li class="first last">
            Grandchild 1
          </li>
        </ul>
      </li>
    </ul>
  </li>
</ul>
"#;

/// Strip the indentation and line breaks of indented markup.
pub fn compact(pretty: &str) -> String {
    pretty.lines().map(str::trim).collect()
}

/// An anonymous user.
pub fn anonymous_user() -> SessionUser {
    SessionUser::anonymous()
}

/// An authenticated user holding the given credentials.
pub fn test_user(credentials: &[&str]) -> SessionUser {
    credentials
        .iter()
        .fold(SessionUser::authenticated(), |user, c| user.with_credential(*c))
}

/// An authenticated user holding `admin`.
pub fn admin_user() -> SessionUser {
    test_user(&["admin"])
}

/// `c1 AND (c2 OR c3)`.
pub fn sample_credentials() -> Credentials {
    Credentials::all(["c1"]).and_any_of(["c2", "c3"])
}

/// Child names of an item, in order.
pub fn child_names(tree: &MenuTree, id: ItemId) -> Vec<String> {
    tree.children(id).map(|c| tree[c].name().to_string()).collect()
}

/// Assertion helpers for rendered markup.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected markup to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected markup to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that `num` of every child equals its position.
    pub fn contiguous(tree: &iomenu::MenuTree, id: iomenu::ItemId) {
        for (i, child) in tree.children(id).enumerate() {
            assert_eq!(
                tree[child].num(),
                Some(i),
                "child '{}' has num {:?} at position {i}",
                tree[child].name(),
                tree[child].num()
            );
        }
    }
}
