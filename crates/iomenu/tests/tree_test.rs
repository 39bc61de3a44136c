#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Structure of menu trees: building, lookup, removal and ordering.

mod common;

use common::{assert, check_test_tree, child_names, create_test_tree};
use iomenu::{AccessPolicy, Attributes, MenuError, MenuTree, NewItem};

#[test]
fn test_tree_has_expected_shape() {
    let t = create_test_tree();
    check_test_tree(&t.tree, t.root);

    assert!(t.tree.is_root(t.root));
    assert_eq!(t.tree.level(t.root), 0);
    assert_eq!(t.tree.level(t.ch4), 2);
    assert_eq!(t.tree.level(t.gc1), 3);
    assert_eq!(t.tree.root(t.gc1), t.root);
    assert_eq!(t.tree.parent(t.ch3), Some(t.pt1));
}

#[test]
fn first_and_last_flags() {
    let t = create_test_tree();
    let tree = &t.tree;

    assert!(!tree.is_first(t.root), "a root is never first");
    assert!(!tree.is_last(t.root), "a root is never last");
    assert!(tree.is_first(t.pt1));
    assert!(tree.is_last(t.pt2));
    assert!(tree.is_first(t.ch1) && !tree.is_last(t.ch1));
    assert!(!tree.is_first(t.ch2) && !tree.is_last(t.ch2));
    assert!(tree.is_last(t.ch3));
    assert!(tree.is_first(t.ch4) && tree.is_last(t.ch4));

    assert_eq!(tree.first_child(t.pt1), Some(t.ch1));
    assert_eq!(tree.last_child(t.pt1), Some(t.ch3));
    assert_eq!(tree.first_child(t.gc1), None);
}

#[test]
fn get_child_creates_missing_children_once() {
    let mut t = create_test_tree();
    let before = t.tree.len();

    let existing = t.tree.get_child(t.root, "Parent 1");
    assert_eq!(existing, t.pt1);
    assert_eq!(t.tree.len(), before);

    let created = t.tree.get_child(t.root, "Parent 3");
    assert_eq!(t.tree.len(), before + 1);
    assert_eq!(t.tree.parent(created), Some(t.root));
    assert_eq!(t.tree[created].num(), Some(2));
}

#[test]
fn duplicate_names_are_rejected() {
    let mut t = create_test_tree();
    let err = t.tree.add_child(t.pt1, "Child 1").unwrap_err();
    assert_eq!(
        err,
        MenuError::DuplicateName {
            parent: "Parent 1".to_string(),
            name: "Child 1".to_string(),
        }
    );
    assert_eq!(t.tree.count(t.pt1), 3, "nothing was added");

    let err = t.tree.set_name(t.ch2, "Child 1").unwrap_err();
    assert!(matches!(err, MenuError::DuplicateName { .. }));
    assert_eq!(t.tree[t.ch2].name(), "Child 2");
}

#[test]
fn attaching_an_attached_item_fails() {
    let mut t = create_test_tree();
    let err = t.tree.attach(t.pt2, t.ch1).unwrap_err();
    assert!(matches!(err, MenuError::AlreadyAttached { ref name } if name == "Child 1"));
}

#[test]
fn attaching_beneath_itself_fails() {
    let mut tree = MenuTree::new();
    let root = tree.add_root("root");
    let child = tree.add_child(root, "child").unwrap();

    let err = tree.attach(child, root).unwrap_err();
    assert!(matches!(err, MenuError::CyclicAttachment { .. }));
    assert!(tree.is_root(root));
}

#[test]
fn removing_children_renumbers_siblings() {
    let mut tree = MenuTree::new();
    let root = tree.add_root("root");
    let names = ["gc1", "gc2", "gc3", "gc4"];
    for name in names {
        tree.add_child(root, name).unwrap();
    }

    let removed = tree.remove_child(root, "gc2").unwrap();
    assert!(tree.is_root(removed));
    assert_eq!(tree[removed].num(), None);
    assert_eq!(child_names(&tree, root), vec!["gc1", "gc3", "gc4"]);
    assert::contiguous(&tree, root);

    let gc4 = tree.child(root, "gc4").unwrap();
    assert_eq!(tree.remove_child(root, gc4), Some(gc4));
    assert_eq!(child_names(&tree, root), vec!["gc1", "gc3"]);

    assert_eq!(tree.remove_child(root, "missing"), None, "unknown names are ignored");
    assert_eq!(tree.count(root), 2);
}

#[test]
fn removed_subtree_can_be_reattached_elsewhere() {
    let mut t = create_test_tree();
    let ch4 = t.tree.detach(t.ch4).unwrap();
    assert_eq!(t.tree.count(t.pt2), 0);
    assert_eq!(t.tree.count(ch4), 1, "the subtree travels along");

    t.tree.attach(t.pt1, ch4).unwrap();
    assert_eq!(child_names(&t.tree, t.pt1), vec!["Child 1", "Child 2", "Child 3", "Child 4"]);
    assert_eq!(t.tree.level(t.gc1), 3);
}

#[test]
fn move_to_first_position() {
    let mut t = create_test_tree();
    t.tree.move_to_first_position(t.ch3).unwrap();

    assert_eq!(child_names(&t.tree, t.pt1), vec!["Child 3", "Child 1", "Child 2"]);
    assert_eq!(t.tree[t.ch3].num(), Some(0));
    assert!(t.tree.is_first(t.ch3));
    assert!(t.tree.is_last(t.ch2));
    assert::contiguous(&t.tree, t.pt1);
}

#[test]
fn move_named_child_to_first_position() {
    let mut tree = MenuTree::new();
    let menu = tree.add_root("menu");
    for name in ["c1", "c2", "c3", "c4"] {
        tree.add_child(menu, name).unwrap();
    }

    let c3 = tree.get(menu).unwrap().get("c3").unwrap().id();
    tree.move_to_first_position(c3).unwrap();
    assert_eq!(child_names(&tree, menu), vec!["c3", "c1", "c2", "c4"]);
}

#[test]
fn removing_the_last_child_moves_the_last_flag() {
    let mut tree = MenuTree::new();
    let ch = tree.add_root("ch");
    let gc: Vec<_> = ["gc1", "gc2", "gc3", "gc4"]
        .into_iter()
        .map(|name| tree.add_child(ch, name).unwrap())
        .collect();
    assert!(tree.is_last(gc[3]));

    tree.remove_child(ch, "gc4");
    assert_eq!(tree.count(ch), 3);
    assert!(tree.is_first(gc[0]));
    assert!(tree.is_last(gc[2]));
    assert!(!tree.is_last(gc[3]));
}

#[test]
fn move_to_last_and_arbitrary_positions() {
    let mut t = create_test_tree();
    t.tree.move_to_last_position(t.ch1).unwrap();
    assert_eq!(child_names(&t.tree, t.pt1), vec!["Child 2", "Child 3", "Child 1"]);

    t.tree.move_to_position(t.ch1, 1).unwrap();
    assert_eq!(child_names(&t.tree, t.pt1), vec!["Child 2", "Child 1", "Child 3"]);

    t.tree.move_child_to_position(t.pt1, "Child 2", 99).unwrap();
    assert_eq!(child_names(&t.tree, t.pt1), vec!["Child 1", "Child 3", "Child 2"]);
    assert::contiguous(&t.tree, t.pt1);
}

#[test]
fn moving_a_root_fails() {
    let mut t = create_test_tree();
    let err = t.tree.move_to_first_position(t.root).unwrap_err();
    assert_eq!(
        err,
        MenuError::Detached {
            name: "Root li".to_string()
        }
    );
}

#[test]
fn reorder_children_requires_every_child() {
    let mut t = create_test_tree();

    let err = t.tree.reorder_children(t.pt1, &["Child 1", "Child 2"]).unwrap_err();
    assert!(matches!(err, MenuError::ReorderMismatch { expected: 3, actual: 2, .. }));

    let err = t
        .tree
        .reorder_children(t.pt1, &["Child 1", "Child 2", "Child 9"])
        .unwrap_err();
    assert!(matches!(err, MenuError::UnknownChild { .. }));

    let err = t
        .tree
        .reorder_children(t.pt1, &["Child 1", "Child 1", "Child 2"])
        .unwrap_err();
    assert!(matches!(err, MenuError::ReorderMismatch { .. }));
    assert_eq!(
        child_names(&t.tree, t.pt1),
        vec!["Child 1", "Child 2", "Child 3"],
        "failed reorders leave the order alone"
    );

    t.tree
        .reorder_children(t.pt1, &["Child 3", "Child 2", "Child 1"])
        .unwrap();
    assert_eq!(child_names(&t.tree, t.pt1), vec!["Child 3", "Child 2", "Child 1"]);
    assert::contiguous(&t.tree, t.pt1);
}

#[test]
fn handle_indexes_follow_creation_order() {
    let mut tree = MenuTree::new();
    let root = tree.add_root("menu");
    let a = tree.add_child(root, "a").unwrap();
    let b = tree.add_child(root, "b").unwrap();
    assert_eq!((root.index(), a.index(), b.index()), (0, 1, 2));

    tree.remove_child(root, "a");
    let c = tree.add_child(root, "c").unwrap();
    assert_eq!(c.index(), 3, "removed items keep their slot");
    assert_eq!(a.index(), 1);
}

#[test]
fn getters_and_setters() {
    let mut tree = MenuTree::new();
    let menu = tree.add_root(NewItem::new("test menu").route("https://example.org/menu"));
    let item = &mut tree[menu];

    assert_eq!(item.name(), "test menu");
    assert_eq!(item.route(), Some("https://example.org/menu"));
    assert_eq!(item.label(), None);
    assert_eq!(item.raw_label(), "test menu", "the label defaults to the name");

    item.set_label("test label");
    assert_eq!(item.raw_label(), "test label");
    item.clear_label();
    assert_eq!(item.raw_label(), "test menu");

    item.set_attribute("id", "test_id");
    assert_eq!(item.attribute("id"), Some("test_id"));
    assert_eq!(item.attribute("fake"), None);

    item.set_show(false).set_show_children(false);
    assert!(!item.show());
    assert!(!item.show_children());

    item.set_requires_auth(Some(true)).set_requires_no_auth(Some(false));
    assert_eq!(item.requires_auth(), Some(true));
    assert_eq!(item.requires_no_auth(), Some(false));

    tree.set_name(menu, "renamed").unwrap();
    assert_eq!(tree[menu].name(), "renamed");
}

#[test]
fn menu_roots_hand_their_child_policy_down() {
    let mut tree = MenuTree::new();
    let root = tree.add_root(NewItem::menu_root(
        Attributes::from([("class", "root".to_string())]),
        AccessPolicy::RequireAnyChild,
    ));
    assert_eq!(tree[root].name(), "");
    assert_eq!(tree[root].policy(), AccessPolicy::Standard);
    assert_eq!(tree[root].attribute("class"), Some("root"));

    let child = tree.add_child(root, "child").unwrap();
    assert_eq!(tree[child].policy(), AccessPolicy::RequireAnyChild);

    let grandchild = tree.get_child(child, "grandchild");
    assert_eq!(
        tree[grandchild].policy(),
        AccessPolicy::RequireAnyChild,
        "without a child policy the parent's own policy is inherited"
    );

    let plain = tree
        .add_child(root, NewItem::new("plain").policy(AccessPolicy::Standard))
        .unwrap();
    assert_eq!(tree[plain].policy(), AccessPolicy::Standard);
}

#[test]
fn item_views_navigate_by_name() {
    let t = create_test_tree();
    let root = t.tree.get(t.root).unwrap();

    let gc1 = root.get("Parent 2").and_then(|p| p.get("Child 4")).and_then(|c| c.get("Grandchild 1"));
    let gc1 = gc1.unwrap();
    assert_eq!(gc1.id(), t.gc1);
    assert_eq!(gc1.level(), 3);
    assert_eq!(gc1.root_ref().id(), t.root);
    assert_eq!(gc1.parent_ref().map(|p| p.id()), Some(t.ch4));

    assert_eq!(root.names(), vec!["Parent 1", "Parent 2"]);
    assert_eq!(root.iter().count(), 2);
    assert!(root.get("missing").is_none());
}

#[test]
fn subtree_is_in_render_order() {
    let t = create_test_tree();
    let names: Vec<&str> = t.tree.subtree(t.root).into_iter().map(|i| t.tree[i].name()).collect();
    assert_eq!(
        names,
        vec![
            "Root li",
            "Parent 1",
            "Child 1",
            "Child 2",
            "Child 3",
            "Parent 2",
            "Child 4",
            "Grandchild 1"
        ]
    );
}

#[test]
fn path_as_string_joins_labels() {
    let mut t = create_test_tree();
    t.tree[t.ch4].set_label("Fourth");
    assert_eq!(
        t.tree.path_as_string(t.gc1, " > "),
        "Root li > Parent 2 > Fourth > Grandchild 1"
    );
}
