#[path = "common/mod.rs"]
mod common;

use common::{both, sample};
use ordtree::{EditOptions, Tree};
use test_case::test_case;

#[test_case(&["a", "b", "d"], Some("d") ; "full path to a leaf")]
#[test_case(&["a", "b"], Some("b(d,e)") ; "inner node")]
#[test_case(&["a"], Some("a(b(d,e),c)") ; "root")]
#[test_case(&["a", "x"], None ; "missing child")]
#[test_case(&["b"], None ; "wrong root")]
#[test_case(&[], None ; "empty path")]
fn select_tree(path: &[&'static str], expected: Option<&str>) {
    for tree in both(sample()) {
        let found = tree.select_tree(path, false).map(|t| t.to_string());
        assert_eq!(found.as_deref(), expected);
    }
}

#[test_case(&["a", "b"], "x", "a(b(d,e,x),c)" ; "append under inner node")]
#[test_case(&["a", "b"], "d", "a(b(d,e),c)" ; "distinct leaf already there")]
#[test_case(&["a", "b", "q"], "x", "a(b(d,e,q(x)),c)" ; "missing suffix is created")]
#[test_case(&["z"], "x", "a(b(d,e),c)" ; "wrong root is refused")]
fn insert_value_at(path: &[&'static str], value: &'static str, expected: &str) {
    for tree in both(sample()) {
        let edited = tree.insert_value_at(path, value, EditOptions::default());
        assert_eq!(edited.to_string(), expected);
    }
}

#[test_case(&["a", "b"], true, "a(b(d,e,x),c)" ; "whole path exists")]
#[test_case(&["a", "b", "q"], false, "a(b(d,e),c)" ; "partial path is refused")]
#[test_case(&[], false, "a(b(d,e),c)" ; "empty path")]
fn try_insert_value_at(path: &[&'static str], modified: bool, expected: &str) {
    for tree in both(sample()) {
        let outcome = tree.try_insert_value_at(path, "x", EditOptions::default());
        assert_eq!(outcome.is_modified(), modified);
        assert_eq!(outcome.into_inner().to_string(), expected);
    }
}

#[test]
fn distinct_insert_merges_grandchildren() {
    let first = Tree::node("b", vec![Tree::leaf("x")]);
    let second = Tree::node("b", vec![Tree::leaf("y"), Tree::leaf("x")]);
    for tree in both(Tree::leaf("a")) {
        let once = tree.insert_tree_at(&["a"], &first, EditOptions::default());
        let twice = once.insert_tree_at(&["a"], &second, EditOptions::default());
        assert_eq!(twice.to_string(), "a(b(x,y))");
        assert_eq!(twice.child_count(), 1);
    }
}

#[test]
fn lax_insert_duplicates() {
    for tree in both(Tree::leaf("a")) {
        let once = tree.insert_value_at(&["a"], "b", EditOptions::lax());
        let twice = once.insert_value_at(&["a"], "b", EditOptions::lax());
        assert_eq!(twice.to_string(), "a(b,b)");
    }
}

#[test]
fn prepend_puts_new_children_first() {
    let options = EditOptions::default().with_append(false);
    for tree in both(sample()) {
        let edited = tree.insert_value_at(&["a"], "x", options);
        assert_eq!(edited.to_string(), "a(x,b(d,e),c)");
        let merged = edited.insert_tree_at(
            &["a"],
            &Tree::node("b", vec![Tree::leaf("p"), Tree::leaf("q")]),
            options,
        );
        assert_eq!(merged.to_string(), "a(x,b(p,q,d,e),c)");
    }
}

#[test]
fn rightmost_follows_the_last_duplicate() {
    let tree = Tree::node(
        "a",
        vec![
            Tree::node("b", vec![Tree::leaf("x")]),
            Tree::node("b", vec![Tree::leaf("y")]),
        ],
    );
    for tree in both(tree) {
        let left = tree.insert_value_at(&["a", "b"], "z", EditOptions::lax());
        assert_eq!(left.to_string(), "a(b(x,z),b(y))");
        let right = tree.insert_value_at(&["a", "b"], "z", EditOptions::lax().with_rightmost(true));
        assert_eq!(right.to_string(), "a(b(x),b(y,z))");
    }
}

#[test_case(&["a", "b", "f"], "a(b(d,e,f),c)" ; "extends a leaf path")]
#[test_case(&["a", "c", "g", "h"], "a(b(d,e),c(g(h)))" ; "extends a shallow branch")]
#[test_case(&["a", "b"], "a(b(d,e),c)" ; "already present")]
fn insert_branch(branch: &[&'static str], expected: &str) {
    for tree in both(sample()) {
        let edited = tree.insert_branch(branch, EditOptions::default()).into_inner();
        assert_eq!(edited.to_string(), expected);
    }
}

#[test_case(&["a", "c"], "b", true, "a(b(d,e))" ; "distinct rename merges")]
#[test_case(&["a", "c"], "b", false, "a(b(d,e),b)" ; "lax rename duplicates")]
#[test_case(&["a"], "r", true, "r(b(d,e),c)" ; "root rename")]
fn update_value_at(path: &[&'static str], value: &'static str, keep_distinct: bool, expected: &str) {
    let options = EditOptions::default().with_keep_distinct(keep_distinct);
    for tree in both(sample()) {
        let edited = tree.update_value_at(path, value, options);
        assert!(edited.is_modified());
        assert_eq!(edited.into_inner().to_string(), expected);
    }
}

#[test]
fn update_tree_at_replaces_and_merges() {
    let replacement = Tree::node("c", vec![Tree::leaf("z")]);
    for tree in both(sample()) {
        let edited = tree.update_tree_at(&["a", "b"], &replacement, EditOptions::default());
        assert_eq!(edited.into_inner().to_string(), "a(c(z))");

        let lax = tree.update_tree_at(&["a", "b"], &replacement, EditOptions::lax());
        assert_eq!(lax.into_inner().to_string(), "a(c(z),c)");

        let root = tree.update_tree_at(&["a"], &replacement.deflated(), EditOptions::default());
        assert_eq!(root.into_inner(), replacement);
    }
}

#[test_case(&["a", "b"], true, "a(d,e,c)" ; "lift children in place")]
#[test_case(&["a", "b", "d"], true, "a(b(e),c)" ; "leaf")]
#[test_case(&["a", "x"], false, "a(b(d,e),c)" ; "missing path")]
#[test_case(&["a"], false, "a(b(d,e),c)" ; "root with two children stays")]
fn remove_value_at(path: &[&'static str], modified: bool, expected: &str) {
    for tree in both(sample()) {
        let outcome = tree.remove_value_at(path, EditOptions::default());
        assert_eq!(outcome.is_modified(), modified);
        assert_eq!(outcome.into_inner().to_string(), expected);
    }
}

#[test]
fn root_removal_special_cases() {
    for tree in both(Tree::node("a", vec![Tree::leaf("b")])) {
        let outcome = tree.remove_value_at(&["a"], EditOptions::default());
        assert_eq!(outcome.into_inner(), Tree::leaf("b"));
    }
    for tree in both(Tree::leaf("a")) {
        let outcome = tree.remove_value_at(&["a"], EditOptions::default());
        assert!(outcome.is_modified());
        assert!(outcome.into_inner().is_empty());
    }
}

#[test]
fn lifted_children_merge_with_siblings() {
    // a(b(c(x), d), c(y))
    let tree = Tree::node(
        "a",
        vec![
            Tree::node("b", vec![Tree::node("c", vec![Tree::leaf("x")]), Tree::leaf("d")]),
            Tree::node("c", vec![Tree::leaf("y")]),
        ],
    );
    for tree in both(tree) {
        let distinct = tree.remove_value_at(&["a", "b"], EditOptions::default());
        assert_eq!(distinct.into_inner().to_string(), "a(d,c(y,x))");
        let lax = tree.remove_value_at(&["a", "b"], EditOptions::lax());
        assert_eq!(lax.into_inner().to_string(), "a(c(x),d,c(y))");
    }
}

#[test_case(&["a", "b"], "a(c)" ; "inner subtree")]
#[test_case(&["a"], "" ; "whole tree")]
fn remove_tree_at(path: &[&'static str], expected: &str) {
    for tree in both(sample()) {
        let outcome = tree.remove_tree_at(path, EditOptions::default());
        assert!(outcome.is_modified());
        assert_eq!(outcome.into_inner().to_string(), expected);
    }
}

#[test]
fn modifiers_apply_functions() {
    for tree in both(sample()) {
        let renamed = tree
            .modify_value_at(&["a", "b"], |_| "z", EditOptions::default())
            .into_inner();
        assert_eq!(renamed.to_string(), "a(z(d,e),c)");

        let pruned = tree
            .modify_tree_at(
                &["a", "b"],
                |sub| sub.remove_tree_at(&["b", "d"], EditOptions::default()).into_inner(),
                EditOptions::default(),
            )
            .into_inner();
        assert_eq!(pruned.to_string(), "a(b(e),c)");

        assert!(tree
            .modify_value_at(&["q"], |_| "z", EditOptions::default())
            .is_unchanged());
    }
}

#[test]
fn root_child_inserts() {
    for tree in both(sample()) {
        let grown = tree
            .insert_leaf("f", EditOptions::default())
            .insert_child(&Tree::node("b", vec![Tree::leaf("g")]), EditOptions::default());
        assert_eq!(grown.to_string(), "a(b(d,e,g),c,f)");
        let more = tree.insert_children(&[Tree::leaf("x"), Tree::leaf("c")], EditOptions::default());
        assert_eq!(more.to_string(), "a(b(d,e),c,x)");
    }
}
