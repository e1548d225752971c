#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ordtree::{EditOptions, Tree};
use proptest::prelude::*;

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("ORDTREE_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set ORDTREE_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n").trim_end().to_string()
}

/// `a(b(d, e), c)`
pub fn sample() -> Tree<&'static str> {
    Tree::node(
        "a",
        vec![
            Tree::node("b", vec![Tree::leaf("d"), Tree::leaf("e")]),
            Tree::leaf("c"),
        ],
    )
}

/// Both representations of the same tree.
pub fn both<T: Clone>(tree: Tree<T>) -> [Tree<T>; 2] {
    let array = tree.deflated();
    [tree.inflated(), array]
}

/// Owned copy of a borrowed path.
pub fn owned<T: Clone>(path: &[&T]) -> Vec<T> {
    path.iter().map(|&value| value.clone()).collect()
}

/// Whether some root-to-node path spells `path`, whatever duplicates exist.
pub fn has_path<T: PartialEq>(tree: &Tree<T>, path: &[&T]) -> bool {
    tree.paths().iter().any(|candidate| candidate.as_slice() == path)
}

/// The same branches with every child list made distinct.
pub fn distinct<T: Clone + PartialEq>(tree: &Tree<T>) -> Tree<T> {
    tree.branches().iter().fold(Tree::Empty, |acc, branch| {
        acc.insert_branch(&owned(branch), EditOptions::default())
            .into_inner()
    })
}

/// Small-alphabet trees, so duplicate siblings and matching paths are common.
pub fn arb_tree() -> impl Strategy<Value = Tree<u8>> {
    let leaf = (0u8..4).prop_map(Tree::leaf);
    leaf.prop_recursive(4, 40, 4, |inner| {
        (0u8..4, prop::collection::vec(inner, 0..4))
            .prop_map(|(value, children)| Tree::node(value, children))
    })
}

/// Trees whose root is always `0`.
pub fn arb_rooted_tree() -> impl Strategy<Value = Tree<u8>> {
    prop::collection::vec(arb_tree(), 0..4).prop_map(|children| Tree::node(0, children))
}

/// A tree plus a path that follows an existing node and then possibly
/// wanders off it.
pub fn arb_tree_and_path() -> impl Strategy<Value = (Tree<u8>, Vec<u8>)> {
    (
        arb_tree(),
        any::<prop::sample::Index>(),
        prop::collection::vec(0u8..4, 0..3),
    )
        .prop_map(|(tree, index, suffix)| {
            let paths = tree.paths();
            let mut path = owned(&paths[index.index(paths.len())]);
            path.extend(suffix);
            (tree, path)
        })
}

pub fn arb_options() -> impl Strategy<Value = EditOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(keep_distinct, append, rightmost)| {
        EditOptions::default()
            .with_keep_distinct(keep_distinct)
            .with_append(append)
            .with_rightmost(rightmost)
    })
}
