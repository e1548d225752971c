use ordtree::{EditOptions, Tree};

const DEPTH: u32 = 200_000;

fn chain() -> Tree<u32> {
    Tree::linear(0..DEPTH)
}

fn spine() -> Vec<u32> {
    (0..DEPTH).collect()
}

#[test]
fn long_chains_build_and_drop() {
    let tree = chain();
    assert_eq!(tree.height(), DEPTH as usize);
    let array = tree.deflated();
    assert_eq!(array.height(), DEPTH as usize);
    assert_eq!(array.inflated(), tree);
    drop(array);
    drop(tree);
}

#[test]
fn long_chains_walk_and_render() {
    for tree in [chain(), chain().deflated()] {
        let branches = tree.branches();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].len(), DEPTH as usize);
        assert!(tree.contains_branch(&spine()));
        let nested = tree.to_string();
        assert!(nested.starts_with("0(1(2("));
        assert!(nested.ends_with(&")".repeat(DEPTH as usize - 1)));
    }
}

#[test]
fn long_chains_edit_at_the_bottom() {
    let path = spine();
    for tree in [chain(), chain().deflated()] {
        let grown = tree.insert_value_at(&path, DEPTH, EditOptions::default());
        assert_eq!(grown.height(), DEPTH as usize + 1);
        let twin = grown.insert_value_at(&path, DEPTH + 1, EditOptions::default());
        assert_eq!(twin.width(), 2);
        let doubled = twin.map(|v| v * 2);
        assert_eq!(doubled.size(), twin.size());
    }
}

#[test]
fn long_chains_combine() {
    let path = spine();
    let left = chain().insert_value_at(&path, DEPTH, EditOptions::default());
    let right = chain().insert_value_at(&path, DEPTH + 1, EditOptions::default());
    for (l, r) in [(left.clone(), right.clone()), (left.deflated(), right.deflated())] {
        assert_eq!(l.union(&r).width(), 2);
        assert_eq!(l.intersect(&r), chain());
        let rest = l.diff(&r);
        assert_eq!(rest, left);
        assert!(l.diff(&l).is_empty());
    }
}
