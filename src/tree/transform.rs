//! Whole-tree transforms: flat map and the branch-set operations

use tracing::debug;

use super::{align, Aligned, Tree};
use crate::builder::{self, TreeMergeStrategy};

impl<T> Tree<T> {
    /// Replace every value by a tree, joining each node's original children
    /// after the children of its replacement.
    pub fn flat_map<K, F>(&self, f: F) -> Tree<K>
    where
        K: Clone + PartialEq,
        F: FnMut(&T) -> Tree<K>,
    {
        self.flat_map_with(f, TreeMergeStrategy::join())
    }

    /// Replace every value by a tree, combining it with the node's original
    /// (already expanded) children according to `strategy`.
    ///
    /// When the root expands to the empty tree and its orphans are kept, the
    /// leftmost orphan becomes the result.
    pub fn flat_map_with<K, F>(&self, mut f: F, strategy: TreeMergeStrategy<K>) -> Tree<K>
    where
        K: Clone,
        F: FnMut(&T) -> Tree<K>,
    {
        let pairs = self.pairs().map(|(count, value)| (count, f(value)));
        let slots = builder::assemble(pairs, strategy)
            .expect("the pairs of a decoded tree always encode that tree");
        let Some(root) = slots.into_iter().last().and_then(|slot| slot.into_iter().next()) else {
            return Tree::Empty;
        };
        debug!(size = root.size(), "flat map finished");
        match self {
            Tree::Array(_) => Tree::Node(root).deflated(),
            _ => Tree::Node(root),
        }
    }
}

impl<T: Clone + PartialEq> Tree<T> {
    /// Every branch of either tree. Matched children are unioned
    /// recursively, the rest are kept in order.
    ///
    /// A tree with a different root cannot be joined; `self` is returned.
    pub fn union(&self, other: &Tree<T>) -> Tree<T> {
        match align(self, other) {
            None if self.is_empty() => other.clone(),
            None => self.clone(),
            Some(Aligned::Nodes(a, b)) => Tree::Node(a.union(&b)),
            Some(Aligned::Arrays(a, b)) => Tree::Array(a.union(&b)),
        }
    }

    /// Only the branch prefixes present in both trees; empty when the roots
    /// differ.
    pub fn intersect(&self, other: &Tree<T>) -> Tree<T> {
        match align(self, other) {
            None => Tree::Empty,
            Some(Aligned::Nodes(a, b)) => a.intersect(&b).map_or(Tree::Empty, Tree::Node),
            Some(Aligned::Arrays(a, b)) => a.intersect(&b).map_or(Tree::Empty, Tree::Array),
        }
    }

    /// The branches of `self` that are not in `other`.
    pub fn diff(&self, other: &Tree<T>) -> Tree<T> {
        match align(self, other) {
            None => self.clone(),
            Some(Aligned::Nodes(a, b)) => a.diff(&b).map_or(Tree::Empty, Tree::Node),
            Some(Aligned::Arrays(a, b)) => a.diff(&b).map_or(Tree::Empty, Tree::Array),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EditOptions;

    fn sample() -> Tree<char> {
        Tree::node(
            'a',
            vec![Tree::node('b', vec![Tree::leaf('d'), Tree::leaf('e')]), Tree::leaf('c')],
        )
    }

    #[test]
    fn flat_map_joins_original_children() {
        let doubled = sample().flat_map(|&v| Tree::node(v, vec![Tree::leaf(v.to_ascii_uppercase())]));
        assert_eq!(doubled.to_string(), "a(A,b(B,d(D),e(E)),c(C))");
    }

    #[test]
    fn flat_map_to_empty_promotes_orphans() {
        let tree = sample().deflated();
        let pruned = tree.flat_map(|&v| if v == 'b' { Tree::Empty } else { Tree::leaf(v) });
        assert_eq!(pruned.to_string(), "a(d,e,c)");
        assert!(matches!(pruned, Tree::Array(_)));

        let root_gone = tree.flat_map(|&v| if v == 'a' { Tree::Empty } else { Tree::leaf(v) });
        assert_eq!(root_gone.to_string(), "b(d,e)");

        let replaced = tree.flat_map_with(
            |&v| if v == 'b' { Tree::Empty } else { Tree::leaf(v) },
            TreeMergeStrategy::replace(),
        );
        assert_eq!(replaced.to_string(), "a");
    }

    #[test]
    fn set_operations_across_representations() {
        let left = sample();
        let right = Tree::node('a', vec![Tree::node('b', vec![Tree::leaf('e')]), Tree::leaf('f')]);
        for (l, r) in [
            (left.clone(), right.clone()),
            (left.deflated(), right.clone()),
            (left.clone(), right.deflated()),
            (left.deflated(), right.deflated()),
        ] {
            assert_eq!(l.union(&r).to_string(), "a(b(d,e),c,f)");
            assert_eq!(l.intersect(&r).to_string(), "a(b(e))");
            assert_eq!(l.diff(&r).to_string(), "a(b(d),c)");
        }
    }

    #[test]
    fn set_operations_with_empty_and_foreign_roots() {
        let tree = sample();
        let foreign = Tree::leaf('z');
        assert_eq!(Tree::Empty.union(&tree), tree);
        assert_eq!(tree.union(&foreign), tree);
        assert!(tree.intersect(&foreign).is_empty());
        assert_eq!(tree.diff(&foreign), tree);
        assert!(tree.diff(&tree).is_empty());
        let grown = tree.insert_value_at(&['a', 'c'], 'x', EditOptions::default());
        assert_eq!(grown.diff(&tree).to_string(), "a(c(x))");
    }
}
