//! Branch-set operations computed directly on the arrays

use super::functions::{children_indexes, subtree_range};
use super::ArrayTree;

impl<T: Clone + PartialEq> ArrayTree<T> {
    /// Every branch of both trees; matched children are unioned recursively.
    ///
    /// Trees with different roots cannot be joined; `self` comes back as is.
    pub fn union(&self, other: &ArrayTree<T>) -> ArrayTree<T> {
        if self.value() != other.value() || other.is_leaf() {
            return self.clone();
        }
        let mut merged = self.mutable();
        merged.merge_children(other.structure(), other.content());
        let (structure, content) = (merged.structure().to_vec(), merged.content().to_vec());
        ArrayTree::from_vecs_unchecked(structure, content)
    }

    /// Only the paths present in both trees. `None` when the roots differ.
    pub fn intersect(&self, other: &ArrayTree<T>) -> Option<ArrayTree<T>> {
        if self.value() != other.value() {
            return None;
        }
        let mut out = Emitter::with_capacity(self.size().min(other.size()));
        let mut stack = vec![Frame::open(self, self.root_index(), vec![other.root_index()])];
        while let Some(mut frame) = stack.pop() {
            if let Some(&child) = frame.kids.get(frame.next) {
                frame.next += 1;
                let matches = counterparts(other, &frame.rights, &self.content()[child]);
                if matches.is_empty() {
                    stack.push(frame);
                } else {
                    frame.kept += 1;
                    stack.push(frame);
                    stack.push(Frame::open(self, child, matches));
                }
                continue;
            }
            out.push(frame.kept, &self.content()[frame.left]);
        }
        Some(out.finish())
    }

    /// The branches of `self` that `other` does not contain.
    ///
    /// `None` when every branch of `self` is covered by `other`.
    pub fn diff(&self, other: &ArrayTree<T>) -> Option<ArrayTree<T>> {
        if self.value() != other.value() {
            return Some(self.clone());
        }
        let mut out = Emitter::with_capacity(self.size());
        let mut survived = false;
        let mut stack = vec![Frame::open(self, self.root_index(), vec![other.root_index()])];
        while let Some(mut frame) = stack.pop() {
            if let Some(&child) = frame.kids.get(frame.next) {
                frame.next += 1;
                let matches = counterparts(other, &frame.rights, &self.content()[child]);
                if matches.is_empty() {
                    out.copy_block(self, child);
                    frame.kept += 1;
                    stack.push(frame);
                } else {
                    stack.push(frame);
                    stack.push(Frame::open(self, child, matches));
                }
                continue;
            }
            // a node left without children was fully covered; its
            // descendants emitted nothing either
            let kept = frame.kept > 0;
            if kept {
                out.push(frame.kept, &self.content()[frame.left]);
            }
            match stack.last_mut() {
                Some(parent) => parent.kept += usize::from(kept),
                None => survived = kept,
            }
        }
        survived.then(|| out.finish())
    }
}

/// A left entry matched against every right entry holding its value.
struct Frame {
    left: usize,
    rights: Vec<usize>,
    kids: Vec<usize>,
    next: usize,
    kept: usize,
}

impl Frame {
    fn open<T>(tree: &ArrayTree<T>, left: usize, rights: Vec<usize>) -> Self {
        Self {
            left,
            rights,
            kids: children_indexes(tree.structure(), left),
            next: 0,
            kept: 0,
        }
    }
}

/// Children of any of `rights` holding `value`; duplicates all count.
fn counterparts<T: PartialEq>(tree: &ArrayTree<T>, rights: &[usize], value: &T) -> Vec<usize> {
    rights
        .iter()
        .flat_map(|&right| children_indexes(tree.structure(), right))
        .filter(|&child| tree.content()[child] == *value)
        .collect()
}

/// Post-order output buffers.
struct Emitter<T> {
    structure: Vec<usize>,
    content: Vec<T>,
}

impl<T> Emitter<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            structure: Vec::with_capacity(capacity),
            content: Vec::with_capacity(capacity),
        }
    }

    fn finish(self) -> ArrayTree<T> {
        ArrayTree::from_vecs_unchecked(self.structure, self.content)
    }
}

impl<T: Clone> Emitter<T> {
    fn push(&mut self, children: usize, value: &T) {
        self.structure.push(children);
        self.content.push(value.clone());
    }

    fn copy_block(&mut self, tree: &ArrayTree<T>, index: usize) {
        let range = subtree_range(tree.structure(), index);
        self.structure.extend_from_slice(&tree.structure()[range.clone()]);
        self.content.extend_from_slice(&tree.content()[range]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(structure: Vec<usize>, content: &str) -> ArrayTree<char> {
        ArrayTree::from_vecs_unchecked(structure, content.chars().collect())
    }

    #[test]
    fn union_merges_matching_children() {
        // a(b(d), c) and a(b(e), f)
        let left = tree(vec![0, 1, 0, 2], "dbca");
        let right = tree(vec![0, 1, 0, 2], "ebfa");
        let merged = left.union(&right);
        assert_eq!(merged.content(), &['d', 'e', 'b', 'c', 'f', 'a']);
        assert_eq!(merged.structure(), &[0, 0, 2, 0, 0, 3]);
    }

    #[test]
    fn intersect_keeps_common_paths() {
        // a(b(d, e), c) and a(b(e), f)
        let left = tree(vec![0, 0, 2, 0, 2], "debca");
        let right = tree(vec![0, 1, 0, 2], "ebfa");
        let common = left.intersect(&right).unwrap();
        assert_eq!(common.content(), &['e', 'b', 'a']);
        assert_eq!(common.structure(), &[0, 1, 1]);
        assert!(left.intersect(&tree(vec![0], "z")).is_none());
    }

    #[test]
    fn diff_drops_covered_branches() {
        // a(b(d, e), c) minus a(b(e), c)
        let left = tree(vec![0, 0, 2, 0, 2], "debca");
        let right = tree(vec![0, 1, 0, 2], "ebca");
        let rest = left.diff(&right).unwrap();
        assert_eq!(rest.content(), &['d', 'b', 'a']);
        assert_eq!(rest.structure(), &[0, 1, 1]);
        assert!(left.diff(&left).is_none());
    }

    #[test]
    fn duplicate_siblings_are_all_consulted() {
        // a(b(x)) against a(b(y), b(x))
        let left = tree(vec![0, 1, 1], "xba");
        let right = tree(vec![0, 1, 0, 1, 2], "ybxba");
        assert!(left.diff(&right).is_none());
        let common = left.intersect(&right).unwrap();
        assert_eq!(common.content(), &['x', 'b', 'a']);
        assert_eq!(common.structure(), &[0, 1, 1]);

        // a(b(x, z)) keeps only z
        let wider = tree(vec![0, 0, 2, 1], "xzba");
        let rest = wider.diff(&right).unwrap();
        assert_eq!(rest.content(), &['z', 'b', 'a']);
        assert_eq!(rest.structure(), &[0, 1, 1]);
    }

    #[test]
    fn deep_chains_intersect_and_diff() {
        let depth = 50_000;
        let chain = |tail: usize| {
            let mut structure = vec![1; depth + 1];
            structure[0] = 0;
            let mut content: Vec<usize> = (0..depth).rev().collect();
            content.insert(0, tail);
            ArrayTree::from_vecs_unchecked(structure, content)
        };
        let (left, right) = (chain(depth), chain(depth + 1));
        assert_eq!(left.intersect(&right).map(|t| t.size()), Some(depth));
        assert_eq!(left.diff(&right).map(|t| t.size()), Some(depth + 1));
        assert!(left.diff(&left).is_none());
        assert_eq!(left.union(&right).width(), 2);
    }
}
