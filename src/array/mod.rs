//! Linearised (array) tree representation
//!
//! An [`ArrayTree`] is a window over two shared parallel sequences. Selecting
//! a subtree or a child is a sub-range view; nothing is copied until an edit
//! goes through a [`MutableArrayTree`].

pub(crate) mod functions;
mod merge;
mod mutable;

pub use mutable::MutableArrayTree;

use std::cell::OnceCell;
use std::fmt;

use crate::slice::Slice;

/// Non-empty immutable tree stored as post-order structure/content arrays.
pub struct ArrayTree<T> {
    structure: Slice<usize>,
    content: Slice<T>,
    width: OnceCell<usize>,
    height: OnceCell<usize>,
}

impl<T> ArrayTree<T> {
    /// Wrap slices already known to hold exactly one well-formed tree.
    pub(crate) fn from_slices_unchecked(structure: Slice<usize>, content: Slice<T>) -> Self {
        debug_assert!(!structure.is_empty());
        debug_assert_eq!(structure.len(), content.len());
        Self {
            structure,
            content,
            width: OnceCell::new(),
            height: OnceCell::new(),
        }
    }

    pub(crate) fn from_vecs_unchecked(structure: Vec<usize>, content: Vec<T>) -> Self {
        Self::from_slices_unchecked(Slice::from_vec(structure), Slice::from_vec(content))
    }

    /// Child counts in post-order.
    pub fn structure(&self) -> &[usize] {
        &self.structure
    }

    /// Values in post-order.
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Index of the root entry (always the last one).
    #[inline]
    pub fn root_index(&self) -> usize {
        self.structure.len() - 1
    }

    /// Root value.
    pub fn value(&self) -> &T {
        &self.content[self.root_index()]
    }

    /// Number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.structure.len()
    }

    /// Number of leaves, computed once.
    pub fn width(&self) -> usize {
        *self
            .width
            .get_or_init(|| functions::width(&self.structure, self.root_index()))
    }

    /// Number of levels, computed once.
    pub fn height(&self) -> usize {
        *self
            .height
            .get_or_init(|| functions::height(&self.structure, self.root_index()))
    }

    /// Number of direct children of the root.
    pub fn child_count(&self) -> usize {
        self.structure[self.root_index()]
    }

    /// Whether the root has no children.
    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// Subtree rooted at `index`, sharing storage with `self`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`size`](Self::size).
    pub fn subtree(&self, index: usize) -> ArrayTree<T> {
        let range = functions::subtree_range(&self.structure, index);
        Self::from_slices_unchecked(
            self.structure.slice(range.clone()),
            self.content.slice(range),
        )
    }

    /// Direct children, left to right, sharing storage with `self`.
    pub fn children(&self) -> Vec<ArrayTree<T>> {
        functions::children_indexes(&self.structure, self.root_index())
            .into_iter()
            .map(|idx| self.subtree(idx))
            .collect()
    }

    /// Values of the direct children, left to right.
    pub fn child_values(&self) -> Vec<&T> {
        functions::children_indexes(&self.structure, self.root_index())
            .into_iter()
            .map(|idx| &self.content[idx])
            .collect()
    }

    /// Post-order `(child_count, value)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.structure.iter().copied().zip(self.content.iter())
    }

    /// Values in pre-order, left to right.
    pub fn values(&self) -> Vec<&T> {
        functions::pre_order(&self.structure, self.root_index())
            .into_iter()
            .map(|idx| &self.content[idx])
            .collect()
    }

    /// Every subtree in pre-order, each sharing storage with `self`.
    pub fn subtrees(&self) -> Vec<ArrayTree<T>> {
        functions::pre_order(&self.structure, self.root_index())
            .into_iter()
            .map(|idx| self.subtree(idx))
            .collect()
    }

    /// Leaf values, left to right.
    pub fn leaves(&self) -> Vec<&T> {
        functions::pre_order(&self.structure, self.root_index())
            .into_iter()
            .filter(|&idx| self.structure[idx] == 0)
            .map(|idx| &self.content[idx])
            .collect()
    }

    /// Root-to-node value sequences, as [`crate::NodeTree::walk_paths`].
    pub fn walk_paths(&self, max_depth: usize, leaves_only: bool) -> Vec<Vec<&T>> {
        functions::walk_paths(
            &self.structure,
            &self.content,
            self.root_index(),
            max_depth,
            leaves_only,
        )
    }

    /// Subtree addressed by a root-inclusive path of keys.
    pub fn select<K, M>(&self, path: &[K], matches: M, rightmost: bool) -> Option<ArrayTree<T>>
    where
        M: Fn(&T, &K) -> bool,
    {
        let trail = functions::follow(&self.structure, &self.content, path, &matches, rightmost);
        if trail.is_empty() || trail.len() < path.len() {
            return None;
        }
        trail.last().map(|&idx| self.subtree(idx))
    }

    /// Nested form `v(c1,c2,...)`, each value written by `write_value`.
    pub(crate) fn write_nested<W>(&self, f: &mut fmt::Formatter<'_>, mut write_value: W) -> fmt::Result
    where
        W: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
    {
        let root = self.root_index();
        write_value(f, &self.content()[root])?;
        let mut stack = vec![(functions::children_indexes(self.structure(), root), 0)];
        while let Some((kids, next)) = stack.last_mut() {
            match kids.get(*next) {
                Some(&child) => {
                    f.write_str(if *next == 0 { "(" } else { "," })?;
                    *next += 1;
                    write_value(f, &self.content()[child])?;
                    stack.push((functions::children_indexes(self.structure(), child), 0));
                }
                None => {
                    if !kids.is_empty() {
                        f.write_str(")")?;
                    }
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    /// Map every value; the structure sequence is shared, not copied.
    pub fn map<K, F: FnMut(&T) -> K>(&self, f: F) -> ArrayTree<K> {
        let content: Vec<K> = self.content.iter().map(f).collect();
        ArrayTree::from_slices_unchecked(self.structure.clone(), Slice::from_vec(content))
    }
}

impl<T: Clone> ArrayTree<T> {
    /// Copy the arrays into a tree that can be edited in place.
    pub fn mutable(&self) -> MutableArrayTree<T> {
        MutableArrayTree::from_vecs(self.structure.to_vec(), self.content.to_vec())
    }

    /// Copy of the structure and content arrays.
    pub fn to_arrays(&self) -> (Vec<usize>, Vec<T>) {
        (self.structure.to_vec(), self.content.to_vec())
    }
}

impl<T> Clone for ArrayTree<T> {
    fn clone(&self) -> Self {
        Self {
            structure: self.structure.clone(),
            content: self.content.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for ArrayTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.structure() == other.structure() && self.content() == other.content()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayTree")
            .field("structure", &self.structure)
            .field("content", &self.content)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArrayTree<char> {
        ArrayTree::from_vecs_unchecked(vec![0, 0, 2, 0, 2], vec!['d', 'e', 'b', 'c', 'a'])
    }

    #[test]
    fn properties_match_the_encoding() {
        let tree = sample();
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.width(), 3);
        assert_eq!(tree.height(), 3);
        assert_eq!(*tree.value(), 'a');
        assert_eq!(tree.child_values(), vec![&'b', &'c']);
    }

    #[test]
    fn children_share_storage() {
        let tree = sample();
        let children = tree.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].content(), &['d', 'e', 'b']);
        assert!(children[0].content.shares_storage(&tree.content));
    }

    #[test]
    fn select_by_projected_key() {
        let tree = ArrayTree::from_vecs_unchecked(vec![0, 1], vec![("x", 2), ("y", 1)]);
        let found = tree.select(&["y", "x"], |value: &(&str, i32), key: &&str| value.0 == *key, false);
        assert_eq!(found.map(|t| t.value().1), Some(2));
    }

    #[test]
    fn traversals() {
        let tree = sample();
        assert_eq!(tree.values(), vec![&'a', &'b', &'d', &'e', &'c']);
        assert_eq!(tree.leaves(), vec![&'d', &'e', &'c']);
        assert_eq!(tree.walk_paths(usize::MAX, true).len(), 3);
    }

    #[test]
    fn map_shares_structure() {
        let tree = sample();
        let upper = tree.map(|c| c.to_ascii_uppercase());
        assert!(upper.structure.shares_storage(&tree.structure));
        assert_eq!(*upper.value(), 'A');
    }
}
