//! In-place editable linearised tree
//!
//! Edits splice blocks into the two growable buffers. Only the child count
//! of the edited node's parent changes; every other entry keeps its meaning
//! because sizes are never stored.

use std::borrow::Cow;
use std::ops::Range;

use tracing::trace;

use super::functions::{
    children_indexes, find_child, follow, ordinal_of, subtree_range, subtree_size,
};
use super::ArrayTree;
use crate::codec;
use crate::options::EditOptions;
use crate::tree::Tree;

/// Where a new child block goes among a parent's children.
#[derive(Debug, Clone, Copy)]
enum Placement {
    First,
    Last,
    At(usize),
}

/// An incoming block being merged into its same-valued existing node.
struct DistinctFrame {
    target: usize,
    kids: Vec<usize>,
    next: usize,
    inserted: usize,
}

impl DistinctFrame {
    fn open(structure: &[usize], block: usize, target: usize, append: bool) -> Self {
        let mut kids = children_indexes(structure, block);
        // prepending one at a time, so go backwards to keep their order
        if !append {
            kids.reverse();
        }
        Self {
            target,
            kids,
            next: 0,
            inserted: 0,
        }
    }
}

/// Single-owner linearised tree edited in place.
///
/// May be empty. Converting to and from the immutable form always copies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutableArrayTree<T> {
    structure: Vec<usize>,
    content: Vec<T>,
}

impl<T> MutableArrayTree<T> {
    /// Empty tree.
    pub fn new() -> Self {
        Self {
            structure: Vec::new(),
            content: Vec::new(),
        }
    }

    pub(crate) fn from_vecs(structure: Vec<usize>, content: Vec<T>) -> Self {
        debug_assert_eq!(structure.len(), content.len());
        Self { structure, content }
    }

    /// Child counts in post-order.
    pub fn structure(&self) -> &[usize] {
        &self.structure
    }

    /// Values in post-order.
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.structure.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.structure.is_empty()
    }

    /// Leaf count, recomputed on every call.
    pub fn width(&self) -> usize {
        self.root()
            .map_or(0, |root| super::functions::width(&self.structure, root))
    }

    /// Level count, recomputed on every call.
    pub fn height(&self) -> usize {
        self.root()
            .map_or(0, |root| super::functions::height(&self.structure, root))
    }

    /// Root value.
    pub fn value(&self) -> Option<&T> {
        self.content.last()
    }

    fn root(&self) -> Option<usize> {
        self.structure.len().checked_sub(1)
    }

    /// Overwrite the value at a raw buffer index, returning the old one.
    ///
    /// Distinctness among siblings is not checked.
    pub fn update_value_at_index(&mut self, index: usize, value: T) -> Option<T> {
        self.content
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Freeze the buffers into an immutable tree without copying again.
    pub fn into_tree(self) -> Tree<T> {
        if self.is_empty() {
            Tree::Empty
        } else {
            Tree::Array(ArrayTree::from_vecs_unchecked(self.structure, self.content))
        }
    }

    fn clear(&mut self) {
        self.structure.clear();
        self.content.clear();
    }
}

fn linearise<T: Clone>(tree: &Tree<T>) -> Option<(Cow<'_, [usize]>, Cow<'_, [T]>)> {
    match tree {
        Tree::Empty => None,
        Tree::Array(array) => Some((Cow::Borrowed(array.structure()), Cow::Borrowed(array.content()))),
        Tree::Node(node) => {
            let (structure, content) = codec::node_to_arrays(node);
            Some((Cow::Owned(structure), Cow::Owned(content)))
        }
    }
}

impl<T: Clone + PartialEq> MutableArrayTree<T> {
    /// Detached immutable copy; later edits here never show through it.
    pub fn immutable(&self) -> Tree<T> {
        self.clone().into_tree()
    }

    /// Buffer index of the node at a root-inclusive path.
    pub fn select_index(&self, path: &[T], rightmost: bool) -> Option<usize> {
        self.locate(path, rightmost).and_then(|trail| trail.last().copied())
    }

    fn trail(&self, path: &[T], rightmost: bool) -> Vec<usize> {
        follow(
            &self.structure,
            &self.content,
            path,
            &|value: &T, item: &T| value == item,
            rightmost,
        )
    }

    fn locate(&self, path: &[T], rightmost: bool) -> Option<Vec<usize>> {
        let trail = self.trail(path, rightmost);
        (!trail.is_empty() && trail.len() == path.len()).then_some(trail)
    }

    fn splice(&mut self, range: Range<usize>, structure: &[usize], content: &[T]) {
        trace!(
            start = range.start,
            end = range.end,
            inserted = structure.len(),
            "splice"
        );
        self.structure.splice(range.clone(), structure.iter().copied());
        self.content.splice(range, content.iter().cloned());
    }

    fn insertion_point(&self, parent: usize, placement: Placement) -> usize {
        match placement {
            Placement::Last => parent,
            Placement::First => parent + 1 - subtree_size(&self.structure, parent),
            Placement::At(ordinal) => match children_indexes(&self.structure, parent).get(ordinal) {
                Some(&child) => child + 1 - subtree_size(&self.structure, child),
                None => parent,
            },
        }
    }

    /// Splice a block in as a new child; returns the parent's new index.
    fn insert_child_block(
        &mut self,
        parent: usize,
        placement: Placement,
        structure: &[usize],
        content: &[T],
    ) -> usize {
        let at = self.insertion_point(parent, placement);
        self.splice(at..at, structure, content);
        let parent = parent + structure.len();
        self.structure[parent] += 1;
        parent
    }

    /// Insert a block under `parent`, merging into a same-valued child.
    ///
    /// Returns the number of entries added; `parent` moves right by that much.
    fn insert_distinct(
        &mut self,
        parent: usize,
        structure: &[usize],
        content: &[T],
        append: bool,
    ) -> usize {
        let root = structure.len() - 1;
        let Some(target) = self.place(parent, structure, content, root, append) else {
            return structure.len();
        };
        let mut added = 0;
        let mut stack = vec![DistinctFrame::open(structure, root, target, append)];
        while let Some(mut frame) = stack.pop() {
            if let Some(&kid) = frame.kids.get(frame.next) {
                frame.next += 1;
                match self.place(frame.target, structure, content, kid, append) {
                    Some(existing) => {
                        stack.push(frame);
                        stack.push(DistinctFrame::open(structure, kid, existing, append));
                    }
                    None => {
                        let size = subtree_size(structure, kid);
                        frame.target += size;
                        frame.inserted += size;
                        stack.push(frame);
                    }
                }
                continue;
            }
            match stack.last_mut() {
                Some(outer) => {
                    outer.target += frame.inserted;
                    outer.inserted += frame.inserted;
                }
                None => added = frame.inserted,
            }
        }
        added
    }

    /// The same-valued child of `parent` for the block at `index`, or `None`
    /// once the whole block has been spliced in as a new child.
    fn place(
        &mut self,
        parent: usize,
        structure: &[usize],
        content: &[T],
        index: usize,
        append: bool,
    ) -> Option<usize> {
        let existing = find_child(
            &self.structure,
            &self.content,
            parent,
            |value| *value == content[index],
            false,
        );
        if existing.is_none() {
            let placement = if append {
                Placement::Last
            } else {
                Placement::First
            };
            let range = subtree_range(structure, index);
            self.insert_child_block(parent, placement, &structure[range.clone()], &content[range]);
        }
        existing
    }

    fn insert_block(
        &mut self,
        parent: usize,
        structure: &[usize],
        content: &[T],
        options: EditOptions,
    ) -> usize {
        if options.keep_distinct {
            self.insert_distinct(parent, structure, content, options.append)
        } else {
            let placement = if options.append {
                Placement::Last
            } else {
                Placement::First
            };
            self.insert_child_block(parent, placement, structure, content);
            structure.len()
        }
    }

    /// Distinct-merge every child of the given tree into the root.
    pub(crate) fn merge_children(&mut self, structure: &[usize], content: &[T]) {
        let Some(mut root) = self.root() else {
            return;
        };
        for kid in children_indexes(structure, structure.len() - 1) {
            let range = subtree_range(structure, kid);
            root += self.insert_distinct(root, &structure[range.clone()], &content[range], true);
        }
    }

    /// Drop the child block; returns the parent's new index.
    fn remove_child(&mut self, parent: usize, child: usize) -> usize {
        let range = subtree_range(&self.structure, child);
        let removed = range.len();
        self.splice(range, &[], &[]);
        let parent = parent - removed;
        self.structure[parent] -= 1;
        parent
    }

    fn copy_block(&self, index: usize) -> (Vec<usize>, Vec<T>) {
        let range = subtree_range(&self.structure, index);
        (
            self.structure[range.clone()].to_vec(),
            self.content[range].to_vec(),
        )
    }

    fn has_sibling_valued(&self, parent: usize, child: usize, value: &T) -> bool {
        children_indexes(&self.structure, parent)
            .into_iter()
            .any(|idx| idx != child && self.content[idx] == *value)
    }

    /// Remove one node, handing its children to `parent` in its place.
    fn lift_child(&mut self, parent: usize, child: usize, keep_distinct: bool) {
        if !keep_distinct {
            let orphans = self.structure[child];
            self.structure.remove(child);
            self.content.remove(child);
            let parent = parent - 1;
            self.structure[parent] = self.structure[parent] - 1 + orphans;
            return;
        }

        let mut at = ordinal_of(&self.structure, parent, child).unwrap_or(0);
        let (structure, content) = self.copy_block(child);
        let mut parent = self.remove_child(parent, child);
        for kid in children_indexes(&structure, structure.len() - 1) {
            let range = subtree_range(&structure, kid);
            let (kid_structure, kid_content) = (&structure[range.clone()], &content[range]);
            let kid_value = &content[kid];
            let clash =
                find_child(&self.structure, &self.content, parent, |v| v == kid_value, false);
            if clash.is_some() {
                parent += self.insert_distinct(parent, kid_structure, kid_content, true);
            } else {
                parent =
                    self.insert_child_block(parent, Placement::At(at), kid_structure, kid_content);
                at += 1;
            }
        }
    }

    /// Put a block where `child` was, merging into a same-valued sibling.
    fn replace_child(
        &mut self,
        parent: usize,
        child: usize,
        structure: &[usize],
        content: &[T],
        keep_distinct: bool,
    ) {
        let value = &content[content.len() - 1];
        if keep_distinct && self.has_sibling_valued(parent, child, value) {
            let parent = self.remove_child(parent, child);
            self.insert_distinct(parent, structure, content, true);
        } else {
            let range = subtree_range(&self.structure, child);
            self.splice(range, structure, content);
        }
    }

    fn update_child_value(&mut self, parent: usize, child: usize, value: T, keep_distinct: bool) {
        if keep_distinct && self.has_sibling_valued(parent, child, &value) {
            let (structure, mut content) = self.copy_block(child);
            if let Some(root) = content.last_mut() {
                *root = value;
            }
            let parent = self.remove_child(parent, child);
            self.insert_distinct(parent, &structure, &content, true);
        } else {
            self.content[child] = value;
        }
    }

    fn insert_block_at(
        &mut self,
        path: &[T],
        structure: &[usize],
        content: &[T],
        options: EditOptions,
        create_missing: bool,
    ) -> bool {
        if self.is_empty() {
            if !path.is_empty() && !create_missing {
                return false;
            }
            self.structure.extend_from_slice(structure);
            self.content.extend_from_slice(content);
            self.structure.extend(std::iter::repeat(1).take(path.len()));
            self.content.extend(path.iter().rev().cloned());
            return true;
        }

        let trail = self.trail(path, options.rightmost);
        let Some(&target) = trail.last() else {
            return false;
        };
        if trail.len() == path.len() {
            self.insert_block(target, structure, content, options);
            return true;
        }
        if !create_missing {
            return false;
        }
        let missing = &path[trail.len()..];
        let mut chain_structure = structure.to_vec();
        chain_structure.extend(std::iter::repeat(1).take(missing.len()));
        let mut chain_content = content.to_vec();
        chain_content.extend(missing.iter().rev().cloned());
        self.insert_block(target, &chain_structure, &chain_content, options);
        true
    }

    /// Insert a leaf under the node at `path`, creating missing nodes.
    pub fn insert_value_at(&mut self, path: &[T], value: T, options: EditOptions) -> bool {
        self.insert_block_at(path, &[0], std::slice::from_ref(&value), options, true)
    }

    /// Insert a leaf under the node at `path` only if the whole path exists.
    pub fn try_insert_value_at(&mut self, path: &[T], value: T, options: EditOptions) -> bool {
        self.insert_block_at(path, &[0], std::slice::from_ref(&value), options, false)
    }

    /// Insert a subtree under the node at `path`, creating missing nodes.
    pub fn insert_tree_at(&mut self, path: &[T], tree: &Tree<T>, options: EditOptions) -> bool {
        match linearise(tree) {
            Some((structure, content)) => {
                self.insert_block_at(path, &structure, &content, options, true)
            }
            None => false,
        }
    }

    /// Insert a subtree under the node at `path` only if the whole path exists.
    pub fn try_insert_tree_at(&mut self, path: &[T], tree: &Tree<T>, options: EditOptions) -> bool {
        match linearise(tree) {
            Some((structure, content)) => {
                self.insert_block_at(path, &structure, &content, options, false)
            }
            None => false,
        }
    }

    /// Add the root-inclusive `branch`, creating whatever part is missing.
    pub fn insert_branch(&mut self, branch: &[T], options: EditOptions) -> bool {
        if self.is_empty() {
            if branch.is_empty() {
                return false;
            }
            self.structure.push(0);
            self.structure.extend(std::iter::repeat(1).take(branch.len() - 1));
            self.content.extend(branch.iter().rev().cloned());
            return true;
        }
        let trail = self.trail(branch, options.rightmost);
        let Some(&target) = trail.last() else {
            return false;
        };
        let missing = &branch[trail.len()..];
        if missing.is_empty() {
            return false;
        }
        let mut structure = vec![0];
        structure.extend(std::iter::repeat(1).take(missing.len() - 1));
        let content: Vec<T> = missing.iter().rev().cloned().collect();
        self.insert_block(target, &structure, &content, options);
        true
    }

    /// Replace the value of the node at `path`.
    pub fn update_value_at(&mut self, path: &[T], value: T, options: EditOptions) -> bool {
        let Some(trail) = self.locate(path, options.rightmost) else {
            return false;
        };
        match trail[..] {
            [root] => self.content[root] = value,
            [.., parent, child] => self.update_child_value(parent, child, value, options.keep_distinct),
            [] => return false,
        }
        true
    }

    /// Replace the subtree at `path`; an empty replacement removes it.
    pub fn update_tree_at(&mut self, path: &[T], tree: &Tree<T>, options: EditOptions) -> bool {
        let Some((structure, content)) = linearise(tree) else {
            return self.remove_tree_at(path, options);
        };
        let Some(trail) = self.locate(path, options.rightmost) else {
            return false;
        };
        match trail[..] {
            [_] => {
                self.structure = structure.into_owned();
                self.content = content.into_owned();
            }
            [.., parent, child] => {
                self.replace_child(parent, child, &structure, &content, options.keep_distinct)
            }
            [] => return false,
        }
        true
    }

    /// Remove the node at `path`, moving its children up to its parent.
    ///
    /// A root with several children stays; `false` is returned.
    pub fn remove_value_at(&mut self, path: &[T], options: EditOptions) -> bool {
        let Some(trail) = self.locate(path, options.rightmost) else {
            return false;
        };
        match trail[..] {
            [root] => match self.structure[root] {
                0 => self.clear(),
                1 => {
                    self.structure.pop();
                    self.content.pop();
                }
                _ => return false,
            },
            [.., parent, child] => self.lift_child(parent, child, options.keep_distinct),
            [] => return false,
        }
        true
    }

    /// Remove the whole subtree at `path`.
    pub fn remove_tree_at(&mut self, path: &[T], options: EditOptions) -> bool {
        let Some(trail) = self.locate(path, options.rightmost) else {
            return false;
        };
        match trail[..] {
            [_] => self.clear(),
            [.., parent, child] => {
                self.remove_child(parent, child);
            }
            [] => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a(b(d, e), c)
    fn sample() -> MutableArrayTree<char> {
        MutableArrayTree::from_vecs(vec![0, 0, 2, 0, 2], vec!['d', 'e', 'b', 'c', 'a'])
    }

    #[test]
    fn append_and_prepend_leaves() {
        let mut tree = sample();
        assert!(tree.insert_value_at(&['a', 'b'], 'f', EditOptions::default()));
        assert_eq!(tree.content(), &['d', 'e', 'f', 'b', 'c', 'a']);
        assert_eq!(tree.structure(), &[0, 0, 0, 3, 0, 2]);

        let front = EditOptions::default().with_append(false);
        assert!(tree.insert_value_at(&['a'], 'x', front));
        assert_eq!(tree.content(), &['x', 'd', 'e', 'f', 'b', 'c', 'a']);
        assert_eq!(tree.structure(), &[0, 0, 0, 0, 3, 0, 3]);
    }

    #[test]
    fn distinct_insert_merges() {
        let mut tree = sample();
        let incoming = Tree::node('b', vec![Tree::leaf('e'), Tree::leaf('g')]);
        assert!(tree.insert_tree_at(&['a'], &incoming, EditOptions::default()));
        assert_eq!(tree.content(), &['d', 'e', 'g', 'b', 'c', 'a']);
        assert_eq!(tree.structure(), &[0, 0, 0, 3, 0, 2]);
    }

    #[test]
    fn missing_suffix_becomes_a_chain() {
        let mut tree = sample();
        assert!(!tree.try_insert_value_at(&['a', 'x', 'y'], 'z', EditOptions::default()));
        assert!(tree.insert_value_at(&['a', 'x', 'y'], 'z', EditOptions::default()));
        assert_eq!(tree.content(), &['d', 'e', 'b', 'c', 'z', 'y', 'x', 'a']);
        assert_eq!(tree.structure(), &[0, 0, 2, 0, 0, 1, 1, 3]);
    }

    #[test]
    fn lift_in_place() {
        let mut tree = sample();
        assert!(tree.remove_value_at(&['a', 'b'], EditOptions::lax()));
        assert_eq!(tree.content(), &['d', 'e', 'c', 'a']);
        assert_eq!(tree.structure(), &[0, 0, 0, 3]);
    }

    #[test]
    fn root_removal_rules() {
        let mut tree = sample();
        assert!(!tree.remove_value_at(&['a'], EditOptions::default()));

        let mut single = MutableArrayTree::from_vecs(vec![0, 1], vec!['b', 'a']);
        assert!(single.remove_value_at(&['a'], EditOptions::default()));
        assert_eq!(single.content(), &['b']);

        assert!(single.remove_value_at(&['b'], EditOptions::default()));
        assert!(single.is_empty());
    }

    #[test]
    fn update_merges_into_sibling() {
        let mut tree = sample();
        assert!(tree.update_value_at(&['a', 'c'], 'b', EditOptions::default()));
        assert_eq!(tree.content(), &['d', 'e', 'b', 'a']);

        let mut lax = sample();
        assert!(lax.update_value_at(&['a', 'c'], 'b', EditOptions::lax()));
        assert_eq!(lax.content(), &['d', 'e', 'b', 'b', 'a']);
    }

    #[test]
    fn immutable_detaches() {
        let mut tree = sample();
        let frozen = tree.immutable();
        tree.update_value_at_index(0, 'z');
        assert_eq!(frozen.to_arrays().1, vec!['d', 'e', 'b', 'c', 'a']);
    }

    #[test]
    fn empty_tree_grows_from_paths() {
        let mut tree = MutableArrayTree::new();
        assert!(tree.insert_value_at(&['a', 'b'], 'c', EditOptions::default()));
        assert_eq!(tree.content(), &['c', 'b', 'a']);
        assert_eq!(tree.structure(), &[0, 1, 1]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn deep_distinct_merge() {
        let depth = 50_000;
        let chain = |tail: usize| {
            let mut structure = vec![1; depth + 1];
            structure[0] = 0;
            let mut content: Vec<usize> = (0..depth).rev().collect();
            content.insert(0, tail);
            (structure, content)
        };
        let (structure, content) = chain(depth);
        let mut tree = MutableArrayTree::from_vecs(structure, content);
        let (other_structure, other_content) = chain(depth + 1);
        tree.merge_children(&other_structure, &other_content);
        assert_eq!(tree.size(), depth + 2);
        assert_eq!(tree.structure()[2], 2);
        assert_eq!(&tree.content()[..2], &[depth, depth + 1]);
    }
}
