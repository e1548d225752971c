//! Tree builders over post-order pair sequences
//!
//! [`from_size_and_value_pairs`] is the plain decoder. [`from_size_and_tree_pairs`]
//! decodes pairs whose payload is a whole tree: every tree becomes a node
//! whose existing children are the subtrees already decoded for it, and a
//! [`TreeMergeStrategy`] decides how the two are combined. This is the
//! engine behind `flat_map`.

use std::fmt;

use tracing::debug;

use crate::codec;
use crate::node::{merge_into, NodeTree};
use crate::tree::Tree;
use crate::{Result, TreeError};

/// Policy for combining an expanded node with the subtrees decoded under it.
pub struct TreeMergeStrategy<T> {
    /// Combine the expanded tree with the node's existing children.
    pub merge: fn(NodeTree<T>, Vec<NodeTree<T>>) -> NodeTree<T>,
    /// When a node expands to the empty tree, hand its children to its
    /// parent instead of dropping them.
    pub keep_orphaned_subtrees: bool,
}

impl<T> TreeMergeStrategy<T> {
    /// Custom strategy.
    pub fn new(
        merge: fn(NodeTree<T>, Vec<NodeTree<T>>) -> NodeTree<T>,
        keep_orphaned_subtrees: bool,
    ) -> Self {
        Self {
            merge,
            keep_orphaned_subtrees,
        }
    }
}

impl<T: Clone + PartialEq> TreeMergeStrategy<T> {
    /// Existing children go after the new root's own children; orphans are kept.
    pub fn join() -> Self {
        Self::new(join_children, true)
    }

    /// Like [`join`](Self::join), but same-valued children are merged.
    pub fn join_distinct() -> Self {
        Self::new(join_children_distinct, true)
    }

    /// The expanded tree replaces the node; its children and orphans are dropped.
    pub fn replace() -> Self {
        Self::new(replace_children, false)
    }
}

impl<T: Clone + PartialEq> Default for TreeMergeStrategy<T> {
    fn default() -> Self {
        Self::join()
    }
}

impl<T> Clone for TreeMergeStrategy<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TreeMergeStrategy<T> {}

impl<T> fmt::Debug for TreeMergeStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMergeStrategy")
            .field("keep_orphaned_subtrees", &self.keep_orphaned_subtrees)
            .finish_non_exhaustive()
    }
}

fn join_children<T: Clone>(node: NodeTree<T>, existing: Vec<NodeTree<T>>) -> NodeTree<T> {
    if existing.is_empty() {
        return node;
    }
    let mut children = node.children().to_vec();
    children.extend(existing);
    node.with_children(children)
}

fn join_children_distinct<T: Clone + PartialEq>(
    node: NodeTree<T>,
    existing: Vec<NodeTree<T>>,
) -> NodeTree<T> {
    merge_into(&node, &existing, true)
}

fn replace_children<T>(node: NodeTree<T>, _existing: Vec<NodeTree<T>>) -> NodeTree<T> {
    node
}

/// Decode `(child_count, value)` pairs into every tree they hold.
///
/// Trees come back earliest-encoded last; an empty sequence yields a single
/// empty tree.
pub fn from_size_and_value_pairs<T, I>(pairs: I) -> Result<Vec<Tree<T>>>
where
    I: IntoIterator<Item = (usize, T)>,
{
    let trees = codec::decode_pairs(pairs)?;
    if trees.is_empty() {
        return Ok(vec![Tree::Empty]);
    }
    Ok(trees.into_iter().map(Tree::Node).collect())
}

/// Decode the slots left on the stack, in encoding order.
///
/// Each slot holds what one pair turned into: one tree, nothing, or the
/// orphans of a node that expanded to the empty tree.
pub(crate) fn assemble<T, I>(pairs: I, strategy: TreeMergeStrategy<T>) -> Result<Vec<Vec<NodeTree<T>>>>
where
    T: Clone,
    I: IntoIterator<Item = (usize, Tree<T>)>,
{
    let mut stack: Vec<Vec<NodeTree<T>>> = Vec::new();
    for (index, (count, tree)) in pairs.into_iter().enumerate() {
        if count > stack.len() {
            return Err(TreeError::InvalidEncoding {
                index,
                declared: count,
            });
        }
        let existing: Vec<NodeTree<T>> = stack.split_off(stack.len() - count).into_iter().flatten().collect();
        let slot = match tree.into_node() {
            Some(node) => vec![(strategy.merge)(node, existing)],
            None if strategy.keep_orphaned_subtrees => existing,
            None => Vec::new(),
        };
        stack.push(slot);
    }
    Ok(stack)
}

/// Decode `(child_count, tree)` pairs, combining each tree with the subtrees
/// decoded under it according to `strategy`.
///
/// Trees come back earliest-encoded last; when nothing survives the result is
/// a single empty tree.
pub fn from_size_and_tree_pairs<T, I>(pairs: I, strategy: TreeMergeStrategy<T>) -> Result<Vec<Tree<T>>>
where
    T: Clone,
    I: IntoIterator<Item = (usize, Tree<T>)>,
{
    let slots = assemble(pairs, strategy)?;
    let mut trees: Vec<Tree<T>> = slots.into_iter().flatten().map(Tree::Node).collect();
    debug!(trees = trees.len(), "assembled trees from tree pairs");
    if trees.is_empty() {
        return Ok(vec![Tree::Empty]);
    }
    trees.reverse();
    Ok(trees)
}
