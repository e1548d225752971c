//! Pointer-linked tree representation
//!
//! Every node is immutable and reference counted, so an edit rebuilds only
//! the spine from the root to the edited node and shares every other subtree
//! with the original.

mod edit;
mod merge;

pub(crate) use edit::{chain, merge_into};

use std::fmt;
use std::rc::Rc;

/// Non-empty immutable tree node with cached shape properties.
pub struct NodeTree<T>(Rc<Node<T>>);

struct Node<T> {
    value: T,
    children: Vec<NodeTree<T>>,
    size: usize,
    width: usize,
    height: usize,
}

impl<T> NodeTree<T> {
    /// Node without children.
    pub fn leaf(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Node with the given children, left to right.
    pub fn new(value: T, children: Vec<NodeTree<T>>) -> Self {
        let size = 1 + children.iter().map(NodeTree::size).sum::<usize>();
        let width = if children.is_empty() {
            1
        } else {
            children.iter().map(NodeTree::width).sum()
        };
        let height = 1 + children.iter().map(NodeTree::height).max().unwrap_or(0);
        Self(Rc::new(Node {
            value,
            children,
            size,
            width,
            height,
        }))
    }

    /// Root value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.0.value
    }

    /// Direct children, left to right.
    #[inline]
    pub fn children(&self) -> &[NodeTree<T>] {
        &self.0.children
    }

    /// Number of nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.size
    }

    /// Number of leaves.
    #[inline]
    pub fn width(&self) -> usize {
        self.0.width
    }

    /// Number of levels (a leaf has height 1).
    #[inline]
    pub fn height(&self) -> usize {
        self.0.height
    }

    /// Number of direct children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.0.children.len()
    }

    /// Whether the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.0.children.is_empty()
    }

    /// Whether both handles point at the same shared node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Post-order `(child_count, value)` pairs, children before parent.
    pub fn pairs(&self) -> PostOrder<'_, T> {
        PostOrder {
            stack: vec![(self, 0)],
        }
    }

    /// Values in pre-order, left to right.
    pub fn values(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.size());
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node.value());
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// Every subtree (this node included) in pre-order.
    pub fn subtrees(&self) -> Vec<&NodeTree<T>> {
        let mut out = Vec::with_capacity(self.size());
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// Leaf values, left to right.
    pub fn leaves(&self) -> Vec<&T> {
        self.subtrees()
            .into_iter()
            .filter(|node| node.is_leaf())
            .map(NodeTree::value)
            .collect()
    }

    /// Root-to-node value sequences, cut at `max_depth` levels.
    ///
    /// With `leaves_only` a sequence is emitted only where it ends at a leaf
    /// or at the depth limit; otherwise one is emitted for every node.
    pub fn walk_paths(&self, max_depth: usize, leaves_only: bool) -> Vec<Vec<&T>> {
        let mut out = Vec::new();
        if max_depth == 0 {
            return out;
        }
        let mut prefix: Vec<&T> = Vec::new();
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            prefix.truncate(depth);
            prefix.push(node.value());
            let at_limit = prefix.len() >= max_depth;
            if !leaves_only || node.is_leaf() || at_limit {
                out.push(prefix.clone());
            }
            if !at_limit {
                stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
            }
        }
        out
    }

    /// Map every value, keeping the shape. Values are visited in post-order.
    pub fn map<K, F: FnMut(&T) -> K>(&self, f: &mut F) -> NodeTree<K> {
        let mut stack: Vec<NodeTree<K>> = Vec::with_capacity(self.height());
        for (count, value) in self.pairs() {
            let children = stack.split_off(stack.len() - count);
            stack.push(NodeTree::new(f(value), children));
        }
        // the pairs of one tree leave exactly its root behind
        stack.swap_remove(0)
    }

    /// Nested form `v(c1,c2,...)`, each value written by `write_value`.
    pub(crate) fn write_nested<W>(&self, f: &mut fmt::Formatter<'_>, mut write_value: W) -> fmt::Result
    where
        W: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
    {
        write_value(f, self.value())?;
        let mut stack = vec![(self, 0)];
        while let Some((node, next)) = stack.last_mut() {
            let node = *node;
            match node.children().get(*next) {
                Some(child) => {
                    f.write_str(if *next == 0 { "(" } else { "," })?;
                    *next += 1;
                    write_value(f, child.value())?;
                    stack.push((child, 0));
                }
                None => {
                    if !node.is_leaf() {
                        f.write_str(")")?;
                    }
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

impl<T: Clone> NodeTree<T> {
    /// Copy of this node with a different child list.
    pub fn with_children(&self, children: Vec<NodeTree<T>>) -> Self {
        Self::new(self.value().clone(), children)
    }

    /// Copy of this node with a different value, sharing the children.
    pub fn with_value(&self, value: T) -> Self {
        Self::new(value, self.children().to_vec())
    }
}

impl<T> Clone for NodeTree<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

// Children are released from a heap stack so deep chains do not recurse.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(child.0) {
                pending.append(&mut node.children);
            }
        }
    }
}

impl<T: PartialEq> PartialEq for NodeTree<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.ptr_eq(b) {
                continue;
            }
            if a.size() != b.size() || a.child_count() != b.child_count() || a.value() != b.value() {
                return false;
            }
            stack.extend(a.children().iter().zip(b.children()));
        }
        true
    }
}

impl<T: Eq> Eq for NodeTree<T> {}

impl<T: fmt::Debug> fmt::Debug for NodeTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_nested(f, |f, value| write!(f, "{:?}", value))
    }
}

/// Post-order iterator yielding `(child_count, value)`.
#[derive(Debug)]
pub struct PostOrder<'a, T> {
    stack: Vec<(&'a NodeTree<T>, usize)>,
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let node = top.0;
            if top.1 < node.child_count() {
                let child = &node.children()[top.1];
                top.1 += 1;
                self.stack.push((child, 0));
            } else {
                self.stack.pop();
                return Some((node.child_count(), node.value()));
            }
        }
    }
}
