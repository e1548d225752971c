//! Linearisation codec
//!
//! Trees are linearised in post-order as `(child_count, value)` pairs: every
//! node follows its children, the children appear left to right, and the
//! root comes last. Reading the pairs back with a stack restores the tree,
//! and a sequence holding several trees one after another decodes to all of
//! them.

use tracing::debug;

use crate::array::{functions, ArrayTree};
use crate::node::NodeTree;
use crate::slice::Slice;
use crate::{Result, TreeError};

/// Structure and content arrays of a node tree.
pub fn node_to_arrays<T: Clone>(node: &NodeTree<T>) -> (Vec<usize>, Vec<T>) {
    let mut structure = Vec::with_capacity(node.size());
    let mut content = Vec::with_capacity(node.size());
    for (count, value) in node.pairs() {
        structure.push(count);
        content.push(value.clone());
    }
    (structure, content)
}

/// Array form of a node tree.
pub fn deflate<T: Clone>(node: &NodeTree<T>) -> ArrayTree<T> {
    let (structure, content) = node_to_arrays(node);
    ArrayTree::from_vecs_unchecked(structure, content)
}

/// Node form of an array tree.
pub fn inflate<T: Clone>(tree: &ArrayTree<T>) -> NodeTree<T> {
    let mut stack: Vec<NodeTree<T>> = Vec::new();
    for (count, value) in tree.pairs() {
        let children = stack.split_off(stack.len() - count);
        stack.push(NodeTree::new(value.clone(), children));
    }
    // a well-formed single tree leaves exactly its root behind
    stack.swap_remove(0)
}

/// Decode post-order pairs into every tree they hold.
///
/// The trees come back earliest-encoded last. A pair declaring more children
/// than have been decoded so far is an [`TreeError::InvalidEncoding`].
pub fn decode_pairs<T, I>(pairs: I) -> Result<Vec<NodeTree<T>>>
where
    I: IntoIterator<Item = (usize, T)>,
{
    let mut stack: Vec<NodeTree<T>> = Vec::new();
    for (index, (count, value)) in pairs.into_iter().enumerate() {
        if count > stack.len() {
            return Err(TreeError::InvalidEncoding {
                index,
                declared: count,
            });
        }
        let children = stack.split_off(stack.len() - count);
        stack.push(NodeTree::new(value, children));
    }
    if stack.len() > 1 {
        debug!(trees = stack.len(), "decoded a forest from pairs");
    }
    stack.reverse();
    Ok(stack)
}

/// Validate parallel arrays and split them into the trees they hold.
///
/// Every tree is a view into the same shared storage. The trees come back
/// earliest-encoded last; empty arrays hold no tree.
pub fn decode_arrays<T>(structure: Vec<usize>, content: Vec<T>) -> Result<Vec<ArrayTree<T>>> {
    if structure.len() != content.len() {
        return Err(TreeError::LengthMismatch {
            structure: structure.len(),
            content: content.len(),
        });
    }
    let ranges = functions::peel_forest(&structure)?;
    if ranges.len() > 1 {
        debug!(trees = ranges.len(), size = structure.len(), "peeled a forest from arrays");
    }
    let structure = Slice::from_vec(structure);
    let content = Slice::from_vec(content);
    Ok(ranges
        .into_iter()
        .map(|range| {
            ArrayTree::from_slices_unchecked(structure.slice(range.clone()), content.slice(range))
        })
        .collect())
}

/// Exactly one tree, or `None` for an empty forest.
pub(crate) fn single<X>(mut forest: Vec<X>) -> Result<Option<X>> {
    match forest.len() {
        0 | 1 => Ok(forest.pop()),
        count => Err(TreeError::Forest { count }),
    }
}
