//! Index arithmetic over linearised trees
//!
//! A linearised tree is a pair of parallel sequences in post-order: position
//! `i` holds a value and the number of its direct children. A node's children
//! are the blocks immediately preceding it, rightmost child first, so the
//! root of the whole sequence is the last entry. Subtree sizes are never
//! stored; everything here recomputes them from the child counts.
//!
//! Every helper expects a well-formed encoding and in-range indexes and
//! panics otherwise. Untrusted input goes through [`peel_forest`] first.

use std::ops::Range;

use crate::{Result, TreeError};

/// Number of entries in the subtree rooted at `index`.
///
/// Assumes a well-formed encoding.
pub fn subtree_size(structure: &[usize], index: usize) -> usize {
    let mut remaining = structure[index];
    let mut pos = index;
    while remaining > 0 {
        pos -= 1;
        remaining = remaining - 1 + structure[pos];
    }
    index - pos + 1
}

/// Like [`subtree_size`], but `None` when the encoding runs out first.
pub fn checked_subtree_size(structure: &[usize], index: usize) -> Option<usize> {
    let mut remaining = *structure.get(index)?;
    let mut pos = index;
    while remaining > 0 {
        pos = pos.checked_sub(1)?;
        remaining = (remaining - 1).checked_add(structure[pos])?;
    }
    Some(index - pos + 1)
}

/// Entries occupied by the subtree rooted at `index`.
pub fn subtree_range(structure: &[usize], index: usize) -> Range<usize> {
    index + 1 - subtree_size(structure, index)..index + 1
}

/// Indexes of the direct children of `parent`, left to right.
pub fn children_indexes(structure: &[usize], parent: usize) -> Vec<usize> {
    let count = structure[parent];
    let mut children = Vec::with_capacity(count);
    let mut pos = parent;
    for seen in 1..=count {
        let child = pos - 1;
        children.push(child);
        if seen < count {
            pos = child + 1 - subtree_size(structure, child);
        }
    }
    children.reverse();
    children
}

/// Position of `child` among the children of `parent`.
pub fn ordinal_of(structure: &[usize], parent: usize, child: usize) -> Option<usize> {
    children_indexes(structure, parent)
        .iter()
        .position(|&idx| idx == child)
}

/// First (or last) child of `parent` whose value satisfies `pred`.
pub fn find_child<T, P>(
    structure: &[usize],
    content: &[T],
    parent: usize,
    pred: P,
    rightmost: bool,
) -> Option<usize>
where
    P: Fn(&T) -> bool,
{
    if rightmost {
        let count = structure[parent];
        let mut pos = parent;
        for seen in 1..=count {
            let child = pos - 1;
            if pred(&content[child]) {
                return Some(child);
            }
            if seen < count {
                pos = child + 1 - subtree_size(structure, child);
            }
        }
        None
    } else {
        children_indexes(structure, parent)
            .into_iter()
            .find(|&child| pred(&content[child]))
    }
}

/// Leaf count of the subtree at `index`.
pub fn width(structure: &[usize], index: usize) -> usize {
    structure[subtree_range(structure, index)]
        .iter()
        .filter(|&&count| count == 0)
        .count()
}

/// Level count of the subtree at `index` (a leaf has height 1).
pub fn height(structure: &[usize], index: usize) -> usize {
    let mut stack: Vec<usize> = Vec::new();
    for &count in &structure[subtree_range(structure, index)] {
        let base = stack.len() - count;
        let tallest = stack[base..].iter().copied().max().unwrap_or(0);
        stack.truncate(base);
        stack.push(tallest + 1);
    }
    stack.pop().unwrap_or(0)
}

/// Indexes of the subtree at `index` in pre-order, left to right.
pub fn pre_order(structure: &[usize], index: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(subtree_size(structure, index));
    let mut stack = vec![index];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(children_indexes(structure, node).into_iter().rev());
    }
    out
}

/// Indexes of the nodes matched by walking `path` from the last entry.
///
/// The trail is empty when the root does not match; it is shorter than the
/// path when some step finds no matching child.
pub fn follow<T, K, M>(
    structure: &[usize],
    content: &[T],
    path: &[K],
    matches: &M,
    rightmost: bool,
) -> Vec<usize>
where
    M: Fn(&T, &K) -> bool,
{
    let mut trail = Vec::new();
    let (Some(root), Some((head, rest))) = (structure.len().checked_sub(1), path.split_first())
    else {
        return trail;
    };
    if !matches(&content[root], head) {
        return trail;
    }
    trail.push(root);

    let mut node = root;
    for item in rest {
        match find_child(structure, content, node, |value| matches(value, item), rightmost) {
            Some(child) => {
                trail.push(child);
                node = child;
            }
            None => break,
        }
    }
    trail
}

/// Root-to-node value sequences, as [`crate::NodeTree::walk_paths`].
pub fn walk_paths<'a, T>(
    structure: &[usize],
    content: &'a [T],
    index: usize,
    max_depth: usize,
    leaves_only: bool,
) -> Vec<Vec<&'a T>> {
    let mut out = Vec::new();
    if max_depth == 0 {
        return out;
    }
    let mut prefix: Vec<&T> = Vec::new();
    let mut stack = vec![(index, 0)];
    while let Some((node, depth)) = stack.pop() {
        prefix.truncate(depth);
        prefix.push(&content[node]);
        let at_limit = prefix.len() >= max_depth;
        if !leaves_only || structure[node] == 0 || at_limit {
            out.push(prefix.clone());
        }
        if !at_limit {
            let children = children_indexes(structure, node);
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }
    out
}

/// Split a possibly concatenated encoding into its trees.
///
/// Trees are peeled from the end, so the result lists the last-encoded tree
/// first.
pub fn peel_forest(structure: &[usize]) -> Result<Vec<Range<usize>>> {
    let mut ranges = Vec::new();
    let mut end = structure.len();
    while end > 0 {
        let root = end - 1;
        let size = checked_subtree_size(&structure[..end], root).ok_or(
            TreeError::InvalidEncoding {
                index: root,
                declared: structure[root],
            },
        )?;
        ranges.push(end - size..end);
        end -= size;
    }
    Ok(ranges)
}
