//! Path navigation and path-guided edits over node trees

use super::NodeTree;
use crate::options::EditOptions;
use crate::outcome::Outcome;

/// How far a path matched, and the child positions taken below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Trail {
    /// Child position chosen at each step after the root.
    pub positions: Vec<usize>,
    /// Number of path items matched, the root included.
    pub matched: usize,
}

impl Trail {
    /// Positions of the fully matched target, if the whole path matched.
    pub fn complete(self, path_len: usize) -> Option<Vec<usize>> {
        (self.matched > 0 && self.matched == path_len).then_some(self.positions)
    }
}

pub(crate) fn find_child<T, P>(children: &[NodeTree<T>], pred: P, rightmost: bool) -> Option<usize>
where
    P: Fn(&NodeTree<T>) -> bool,
{
    if rightmost {
        children.iter().rposition(pred)
    } else {
        children.iter().position(pred)
    }
}

impl<T> NodeTree<T> {
    /// Walk `path` from the root as far as it matches.
    pub(crate) fn follow<K, M>(&self, path: &[K], matches: &M, rightmost: bool) -> Trail
    where
        M: Fn(&T, &K) -> bool,
    {
        let mut trail = Trail {
            positions: Vec::new(),
            matched: 0,
        };
        let Some((head, rest)) = path.split_first() else {
            return trail;
        };
        if !matches(self.value(), head) {
            return trail;
        }
        trail.matched = 1;

        let mut node = self;
        for item in rest {
            match find_child(node.children(), |child| matches(child.value(), item), rightmost) {
                Some(idx) => {
                    trail.positions.push(idx);
                    trail.matched += 1;
                    node = &node.children()[idx];
                }
                None => break,
            }
        }
        trail
    }

    /// Subtree addressed by a root-inclusive path of keys.
    pub fn select<K, M>(&self, path: &[K], matches: M, rightmost: bool) -> Option<&NodeTree<T>>
    where
        M: Fn(&T, &K) -> bool,
    {
        self.follow(path, &matches, rightmost)
            .complete(path.len())
            .map(|positions| self.descend(&positions))
    }

    fn descend(&self, positions: &[usize]) -> &NodeTree<T> {
        let mut node = self;
        for &idx in positions {
            node = &node.children()[idx];
        }
        node
    }
}

fn same_value<T: PartialEq>(value: &T, item: &T) -> bool {
    value == item
}

/// Rebuild the spine down to `positions`, replacing the node found there.
fn rebuild<T, F>(node: &NodeTree<T>, positions: &[usize], edit: F) -> NodeTree<T>
where
    T: Clone,
    F: FnOnce(&NodeTree<T>) -> NodeTree<T>,
{
    let mut spine = Vec::with_capacity(positions.len());
    let mut target = node;
    for &idx in positions {
        spine.push(target);
        target = &target.children()[idx];
    }
    let mut rebuilt = edit(target);
    for (parent, &idx) in spine.into_iter().zip(positions).rev() {
        let mut children = parent.children().to_vec();
        children[idx] = rebuilt;
        rebuilt = parent.with_children(children);
    }
    rebuilt
}

/// Linear chain `prefix[0] -> prefix[1] -> ... -> tail`.
pub(crate) fn chain<T: Clone>(prefix: &[T], tail: NodeTree<T>) -> NodeTree<T> {
    prefix
        .iter()
        .rev()
        .fold(tail, |node, value| NodeTree::new(value.clone(), vec![node]))
}

/// Add `child` to a child list.
///
/// When distinct, a sibling holding the same value (the leftmost one)
/// absorbs the new child's children instead.
pub(crate) fn insert_child<T: Clone + PartialEq>(
    children: &mut Vec<NodeTree<T>>,
    child: NodeTree<T>,
    append: bool,
    keep_distinct: bool,
) {
    if keep_distinct {
        if let Some(idx) = children.iter().position(|c| c.value() == child.value()) {
            children[idx] = merge_into(&children[idx], child.children(), append);
            return;
        }
    }
    if append {
        children.push(child);
    } else {
        children.insert(0, child);
    }
}

/// A node being merged into, with the incoming children still to place.
struct MergeFrame<'a, T> {
    target: NodeTree<T>,
    children: Vec<NodeTree<T>>,
    extra: &'a [NodeTree<T>],
    next: usize,
    /// Position of `target` among its parent's children.
    slot: usize,
}

impl<'a, T: Clone> MergeFrame<'a, T> {
    fn open(target: &NodeTree<T>, extra: &'a [NodeTree<T>], slot: usize) -> Self {
        Self {
            target: target.clone(),
            children: target.children().to_vec(),
            extra,
            next: 0,
            slot,
        }
    }
}

/// Distinct-insert every tree of `extra` into `target`'s children.
///
/// A same-valued child (the leftmost one) absorbs an incoming tree's
/// children, level by level; anything without a match is added whole.
pub(crate) fn merge_into<T: Clone + PartialEq>(
    target: &NodeTree<T>,
    extra: &[NodeTree<T>],
    append: bool,
) -> NodeTree<T> {
    if extra.is_empty() {
        return target.clone();
    }
    let mut merged = None;
    let mut stack = vec![MergeFrame::open(target, extra, 0)];
    while let Some(mut frame) = stack.pop() {
        if frame.next < frame.extra.len() {
            // prepending one at a time, so go backwards to keep their order
            let extra = frame.extra;
            let pos = if append {
                frame.next
            } else {
                extra.len() - 1 - frame.next
            };
            let incoming = &extra[pos];
            frame.next += 1;
            let existing = frame
                .children
                .iter()
                .position(|child| child.value() == incoming.value());
            match existing {
                Some(slot) if !incoming.is_leaf() => {
                    let sibling = MergeFrame::open(&frame.children[slot], incoming.children(), slot);
                    stack.push(frame);
                    stack.push(sibling);
                }
                Some(_) => stack.push(frame),
                None => {
                    if append {
                        frame.children.push(incoming.clone());
                    } else {
                        frame.children.insert(0, incoming.clone());
                    }
                    stack.push(frame);
                }
            }
            continue;
        }
        let node = frame.target.with_children(frame.children);
        match stack.last_mut() {
            Some(parent) => parent.children[frame.slot] = node,
            None => merged = Some(node),
        }
    }
    merged.unwrap_or_else(|| target.clone())
}

/// Remove the child at `idx` and splice its children in its place.
fn lift_child<T: Clone + PartialEq>(
    children: &[NodeTree<T>],
    idx: usize,
    keep_distinct: bool,
) -> Vec<NodeTree<T>> {
    let removed = &children[idx];
    let mut out: Vec<NodeTree<T>> = children
        .iter()
        .enumerate()
        .filter(|(pos, _)| *pos != idx)
        .map(|(_, child)| child.clone())
        .collect();

    if !keep_distinct {
        let tail = out.split_off(idx);
        out.extend(removed.children().iter().cloned());
        out.extend(tail);
        return out;
    }

    let mut at = idx;
    for orphan in removed.children() {
        match out.iter().position(|c| c.value() == orphan.value()) {
            Some(sibling) => out[sibling] = merge_into(&out[sibling], orphan.children(), true),
            None => {
                out.insert(at, orphan.clone());
                at += 1;
            }
        }
    }
    out
}

/// Put `replacement` where the child at `idx` was.
///
/// When distinct and another sibling already holds the replacement's value,
/// that sibling absorbs the replacement's children and `idx` is dropped.
fn replace_child<T: Clone + PartialEq>(
    children: &[NodeTree<T>],
    idx: usize,
    replacement: NodeTree<T>,
    keep_distinct: bool,
) -> Vec<NodeTree<T>> {
    let mut out = children.to_vec();
    if keep_distinct {
        let sibling = (0..children.len())
            .find(|&pos| pos != idx && children[pos].value() == replacement.value());
        if let Some(sibling) = sibling {
            out[sibling] = merge_into(&out[sibling], replacement.children(), true);
            out.remove(idx);
            return out;
        }
    }
    out[idx] = replacement;
    out
}

impl<T: Clone + PartialEq> NodeTree<T> {
    /// Copy of this node with one more child.
    pub fn with_child(&self, child: NodeTree<T>, options: EditOptions) -> NodeTree<T> {
        let mut children = self.children().to_vec();
        insert_child(&mut children, child, options.append, options.keep_distinct);
        self.with_children(children)
    }

    /// Insert `tree` as a child of the node at `path`.
    ///
    /// With `create_missing` an unmatched suffix of the path is synthesised
    /// as a chain of single-child nodes; otherwise a partial match leaves the
    /// tree unchanged.
    pub fn insert_tree_at(
        &self,
        path: &[T],
        tree: NodeTree<T>,
        options: EditOptions,
        create_missing: bool,
    ) -> Outcome<NodeTree<T>> {
        let trail = self.follow(path, &same_value::<T>, options.rightmost);
        if trail.matched == 0 {
            return Outcome::Unchanged(self.clone());
        }
        let child = if trail.matched == path.len() {
            tree
        } else if create_missing {
            chain(&path[trail.matched..], tree)
        } else {
            return Outcome::Unchanged(self.clone());
        };
        Outcome::Modified(rebuild(self, &trail.positions, |target| {
            target.with_child(child, options)
        }))
    }

    /// Add the root-inclusive `branch`, creating whatever part is missing.
    pub fn insert_branch(&self, branch: &[T], options: EditOptions) -> Outcome<NodeTree<T>> {
        let trail = self.follow(branch, &same_value::<T>, options.rightmost);
        if trail.matched == 0 {
            return Outcome::Unchanged(self.clone());
        }
        let Some((last, middle)) = branch[trail.matched..].split_last() else {
            return Outcome::Unchanged(self.clone());
        };
        let tail = chain(middle, NodeTree::leaf(last.clone()));
        Outcome::Modified(rebuild(self, &trail.positions, |target| {
            target.with_child(tail, options)
        }))
    }

    /// Replace the value of the node at `path`, keeping its children.
    pub fn update_value_at(&self, path: &[T], value: T, options: EditOptions) -> Outcome<NodeTree<T>> {
        let Some(positions) = self
            .follow(path, &same_value::<T>, options.rightmost)
            .complete(path.len())
        else {
            return Outcome::Unchanged(self.clone());
        };
        match positions.split_last() {
            None => Outcome::Modified(self.with_value(value)),
            Some((&idx, parents)) => Outcome::Modified(rebuild(self, parents, |parent| {
                let updated = parent.children()[idx].with_value(value);
                parent.with_children(replace_child(
                    parent.children(),
                    idx,
                    updated,
                    options.keep_distinct,
                ))
            })),
        }
    }

    /// Replace the whole subtree at `path`.
    pub fn update_tree_at(
        &self,
        path: &[T],
        tree: NodeTree<T>,
        options: EditOptions,
    ) -> Outcome<NodeTree<T>> {
        let Some(positions) = self
            .follow(path, &same_value::<T>, options.rightmost)
            .complete(path.len())
        else {
            return Outcome::Unchanged(self.clone());
        };
        match positions.split_last() {
            None => Outcome::Modified(tree),
            Some((&idx, parents)) => Outcome::Modified(rebuild(self, parents, |parent| {
                parent.with_children(replace_child(
                    parent.children(),
                    idx,
                    tree,
                    options.keep_distinct,
                ))
            })),
        }
    }

    /// Remove the node at `path`, moving its children up to its parent.
    ///
    /// The root can only go when it leaves at most one child behind; a root
    /// with several children is returned unchanged. `None` stands for the
    /// empty tree.
    pub fn remove_value_at(&self, path: &[T], options: EditOptions) -> Outcome<Option<NodeTree<T>>> {
        let Some(positions) = self
            .follow(path, &same_value::<T>, options.rightmost)
            .complete(path.len())
        else {
            return Outcome::Unchanged(Some(self.clone()));
        };
        match positions.split_last() {
            None => match self.children() {
                [] => Outcome::Modified(None),
                [only] => Outcome::Modified(Some(only.clone())),
                _ => Outcome::Unchanged(Some(self.clone())),
            },
            Some((&idx, parents)) => Outcome::Modified(Some(rebuild(self, parents, |parent| {
                parent.with_children(lift_child(parent.children(), idx, options.keep_distinct))
            }))),
        }
    }

    /// Remove the whole subtree at `path`. `None` stands for the empty tree.
    pub fn remove_tree_at(&self, path: &[T], options: EditOptions) -> Outcome<Option<NodeTree<T>>> {
        let Some(positions) = self
            .follow(path, &same_value::<T>, options.rightmost)
            .complete(path.len())
        else {
            return Outcome::Unchanged(Some(self.clone()));
        };
        match positions.split_last() {
            None => Outcome::Modified(None),
            Some((&idx, parents)) => Outcome::Modified(Some(rebuild(self, parents, |parent| {
                let mut children = parent.children().to_vec();
                children.remove(idx);
                parent.with_children(children)
            }))),
        }
    }
}
