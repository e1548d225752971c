//! Branch-set operations over node trees

use super::{merge_into, NodeTree};

impl<T: Clone + PartialEq> NodeTree<T> {
    /// Every branch of both trees; matched children are unioned recursively.
    ///
    /// Trees with different roots cannot be joined; `self` comes back as is.
    pub fn union(&self, other: &NodeTree<T>) -> NodeTree<T> {
        if self.value() != other.value() {
            return self.clone();
        }
        merge_into(self, other.children(), true)
    }

    /// Only the paths present in both trees. `None` when the roots differ.
    pub fn intersect(&self, other: &NodeTree<T>) -> Option<NodeTree<T>> {
        if self.value() != other.value() {
            return None;
        }
        let mut common = None;
        let mut stack = vec![Frame::open(self, vec![other])];
        while let Some(mut frame) = stack.pop() {
            let left = frame.left;
            if let Some(child) = left.children().get(frame.next) {
                frame.next += 1;
                let matches = counterparts(&frame.rights, child.value());
                stack.push(frame);
                if !matches.is_empty() {
                    stack.push(Frame::open(child, matches));
                }
                continue;
            }
            let node = left.with_children(frame.kept);
            match stack.last_mut() {
                Some(parent) => parent.kept.push(node),
                None => common = Some(node),
            }
        }
        common
    }

    /// The branches of `self` that `other` does not contain.
    ///
    /// `None` when every branch of `self` is covered by `other`.
    pub fn diff(&self, other: &NodeTree<T>) -> Option<NodeTree<T>> {
        if self.value() != other.value() {
            return Some(self.clone());
        }
        let mut rest = None;
        let mut stack = vec![Frame::open(self, vec![other])];
        while let Some(mut frame) = stack.pop() {
            let left = frame.left;
            if let Some(child) = left.children().get(frame.next) {
                frame.next += 1;
                let matches = counterparts(&frame.rights, child.value());
                if matches.is_empty() {
                    frame.kept.push(child.clone());
                    stack.push(frame);
                } else {
                    stack.push(frame);
                    stack.push(Frame::open(child, matches));
                }
                continue;
            }
            let node = (!frame.kept.is_empty()).then(|| left.with_children(frame.kept));
            match stack.last_mut() {
                Some(parent) => parent.kept.extend(node),
                None => rest = node,
            }
        }
        rest
    }
}

/// A left node matched against every right node holding its value.
struct Frame<'a, T> {
    left: &'a NodeTree<T>,
    rights: Vec<&'a NodeTree<T>>,
    next: usize,
    kept: Vec<NodeTree<T>>,
}

impl<'a, T> Frame<'a, T> {
    fn open(left: &'a NodeTree<T>, rights: Vec<&'a NodeTree<T>>) -> Self {
        Self {
            left,
            rights,
            next: 0,
            kept: Vec::new(),
        }
    }
}

/// Children of any of `rights` holding `value`; duplicates all count.
fn counterparts<'a, T: PartialEq>(rights: &[&'a NodeTree<T>], value: &T) -> Vec<&'a NodeTree<T>> {
    rights
        .iter()
        .flat_map(|&right| right.children())
        .filter(|child| child.value() == value)
        .collect()
}
