//! Path-guided edits dispatched to the node or array algorithms
//!
//! Node edits rebuild the spine and share the rest. Array edits copy the
//! arrays once into a [`MutableArrayTree`], splice, and freeze the result.

use tracing::debug;

use super::{prefer_inflated, Tree};
use crate::array::MutableArrayTree;
use crate::node::{chain, NodeTree};
use crate::options::EditOptions;
use crate::outcome::Outcome;

impl<T: Clone + PartialEq> Tree<T> {
    /// Run an in-place edit on a private copy of the arrays.
    fn edit_arrays<F>(&self, edit: F) -> Outcome<Tree<T>>
    where
        F: FnOnce(&mut MutableArrayTree<T>) -> bool,
    {
        let mut buffer = self.mutable();
        if edit(&mut buffer) {
            Outcome::Modified(buffer.into_tree())
        } else {
            Outcome::Unchanged(self.clone())
        }
    }

    /// Inserting into the empty tree: the path (if allowed) becomes a chain.
    fn seed(&self, path: &[T], tree: &Tree<T>, create_missing: bool) -> Outcome<Tree<T>> {
        match tree.to_node() {
            Some(_) if path.is_empty() => Outcome::Modified(tree.clone()),
            Some(node) if create_missing => Outcome::Modified(Tree::Node(chain(path, node))),
            _ => Outcome::Unchanged(self.clone()),
        }
    }

    fn insert_value(&self, path: &[T], value: T, options: EditOptions, create_missing: bool) -> Outcome<Tree<T>> {
        match self {
            Tree::Empty => self.seed(path, &Tree::leaf(value), create_missing),
            Tree::Node(node) => node
                .insert_tree_at(path, NodeTree::leaf(value), options, create_missing)
                .map(Tree::Node),
            Tree::Array(_) => self.edit_arrays(|buffer| {
                if create_missing {
                    buffer.insert_value_at(path, value, options)
                } else {
                    buffer.try_insert_value_at(path, value, options)
                }
            }),
        }
    }

    fn insert_tree(
        &self,
        path: &[T],
        tree: &Tree<T>,
        options: EditOptions,
        create_missing: bool,
    ) -> Outcome<Tree<T>> {
        if self.is_empty() {
            return self.seed(path, tree, create_missing);
        }
        if tree.is_empty() {
            return Outcome::Unchanged(self.clone());
        }
        if prefer_inflated(self, tree) {
            if let (Some(node), Some(child)) = (self.to_node(), tree.to_node()) {
                return node
                    .insert_tree_at(path, child, options, create_missing)
                    .map(Tree::Node);
            }
        }
        debug!(this = self.size(), inserted = tree.size(), "inserting on arrays");
        self.edit_arrays(|buffer| {
            if create_missing {
                buffer.insert_tree_at(path, tree, options)
            } else {
                buffer.try_insert_tree_at(path, tree, options)
            }
        })
    }

    /// Insert a leaf under the node at `path`, creating the missing part of
    /// the path. Unchanged only when the path does not start at the root.
    pub fn insert_value_at(&self, path: &[T], value: T, options: EditOptions) -> Tree<T> {
        self.insert_value(path, value, options, true).into_inner()
    }

    /// Insert a leaf under the node at `path` if the whole path exists.
    pub fn try_insert_value_at(&self, path: &[T], value: T, options: EditOptions) -> Outcome<Tree<T>> {
        self.insert_value(path, value, options, false)
    }

    /// Insert a subtree under the node at `path`, creating the missing part
    /// of the path.
    pub fn insert_tree_at(&self, path: &[T], tree: &Tree<T>, options: EditOptions) -> Tree<T> {
        self.insert_tree(path, tree, options, true).into_inner()
    }

    /// Insert a subtree under the node at `path` if the whole path exists.
    pub fn try_insert_tree_at(&self, path: &[T], tree: &Tree<T>, options: EditOptions) -> Outcome<Tree<T>> {
        self.insert_tree(path, tree, options, false)
    }

    /// Add a root-inclusive branch, creating whatever part of it is missing.
    pub fn insert_branch(&self, branch: &[T], options: EditOptions) -> Outcome<Tree<T>> {
        match self {
            Tree::Empty if branch.is_empty() => Outcome::Unchanged(Tree::Empty),
            Tree::Empty => Outcome::Modified(Tree::linear(branch.iter().cloned())),
            Tree::Node(node) => node.insert_branch(branch, options).map(Tree::Node),
            Tree::Array(_) => self.edit_arrays(|buffer| buffer.insert_branch(branch, options)),
        }
    }

    /// Add a leaf under the root.
    pub fn insert_leaf(&self, value: T, options: EditOptions) -> Tree<T> {
        match self.value() {
            None => Tree::leaf(value),
            Some(root) => self.insert_value_at(std::slice::from_ref(root), value, options),
        }
    }

    /// Add a subtree under the root.
    pub fn insert_child(&self, child: &Tree<T>, options: EditOptions) -> Tree<T> {
        match self.value() {
            None => child.clone(),
            Some(root) => self.insert_tree_at(std::slice::from_ref(root), child, options),
        }
    }

    /// Add several subtrees under the root, keeping their order whether they
    /// are appended or prepended.
    pub fn insert_children<'a, I>(&self, children: I, options: EditOptions) -> Tree<T>
    where
        I: IntoIterator<Item = &'a Tree<T>>,
        T: 'a,
    {
        let mut children: Vec<&Tree<T>> = children.into_iter().collect();
        // prepending one at a time, so go backwards to keep their order
        if !options.append {
            children.reverse();
        }
        children
            .into_iter()
            .fold(self.clone(), |tree, child| tree.insert_child(child, options))
    }

    /// Replace the value of the node at `path`, keeping its children.
    pub fn update_value_at(&self, path: &[T], value: T, options: EditOptions) -> Outcome<Tree<T>> {
        match self {
            Tree::Empty => Outcome::Unchanged(Tree::Empty),
            Tree::Node(node) => node.update_value_at(path, value, options).map(Tree::Node),
            Tree::Array(_) => self.edit_arrays(|buffer| buffer.update_value_at(path, value, options)),
        }
    }

    /// Replace the subtree at `path`; the empty tree removes it.
    pub fn update_tree_at(&self, path: &[T], tree: &Tree<T>, options: EditOptions) -> Outcome<Tree<T>> {
        if self.is_empty() {
            return Outcome::Unchanged(Tree::Empty);
        }
        if tree.is_empty() {
            return self.remove_tree_at(path, options);
        }
        if prefer_inflated(self, tree) {
            if let (Some(node), Some(replacement)) = (self.to_node(), tree.to_node()) {
                return node.update_tree_at(path, replacement, options).map(Tree::Node);
            }
        }
        self.edit_arrays(|buffer| buffer.update_tree_at(path, tree, options))
    }

    /// Replace the value at `path` with `f` of the current one.
    pub fn modify_value_at<F>(&self, path: &[T], f: F, options: EditOptions) -> Outcome<Tree<T>>
    where
        F: FnOnce(&T) -> T,
    {
        match self.select_value(path, options.rightmost) {
            Some(current) => self.update_value_at(path, f(current), options),
            None => Outcome::Unchanged(self.clone()),
        }
    }

    /// Replace the subtree at `path` with `f` of the current one.
    pub fn modify_tree_at<F>(&self, path: &[T], f: F, options: EditOptions) -> Outcome<Tree<T>>
    where
        F: FnOnce(&Tree<T>) -> Tree<T>,
    {
        match self.select_tree(path, options.rightmost) {
            Some(current) => self.update_tree_at(path, &f(&current), options),
            None => Outcome::Unchanged(self.clone()),
        }
    }

    /// Remove the node at `path`, handing its children to its parent.
    ///
    /// The root goes only if it leaves at most one child; a leaf root leaves
    /// the empty tree and a single child becomes the new root.
    pub fn remove_value_at(&self, path: &[T], options: EditOptions) -> Outcome<Tree<T>> {
        match self {
            Tree::Empty => Outcome::Unchanged(Tree::Empty),
            Tree::Node(node) => node
                .remove_value_at(path, options)
                .map(|rest| rest.map_or(Tree::Empty, Tree::Node)),
            Tree::Array(_) => self.edit_arrays(|buffer| buffer.remove_value_at(path, options)),
        }
    }

    /// Remove the whole subtree at `path`.
    pub fn remove_tree_at(&self, path: &[T], options: EditOptions) -> Outcome<Tree<T>> {
        match self {
            Tree::Empty => Outcome::Unchanged(Tree::Empty),
            Tree::Node(node) => node
                .remove_tree_at(path, options)
                .map(|rest| rest.map_or(Tree::Empty, Tree::Node)),
            Tree::Array(_) => self.edit_arrays(|buffer| buffer.remove_tree_at(path, options)),
        }
    }
}
