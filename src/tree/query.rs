//! Read-only traversals and path lookups

use super::Tree;

impl<T> Tree<T> {
    /// Values in pre-order, left to right.
    pub fn values(&self) -> Vec<&T> {
        match self {
            Tree::Empty => Vec::new(),
            Tree::Node(node) => node.values(),
            Tree::Array(array) => array.values(),
        }
    }

    /// Leaf values, left to right.
    pub fn leaves(&self) -> Vec<&T> {
        match self {
            Tree::Empty => Vec::new(),
            Tree::Node(node) => node.leaves(),
            Tree::Array(array) => array.leaves(),
        }
    }

    /// Values of the root's children.
    pub fn child_values(&self) -> Vec<&T> {
        match self {
            Tree::Empty => Vec::new(),
            Tree::Node(node) => node.children().iter().map(|child| child.value()).collect(),
            Tree::Array(array) => array.child_values(),
        }
    }

    /// The root's children as trees of the same representation.
    pub fn children(&self) -> Vec<Tree<T>> {
        match self {
            Tree::Empty => Vec::new(),
            Tree::Node(node) => node.children().iter().cloned().map(Tree::Node).collect(),
            Tree::Array(array) => array.children().into_iter().map(Tree::Array).collect(),
        }
    }

    /// Leftmost child of the root.
    pub fn first_child(&self) -> Option<Tree<T>> {
        self.children().into_iter().next()
    }

    /// Rightmost child of the root.
    pub fn last_child(&self) -> Option<Tree<T>> {
        self.children().pop()
    }

    /// Every subtree, the whole tree first, in pre-order.
    pub fn trees(&self) -> Vec<Tree<T>> {
        match self {
            Tree::Empty => Vec::new(),
            Tree::Node(node) => node.subtrees().into_iter().cloned().map(Tree::Node).collect(),
            Tree::Array(array) => array.subtrees().into_iter().map(Tree::Array).collect(),
        }
    }

    /// Root-to-leaf value sequences, left to right.
    pub fn branches(&self) -> Vec<Vec<&T>> {
        self.branches_with_max_depth(usize::MAX)
    }

    /// Branches cut at `max_depth` levels; a cut branch ends at the limit.
    pub fn branches_with_max_depth(&self, max_depth: usize) -> Vec<Vec<&T>> {
        self.walk(max_depth, true)
    }

    /// Root-to-node value sequences for every node, in pre-order.
    pub fn paths(&self) -> Vec<Vec<&T>> {
        self.walk(usize::MAX, false)
    }

    fn walk(&self, max_depth: usize, leaves_only: bool) -> Vec<Vec<&T>> {
        match self {
            Tree::Empty => Vec::new(),
            Tree::Node(node) => node.walk_paths(max_depth, leaves_only),
            Tree::Array(array) => array.walk_paths(max_depth, leaves_only),
        }
    }

    /// Number of branches satisfying `pred`.
    pub fn count_branches<P: Fn(&[&T]) -> bool>(&self, pred: P) -> usize {
        self.branches().iter().filter(|branch| pred(branch)).count()
    }

    /// Whether some branch satisfies `pred`.
    pub fn exists_branch<P: Fn(&[&T]) -> bool>(&self, pred: P) -> bool {
        self.branches().iter().any(|branch| pred(branch))
    }

    /// Subtree at a path of keys, where `key` projects a value to its key.
    pub fn select_tree_by<K, F>(&self, path: &[K], key: F, rightmost: bool) -> Option<Tree<T>>
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let matches = |value: &T, item: &K| key(value) == *item;
        match self {
            Tree::Empty => None,
            Tree::Node(node) => node.select(path, matches, rightmost).cloned().map(Tree::Node),
            Tree::Array(array) => array.select(path, matches, rightmost).map(Tree::Array),
        }
    }

    /// Value at a path of keys, where `key` projects a value to its key.
    pub fn select_value_by<K, F>(&self, path: &[K], key: F, rightmost: bool) -> Option<&T>
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        self.select_value_with(path, |value: &T, item: &K| key(value) == *item, rightmost)
    }

    /// Whether a path of keys leads to a node.
    pub fn contains_path_by<K, F>(&self, path: &[K], key: F) -> bool
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        self.select_value_by(path, key, false).is_some()
    }

    /// Whether a path of keys leads from the root to a leaf.
    pub fn contains_branch_by<K, F>(&self, branch: &[K], key: F) -> bool
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        self.select_tree_by(branch, key, false).is_some_and(|tree| tree.is_leaf())
    }

    fn select_value_with<K, M>(&self, path: &[K], matches: M, rightmost: bool) -> Option<&T>
    where
        M: Fn(&T, &K) -> bool,
    {
        match self {
            Tree::Empty => None,
            Tree::Node(node) => node.select(path, matches, rightmost).map(|found| found.value()),
            Tree::Array(array) => {
                let trail = crate::array::functions::follow(
                    array.structure(),
                    array.content(),
                    path,
                    &matches,
                    rightmost,
                );
                if trail.is_empty() || trail.len() < path.len() {
                    return None;
                }
                trail.last().map(|&idx| &array.content()[idx])
            }
        }
    }
}

impl<T: PartialEq> Tree<T> {
    /// Whether any node holds `value`.
    pub fn contains_value(&self, value: &T) -> bool {
        match self {
            Tree::Empty => false,
            Tree::Node(node) => node.values().contains(&value),
            Tree::Array(array) => array.content().contains(value),
        }
    }

    /// Whether a child of the root holds `value`.
    pub fn contains_child(&self, value: &T) -> bool {
        self.child_values().contains(&value)
    }

    /// Subtree at a root-inclusive path; the empty path selects nothing.
    pub fn select_tree(&self, path: &[T], rightmost: bool) -> Option<Tree<T>> {
        let matches = |value: &T, item: &T| value == item;
        match self {
            Tree::Empty => None,
            Tree::Node(node) => node.select(path, matches, rightmost).cloned().map(Tree::Node),
            Tree::Array(array) => array.select(path, matches, rightmost).map(Tree::Array),
        }
    }

    /// Value of the node at a root-inclusive path.
    pub fn select_value(&self, path: &[T], rightmost: bool) -> Option<&T> {
        self.select_value_with(path, |value: &T, item: &T| value == item, rightmost)
    }

    /// Whether the root-inclusive path leads to a node.
    pub fn contains_path(&self, path: &[T]) -> bool {
        self.select_value(path, false).is_some()
    }

    /// Whether `branch` leads from the root to a leaf.
    pub fn contains_branch(&self, branch: &[T]) -> bool {
        self.select_tree(branch, false).is_some_and(|tree| tree.is_leaf())
    }
}
