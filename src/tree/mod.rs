//! The `Tree` façade
//!
//! [`Tree`] is a closed sum over the empty tree and the two representations.
//! Every operation matches on the variants and dispatches to the node or
//! array algorithms; binary operations with mixed representations convert
//! the cheaper side first (see [`prefer_inflated`]).

mod edit;
mod query;
mod transform;

use std::fmt;

use tracing::debug;

use crate::array::{ArrayTree, MutableArrayTree};
use crate::builder;
use crate::codec;
use crate::node::NodeTree;
use crate::Result;

/// Ordered tree with values of type `T`.
pub enum Tree<T> {
    /// No nodes at all.
    Empty,
    /// Pointer-linked, reference-counted nodes.
    Node(NodeTree<T>),
    /// Post-order structure/content arrays.
    Array(ArrayTree<T>),
}

/// Which side of a mixed binary operation to convert.
///
/// `true` means work on nodes (inflate the array side); `false` means work on
/// arrays (deflate the node side). The smaller side is the one converted.
pub fn prefer_inflated<T>(this: &Tree<T>, other: &Tree<T>) -> bool {
    match (this, other) {
        (Tree::Node(a), Tree::Array(b)) => b.size() <= a.size(),
        (Tree::Array(a), Tree::Node(b)) => b.size() > a.size(),
        (Tree::Array(_), Tree::Array(_)) => false,
        _ => true,
    }
}

/// Both operands brought to one representation.
pub(crate) enum Aligned<T> {
    Nodes(NodeTree<T>, NodeTree<T>),
    Arrays(ArrayTree<T>, ArrayTree<T>),
}

/// Bring two non-empty trees to a common representation, or `None` if
/// either is empty.
pub(crate) fn align<T: Clone>(this: &Tree<T>, other: &Tree<T>) -> Option<Aligned<T>> {
    let aligned = match (this, other) {
        (Tree::Empty, _) | (_, Tree::Empty) => return None,
        (Tree::Node(a), Tree::Node(b)) => Aligned::Nodes(a.clone(), b.clone()),
        (Tree::Array(a), Tree::Array(b)) => Aligned::Arrays(a.clone(), b.clone()),
        _ if prefer_inflated(this, other) => {
            debug!(this = this.size(), other = other.size(), "inflating the array side");
            Aligned::Nodes(this.to_node()?, other.to_node()?)
        }
        _ => {
            debug!(this = this.size(), other = other.size(), "deflating the node side");
            Aligned::Arrays(this.to_array()?, other.to_array()?)
        }
    };
    Some(aligned)
}

impl<T> Tree<T> {
    /// The empty tree.
    pub fn empty() -> Self {
        Tree::Empty
    }

    /// Single-node tree.
    pub fn leaf(value: T) -> Self {
        Tree::Node(NodeTree::leaf(value))
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Node(node) => node.size(),
            Tree::Array(array) => array.size(),
        }
    }

    /// Number of leaves.
    pub fn width(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Node(node) => node.width(),
            Tree::Array(array) => array.width(),
        }
    }

    /// Number of levels; a single node has height 1.
    pub fn height(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Node(node) => node.height(),
            Tree::Array(array) => array.height(),
        }
    }

    /// Whether this is the empty tree.
    pub fn is_empty(&self) -> bool {
        matches!(self, Tree::Empty)
    }

    /// Whether the tree is a single node.
    pub fn is_leaf(&self) -> bool {
        match self {
            Tree::Empty => false,
            Tree::Node(node) => node.is_leaf(),
            Tree::Array(array) => array.is_leaf(),
        }
    }

    /// Number of children of the root.
    pub fn child_count(&self) -> usize {
        match self {
            Tree::Empty => 0,
            Tree::Node(node) => node.child_count(),
            Tree::Array(array) => array.child_count(),
        }
    }

    /// Root value.
    pub fn value(&self) -> Option<&T> {
        match self {
            Tree::Empty => None,
            Tree::Node(node) => Some(node.value()),
            Tree::Array(array) => Some(array.value()),
        }
    }

    /// Post-order `(child_count, value)` pairs.
    pub fn pairs(&self) -> Box<dyn Iterator<Item = (usize, &T)> + '_> {
        match self {
            Tree::Empty => Box::new(std::iter::empty()),
            Tree::Node(node) => Box::new(node.pairs()),
            Tree::Array(array) => Box::new(array.pairs()),
        }
    }

    /// Child counts in post-order.
    pub fn to_structure_array(&self) -> Vec<usize> {
        match self {
            Tree::Array(array) => array.structure().to_vec(),
            _ => self.pairs().map(|(count, _)| count).collect(),
        }
    }

    /// Map every value, keeping the representation.
    pub fn map<K, F: FnMut(&T) -> K>(&self, mut f: F) -> Tree<K> {
        match self {
            Tree::Empty => Tree::Empty,
            Tree::Node(node) => Tree::Node(node.map(&mut f)),
            Tree::Array(array) => Tree::Array(array.map(f)),
        }
    }
}

impl<T: Clone> Tree<T> {
    /// Tree with the given root and children; empty children are skipped.
    pub fn node(value: T, children: Vec<Tree<T>>) -> Self {
        let children = children.into_iter().filter_map(Tree::into_node).collect();
        Tree::Node(NodeTree::new(value, children))
    }

    /// Single branch, first value at the root. No values give the empty tree.
    pub fn linear<I: IntoIterator<Item = T>>(values: I) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        match values.split_last() {
            None => Tree::Empty,
            Some((last, prefix)) => {
                Tree::Node(crate::node::chain(prefix, NodeTree::leaf(last.clone())))
            }
        }
    }

    /// Decode one tree from post-order pairs.
    ///
    /// An empty sequence gives the empty tree; several trees are an error.
    pub fn from_pairs<I: IntoIterator<Item = (usize, T)>>(pairs: I) -> Result<Self> {
        let forest = codec::decode_pairs(pairs)?;
        Ok(codec::single(forest)?.map_or(Tree::Empty, Tree::Node))
    }

    /// Decode every tree held in post-order pairs, earliest-encoded last.
    pub fn forest_from_pairs<I: IntoIterator<Item = (usize, T)>>(pairs: I) -> Result<Vec<Self>> {
        builder::from_size_and_value_pairs(pairs)
    }

    /// Wrap parallel arrays holding exactly one tree, without copying them.
    pub fn from_arrays(structure: Vec<usize>, content: Vec<T>) -> Result<Self> {
        let forest = codec::decode_arrays(structure, content)?;
        Ok(codec::single(forest)?.map_or(Tree::Empty, Tree::Array))
    }

    /// Every tree held in parallel arrays, earliest-encoded last.
    pub fn forest_from_arrays(structure: Vec<usize>, content: Vec<T>) -> Result<Vec<Self>> {
        let forest = codec::decode_arrays(structure, content)?;
        if forest.is_empty() {
            return Ok(vec![Tree::Empty]);
        }
        Ok(forest.into_iter().map(Tree::Array).collect())
    }

    /// Owned post-order pairs.
    pub fn to_pairs(&self) -> Vec<(usize, T)> {
        self.pairs().map(|(count, value)| (count, value.clone())).collect()
    }

    /// Owned structure and content arrays.
    pub fn to_arrays(&self) -> (Vec<usize>, Vec<T>) {
        match self {
            Tree::Empty => (Vec::new(), Vec::new()),
            Tree::Node(node) => codec::node_to_arrays(node),
            Tree::Array(array) => array.to_arrays(),
        }
    }

    /// Node form of this tree.
    pub fn inflated(&self) -> Self {
        match self {
            Tree::Array(array) => Tree::Node(codec::inflate(array)),
            _ => self.clone(),
        }
    }

    /// Array form of this tree.
    pub fn deflated(&self) -> Self {
        match self {
            Tree::Node(node) => Tree::Array(codec::deflate(node)),
            _ => self.clone(),
        }
    }

    /// Copy into a tree that can be edited in place.
    pub fn mutable(&self) -> MutableArrayTree<T> {
        match self {
            Tree::Empty => MutableArrayTree::new(),
            Tree::Node(node) => {
                let (structure, content) = codec::node_to_arrays(node);
                MutableArrayTree::from_vecs(structure, content)
            }
            Tree::Array(array) => array.mutable(),
        }
    }

    pub(crate) fn to_node(&self) -> Option<NodeTree<T>> {
        match self {
            Tree::Empty => None,
            Tree::Node(node) => Some(node.clone()),
            Tree::Array(array) => Some(codec::inflate(array)),
        }
    }

    pub(crate) fn into_node(self) -> Option<NodeTree<T>> {
        match self {
            Tree::Node(node) => Some(node),
            other => other.to_node(),
        }
    }

    pub(crate) fn to_array(&self) -> Option<ArrayTree<T>> {
        match self {
            Tree::Empty => None,
            Tree::Node(node) => Some(codec::deflate(node)),
            Tree::Array(array) => Some(array.clone()),
        }
    }
}

impl<T> From<NodeTree<T>> for Tree<T> {
    fn from(node: NodeTree<T>) -> Self {
        Tree::Node(node)
    }
}

impl<T> From<ArrayTree<T>> for Tree<T> {
    fn from(array: ArrayTree<T>) -> Self {
        Tree::Array(array)
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::Empty
    }
}

impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        match self {
            Tree::Empty => Tree::Empty,
            Tree::Node(node) => Tree::Node(node.clone()),
            Tree::Array(array) => Tree::Array(array.clone()),
        }
    }
}

/// Structural equality, whatever the representations.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tree::Node(a), Tree::Node(b)) => a == b,
            (Tree::Array(a), Tree::Array(b)) => a == b,
            _ => self.size() == other.size() && self.pairs().eq(other.pairs()),
        }
    }
}

impl<T: Eq> Eq for Tree<T> {}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Empty => f.write_str("Empty"),
            Tree::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Tree::Array(array) => f.debug_tuple("Array").field(array).finish(),
        }
    }
}

/// Nested form, e.g. `a(b(d,e),c)`. The empty tree prints nothing.
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Empty => Ok(()),
            Tree::Node(node) => node.write_nested(f, |f, value| write!(f, "{}", value)),
            Tree::Array(array) => array.write_nested(f, |f, value| write!(f, "{}", value)),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Tree;

    impl<T: Serialize> Serialize for Tree<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.size()))?;
            for pair in self.pairs() {
                seq.serialize_element(&pair)?;
            }
            seq.end()
        }
    }

    impl<'de, T: Deserialize<'de> + Clone> Deserialize<'de> for Tree<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let pairs = Vec::<(usize, T)>::deserialize(deserializer)?;
            Tree::from_pairs(pairs).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree<char> {
        Tree::node(
            'a',
            vec![Tree::node('b', vec![Tree::leaf('d'), Tree::leaf('e')]), Tree::leaf('c')],
        )
    }

    #[test]
    fn representations_compare_equal() {
        let node = sample();
        let array = node.deflated();
        assert!(matches!(array, Tree::Array(_)));
        assert_eq!(node, array);
        assert_eq!(array.inflated(), node);
        assert_ne!(node, Tree::leaf('a'));
    }

    #[test]
    fn empty_properties() {
        let empty = Tree::<u8>::empty();
        assert_eq!((empty.size(), empty.width(), empty.height()), (0, 0, 0));
        assert!(empty.value().is_none());
        assert!(empty.to_structure_array().is_empty());
    }

    #[test]
    fn display_is_nested() {
        assert_eq!(sample().to_string(), "a(b(d,e),c)");
        assert_eq!(sample().deflated().to_string(), "a(b(d,e),c)");
    }

    #[test]
    fn inflate_smaller_side() {
        let big = sample();
        let small = Tree::leaf('a').deflated();
        assert!(prefer_inflated(&big, &small));
        assert!(!prefer_inflated(&big.deflated(), &Tree::leaf('a')));
        assert!(prefer_inflated(&small, &big));
    }

    #[test]
    fn single_tree_decoders_reject_forests() {
        assert_eq!(
            Tree::from_arrays(vec![0, 0], vec!['a', 'b']),
            Err(crate::TreeError::Forest { count: 2 })
        );
        assert_eq!(Tree::<char>::from_pairs(Vec::new()), Ok(Tree::Empty));
        assert_eq!(
            Tree::forest_from_arrays(Vec::new(), Vec::<char>::new()),
            Ok(vec![Tree::Empty])
        );
    }

    #[test]
    fn linear_builds_a_chain() {
        let tree = Tree::linear(['a', 'b', 'c']);
        assert_eq!(tree.to_string(), "a(b(c))");
        assert_eq!(tree.height(), 3);
        assert!(Tree::<char>::linear([]).is_empty());
    }
}
