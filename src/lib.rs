//! # Ordered trees in two representations
//!
//! A [`Tree`] is either empty, a pointer-linked [`NodeTree`] or a linearised
//! [`ArrayTree`]. Both representations answer the same queries and accept the
//! same path-guided edits; the façade picks which one does the work.
//!
//! ## Linearisation
//!
//! A tree linearises to post-order `(child_count, value)` pairs: each node
//! follows its children, children appear left to right, the root is last.
//! `a(b(d, e), c)` becomes
//!
//! ```text
//! (0,d) (0,e) (2,b) (0,c) (2,a)
//! ```
//!
//! An [`ArrayTree`] keeps the two columns as shared slices, so subtrees are
//! sub-range views. A [`MutableArrayTree`] owns growable copies and splices
//! blocks in place.
//!
//! ## Usage Example
//!
//! ```
//! use ordtree::{EditOptions, Tree};
//!
//! let tree = Tree::from_pairs(vec![(0, 'd'), (0, 'e'), (2, 'b'), (0, 'c'), (2, 'a')])?;
//! let grown = tree.insert_value_at(&['a', 'c'], 'f', EditOptions::default());
//! assert_eq!(grown.to_string(), "a(b(d,e),c(f))");
//! assert_eq!(grown.deflated().show_as_paths(), "a/b/d\na/b/e\na/c/f");
//! # Ok::<(), ordtree::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod array;
pub mod builder;
pub mod codec;
pub mod node;
pub mod options;
pub mod outcome;
pub mod render;
pub mod slice;
pub mod tree;

pub use array::{ArrayTree, MutableArrayTree};
pub use builder::{from_size_and_tree_pairs, from_size_and_value_pairs, TreeMergeStrategy};
pub use node::NodeTree;
pub use options::EditOptions;
pub use outcome::Outcome;
pub use render::Style;
pub use slice::Slice;
pub use tree::{prefer_inflated, Tree};

use thiserror::Error;

/// Errors raised while decoding linearised trees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node declares more children than precede it.
    #[error("invalid encoding: entry {index} declares {declared} children but the encoding runs out")]
    InvalidEncoding {
        /// Position of the offending entry.
        index: usize,
        /// Child count it declares.
        declared: usize,
    },

    /// Structure and content arrays differ in length.
    #[error("length mismatch: {structure} structure entries, {content} values")]
    LengthMismatch {
        /// Length of the structure array.
        structure: usize,
        /// Length of the content array.
        content: usize,
    },

    /// A single tree was expected but the encoding holds several.
    #[error("expected one tree, found a forest of {count}")]
    Forest {
        /// Number of trees found.
        count: usize,
    },
}

/// Result type used throughout the crate
pub type Result<T, E = TreeError> = std::result::Result<T, E>;
