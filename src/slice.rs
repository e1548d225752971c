//! Fixed-length shared sequences
//!
//! A [`Slice`] is a window over reference-counted storage. Sub-range views and
//! `drop_last` never copy; [`Slice::to_vec`] is the explicit detach.

use std::fmt;
use std::ops::{Deref, Range};
use std::rc::Rc;

/// Immutable random-access window over shared storage.
pub struct Slice<T> {
    data: Rc<[T]>,
    start: usize,
    end: usize,
}

impl<T> Slice<T> {
    /// Take ownership of a vector as the backing storage.
    pub fn from_vec(values: Vec<T>) -> Self {
        let end = values.len();
        Self {
            data: Rc::from(values),
            start: 0,
            end,
        }
    }

    /// Empty slice.
    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Number of elements visible through this window.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow the visible elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.start..self.end]
    }

    /// Sub-range view relative to this window, sharing the storage.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Self {
        assert!(
            range.start <= range.end && range.end <= self.len(),
            "range {:?} out of bounds for slice of length {}",
            range,
            self.len()
        );
        Self {
            data: Rc::clone(&self.data),
            start: self.start + range.start,
            end: self.start + range.end,
        }
    }

    /// View without the last `n` elements.
    pub fn drop_last(&self, n: usize) -> Self {
        let keep = self.len().saturating_sub(n);
        self.slice(0..keep)
    }

    /// Whether both windows read the same backing storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Clone> Slice<T> {
    /// Copy the visible elements into a fresh growable buffer.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            data: Rc::clone(&self.data),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T> Deref for Slice<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> From<Vec<T>> for Slice<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: fmt::Debug> fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
