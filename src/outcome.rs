//! Result shape for edits that may leave the tree untouched

/// Either the edited value or the original returned unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The edit applied.
    Modified(T),
    /// The edit could not apply; this is the original value.
    Unchanged(T),
}

impl<T> Outcome<T> {
    /// Whether the edit applied.
    pub fn is_modified(&self) -> bool {
        matches!(self, Outcome::Modified(_))
    }

    /// Whether the original came back untouched.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Outcome::Unchanged(_))
    }

    /// The carried value regardless of variant.
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Modified(value) | Outcome::Unchanged(value) => value,
        }
    }

    /// Borrow the carried value.
    pub fn inner(&self) -> &T {
        match self {
            Outcome::Modified(value) | Outcome::Unchanged(value) => value,
        }
    }

    /// The edited value, if the edit applied.
    pub fn modified(self) -> Option<T> {
        match self {
            Outcome::Modified(value) => Some(value),
            Outcome::Unchanged(_) => None,
        }
    }

    /// Map the carried value, keeping the variant.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Modified(value) => Outcome::Modified(f(value)),
            Outcome::Unchanged(value) => Outcome::Unchanged(f(value)),
        }
    }

    /// Convert into a `Result`, with the untouched original as the error.
    pub fn into_result(self) -> Result<T, T> {
        match self {
            Outcome::Modified(value) => Ok(value),
            Outcome::Unchanged(value) => Err(value),
        }
    }
}
