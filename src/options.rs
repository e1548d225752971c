//! Edit configuration shared by every path-guided mutator

/// Controls how a mutator navigates and places children.
///
/// The keep-distinct and lax families are the same algorithms; only the
/// `keep_distinct` flag differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditOptions {
    /// Merge a new child into an existing sibling holding the same value
    /// instead of adding a duplicate.
    pub keep_distinct: bool,

    /// Add new children after existing ones (`false` prepends).
    pub append: bool,

    /// When several children match a path item, follow the last one.
    pub rightmost: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            keep_distinct: true,
            append: true,
            rightmost: false,
        }
    }
}

impl EditOptions {
    /// Keep children distinct, append, follow the leftmost match.
    pub fn distinct() -> Self {
        Self::default()
    }

    /// Waive child distinctness; inserts are plain appends.
    pub fn lax() -> Self {
        Self {
            keep_distinct: false,
            ..Self::default()
        }
    }

    /// Set the distinctness policy.
    pub fn with_keep_distinct(mut self, keep_distinct: bool) -> Self {
        self.keep_distinct = keep_distinct;
        self
    }

    /// Set whether new children go last (`true`) or first (`false`).
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Set the tie-break used when several children match a path item.
    pub fn with_rightmost(mut self, rightmost: bool) -> Self {
        self.rightmost = rightmost;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        let options = EditOptions::lax().with_append(false).with_rightmost(true);
        assert!(!options.keep_distinct);
        assert!(!options.append);
        assert!(options.rightmost);
        assert_eq!(EditOptions::distinct(), EditOptions::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_implement_serde() {
        fn assert_serde<S: serde::Serialize + serde::de::DeserializeOwned>() {}
        assert_serde::<EditOptions>();
    }
}
