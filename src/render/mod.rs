//! Branch-oriented string rendering

use std::fmt::Display;

use crate::tree::Tree;

/// Canned rendering layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `[a,b,d],[a,b,e],[a,c]`
    Arrays,
    /// One line per branch, `a > b > d`
    Graph,
    /// One line per branch, `a/b/d`
    Paths,
    /// Nested form, `a(b(d,e),c)`
    Nested,
}

impl<T> Tree<T> {
    /// Render every branch, cut at `max_depth` levels.
    ///
    /// Each branch is `branch_start`, its values shown with `show` and
    /// joined by `value_sep`, then `branch_end`; branches are joined by
    /// `branch_sep`.
    pub fn mk_string_from_branches<F>(
        &self,
        show: F,
        value_sep: &str,
        branch_start: &str,
        branch_end: &str,
        branch_sep: &str,
        max_depth: usize,
    ) -> String
    where
        F: Fn(&T) -> String,
    {
        let mut out = String::new();
        for (idx, branch) in self.branches_with_max_depth(max_depth).iter().enumerate() {
            if idx > 0 {
                out.push_str(branch_sep);
            }
            out.push_str(branch_start);
            for (pos, value) in branch.iter().enumerate() {
                if pos > 0 {
                    out.push_str(value_sep);
                }
                out.push_str(&show(value));
            }
            out.push_str(branch_end);
        }
        out
    }
}

impl<T: Display> Tree<T> {
    /// `[a,b,d],[a,b,e],[a,c]`
    pub fn show_as_arrays(&self) -> String {
        self.mk_string_from_branches(ToString::to_string, ",", "[", "]", ",", usize::MAX)
    }

    /// `a > b > d`, one branch per line.
    pub fn show_as_graph(&self) -> String {
        self.mk_string_from_branches(ToString::to_string, " > ", "", "", "\n", usize::MAX)
    }

    /// `a/b/d`, one branch per line.
    pub fn show_as_paths(&self) -> String {
        self.mk_string_from_branches(ToString::to_string, "/", "", "", "\n", usize::MAX)
    }

    /// Render with a canned style, cut at `max_depth` levels.
    pub fn render(&self, style: Style, max_depth: usize) -> String {
        let show = |value: &T| value.to_string();
        match style {
            Style::Arrays => self.mk_string_from_branches(show, ",", "[", "]", ",", max_depth),
            Style::Graph => self.mk_string_from_branches(show, " > ", "", "", "\n", max_depth),
            Style::Paths => self.mk_string_from_branches(show, "/", "", "", "\n", max_depth),
            Style::Nested => self.to_string(),
        }
    }
}
