//! git::operation
//!
//! The fixed set of git subcommands modeled by this crate.

use std::fmt;

/// A modeled git subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `git add`
    Add,
    /// `git am`
    Am,
    /// `git checkout`
    Checkout,
    /// `git commit`
    Commit,
    /// `git format-patch`
    FormatPatch,
    /// `git init`
    Init,
    /// `git log`
    Log,
    /// `git reset`
    Reset,
}

impl Operation {
    /// Every modeled operation, in alphabetical order.
    pub const ALL: [Operation; 8] = [
        Operation::Add,
        Operation::Am,
        Operation::Checkout,
        Operation::Commit,
        Operation::FormatPatch,
        Operation::Init,
        Operation::Log,
        Operation::Reset,
    ];

    /// The subcommand token passed to git.
    ///
    /// # Example
    ///
    /// ```
    /// use ply_git::git::Operation;
    ///
    /// assert_eq!(Operation::FormatPatch.subcommand(), "format-patch");
    /// ```
    pub fn subcommand(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Am => "am",
            Operation::Checkout => "checkout",
            Operation::Commit => "commit",
            Operation::FormatPatch => "format-patch",
            Operation::Init => "init",
            Operation::Log => "log",
            Operation::Reset => "reset",
        }
    }

    /// Whether the operation captures stdout/stderr and returns a value.
    ///
    /// Non-capturing operations inherit the caller's stdio.
    pub fn captures_output(self) -> bool {
        matches!(self, Operation::FormatPatch | Operation::Log)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_format_patch_and_log_capture() {
        let capturing: Vec<_> = Operation::ALL
            .iter()
            .filter(|op| op.captures_output())
            .copied()
            .collect();
        assert_eq!(capturing, vec![Operation::FormatPatch, Operation::Log]);
    }

    #[test]
    fn subcommands_are_distinct() {
        let mut names: Vec<_> = Operation::ALL.iter().map(|op| op.subcommand()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn display_matches_subcommand() {
        assert_eq!(Operation::Checkout.to_string(), "checkout");
    }
}
