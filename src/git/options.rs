//! git::options
//!
//! Typed option sets, one per operation that accepts flags.
//!
//! # Flag construction
//!
//! Every option set appends its flags in a fixed, documented order:
//!
//! - Boolean options add a flag only when `true`; a `false` option never
//!   produces a token.
//! - Value options add the flag and its value as two separate tokens
//!   (`-C <commit>`), except where git's convention embeds the value in the
//!   flag (`--pretty=<fmt>`, `-<count>`, `--skip=<n>`).
//!
//! Option sets are validated before any process is spawned. The only
//! cross-option rule today is checkout's `-b`/`-B` exclusion.
//!
//! # Example
//!
//! ```
//! use ply_git::git::{CommandOptions, LogOptions};
//!
//! let opts = LogOptions::new().pretty("oneline").count(3).skip(2);
//! let mut args = Vec::new();
//! opts.push_flags(&mut args)?;
//! assert_eq!(args, vec!["--pretty=oneline", "-3", "--skip=2"]);
//! # Ok::<(), ply_git::git::GitError>(())
//! ```

use std::ffi::OsString;

use super::error::GitError;

/// Shared behavior of per-operation option sets.
pub trait CommandOptions {
    /// Reject invalid option combinations.
    ///
    /// Called before the argument vector is built, so a failure here means
    /// no process was spawned.
    fn validate(&self) -> Result<(), GitError> {
        Ok(())
    }

    /// Append this option set's flags to `args`, in documented order.
    ///
    /// # Errors
    ///
    /// Fails with the same error as [`CommandOptions::validate`]; `args` is
    /// left untouched in that case.
    fn push_flags(&self, args: &mut Vec<OsString>) -> Result<(), GitError>;
}

/// Options for `git am`.
///
/// Flag order: `--3way`, `--resolved`, `-q`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmOptions {
    /// Fall back to a 3-way merge when the patch does not apply (`--3way`).
    pub three_way_merge: bool,
    /// Resume after a conflict was resolved by hand (`--resolved`).
    pub resolved: bool,
    /// Suppress output (`-q`).
    pub quiet: bool,
}

impl AmOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `--3way`.
    pub fn three_way_merge(mut self, yes: bool) -> Self {
        self.three_way_merge = yes;
        self
    }

    /// Set `--resolved`.
    pub fn resolved(mut self, yes: bool) -> Self {
        self.resolved = yes;
        self
    }

    /// Set `-q`.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }
}

impl CommandOptions for AmOptions {
    fn push_flags(&self, args: &mut Vec<OsString>) -> Result<(), GitError> {
        if self.three_way_merge {
            args.push("--3way".into());
        }
        if self.resolved {
            args.push("--resolved".into());
        }
        if self.quiet {
            args.push("-q".into());
        }
        Ok(())
    }
}

/// How `git checkout` treats the named branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    /// Switch to an existing branch.
    Existing,
    /// Create a new branch (`-b`).
    Create,
    /// Create the branch, or reset it if it exists (`-B`).
    CreateOrReset,
}

/// Options for `git checkout`.
///
/// `create` and `create_and_reset` are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutOptions {
    /// Create a new branch (`-b`).
    pub create: bool,
    /// Create or reset the branch (`-B`).
    pub create_and_reset: bool,
}

impl CheckoutOptions {
    /// Create an empty option set (switch to an existing branch).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `-b`.
    pub fn create(mut self, yes: bool) -> Self {
        self.create = yes;
        self
    }

    /// Set `-B`.
    pub fn create_and_reset(mut self, yes: bool) -> Self {
        self.create_and_reset = yes;
        self
    }

    /// Resolve the requested mode.
    ///
    /// # Errors
    ///
    /// [`GitError::ConflictingOptions`] if both creation modes are set.
    ///
    /// # Example
    ///
    /// ```
    /// use ply_git::git::{CheckoutMode, CheckoutOptions};
    ///
    /// let opts = CheckoutOptions::new().create(true);
    /// assert_eq!(opts.mode().unwrap(), CheckoutMode::Create);
    ///
    /// let both = CheckoutOptions::new().create(true).create_and_reset(true);
    /// assert!(both.mode().is_err());
    /// ```
    pub fn mode(&self) -> Result<CheckoutMode, GitError> {
        match (self.create, self.create_and_reset) {
            (true, true) => Err(GitError::ConflictingOptions {
                options: "create and create_and_reset".to_string(),
            }),
            (true, false) => Ok(CheckoutMode::Create),
            (false, true) => Ok(CheckoutMode::CreateOrReset),
            (false, false) => Ok(CheckoutMode::Existing),
        }
    }
}

impl From<CheckoutMode> for CheckoutOptions {
    fn from(mode: CheckoutMode) -> Self {
        match mode {
            CheckoutMode::Existing => Self::new(),
            CheckoutMode::Create => Self::new().create(true),
            CheckoutMode::CreateOrReset => Self::new().create_and_reset(true),
        }
    }
}

impl CommandOptions for CheckoutOptions {
    fn validate(&self) -> Result<(), GitError> {
        self.mode().map(|_| ())
    }

    fn push_flags(&self, args: &mut Vec<OsString>) -> Result<(), GitError> {
        match self.mode()? {
            CheckoutMode::Create => args.push("-b".into()),
            CheckoutMode::CreateOrReset => args.push("-B".into()),
            CheckoutMode::Existing => {}
        }
        Ok(())
    }
}

/// Options for `git commit`.
///
/// The message is passed separately; these flags follow `-m <msg>` in the
/// order `-a`, `--amend`, `-C <commit>`, `-q`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Stage all tracked changes first (`-a`).
    pub all: bool,
    /// Rewrite the previous commit (`--amend`).
    pub amend: bool,
    /// Reuse the message and authorship of an existing commit (`-C <commit>`).
    pub use_commit_object: Option<String>,
    /// Suppress output (`-q`).
    pub quiet: bool,
}

impl CommitOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `-a`.
    pub fn all(mut self, yes: bool) -> Self {
        self.all = yes;
        self
    }

    /// Set `--amend`.
    pub fn amend(mut self, yes: bool) -> Self {
        self.amend = yes;
        self
    }

    /// Set `-C <commit>`.
    pub fn use_commit_object(mut self, commit: impl Into<String>) -> Self {
        self.use_commit_object = Some(commit.into());
        self
    }

    /// Set `-q`.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }
}

impl CommandOptions for CommitOptions {
    fn push_flags(&self, args: &mut Vec<OsString>) -> Result<(), GitError> {
        if self.all {
            args.push("-a".into());
        }
        if self.amend {
            args.push("--amend".into());
        }
        if let Some(commit) = self.use_commit_object.as_deref().filter(|c| !c.is_empty()) {
            args.push("-C".into());
            args.push(commit.into());
        }
        if self.quiet {
            args.push("-q".into());
        }
        Ok(())
    }
}

/// Options for `git init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Suppress output (`-q`).
    pub quiet: bool,
}

impl InitOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `-q`.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }
}

impl CommandOptions for InitOptions {
    fn push_flags(&self, args: &mut Vec<OsString>) -> Result<(), GitError> {
        if self.quiet {
            args.push("-q".into());
        }
        Ok(())
    }
}

/// Options for `git log`.
///
/// Flag order: `--pretty=<fmt>`, `-<count>`, `--skip=<n>`, then the
/// optional trailing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Output format (`--pretty=<fmt>`), e.g. `oneline` or `format:%H`.
    pub pretty: Option<String>,
    /// Limit to the N most recent entries (`-<n>`).
    pub count: Option<u32>,
    /// Skip this many entries before output starts (`--skip=<n>`).
    pub skip: Option<u32>,
    /// Trailing positional filter: a revision, range, or path.
    pub filter: Option<String>,
}

impl LogOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `--pretty=<fmt>`.
    pub fn pretty(mut self, format: impl Into<String>) -> Self {
        self.pretty = Some(format.into());
        self
    }

    /// Set `-<n>`.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Set `--skip=<n>`.
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set the trailing revision or path filter.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// The trailing positional, if one was given and is non-empty.
    pub(crate) fn positional(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }
}

impl CommandOptions for LogOptions {
    fn push_flags(&self, args: &mut Vec<OsString>) -> Result<(), GitError> {
        if let Some(pretty) = self.pretty.as_deref().filter(|p| !p.is_empty()) {
            args.push(format!("--pretty={pretty}").into());
        }
        if let Some(count) = self.count {
            args.push(format!("-{count}").into());
        }
        if let Some(skip) = self.skip {
            args.push(format!("--skip={skip}").into());
        }
        Ok(())
    }
}

/// Options for `git reset`.
///
/// Flag order: `--hard`, `-q`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetOptions {
    /// Discard working tree changes (`--hard`).
    pub hard: bool,
    /// Suppress output (`-q`).
    pub quiet: bool,
}

impl ResetOptions {
    /// Create an empty option set (a mixed reset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `--hard`.
    pub fn hard(mut self, yes: bool) -> Self {
        self.hard = yes;
        self
    }

    /// Set `-q`.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }
}

impl CommandOptions for ResetOptions {
    fn push_flags(&self, args: &mut Vec<OsString>) -> Result<(), GitError> {
        if self.hard {
            args.push("--hard".into());
        }
        if self.quiet {
            args.push("-q".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(opts: &impl CommandOptions) -> Vec<String> {
        let mut args = Vec::new();
        opts.push_flags(&mut args).unwrap();
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn defaults_produce_no_flags() {
        assert!(flags(&AmOptions::new()).is_empty());
        assert!(flags(&CheckoutOptions::new()).is_empty());
        assert!(flags(&CommitOptions::new()).is_empty());
        assert!(flags(&InitOptions::new()).is_empty());
        assert!(flags(&LogOptions::new()).is_empty());
        assert!(flags(&ResetOptions::new()).is_empty());
    }

    #[test]
    fn am_flag_order() {
        let opts = AmOptions::new().quiet(true).resolved(true).three_way_merge(true);
        assert_eq!(flags(&opts), vec!["--3way", "--resolved", "-q"]);
    }

    #[test]
    fn checkout_create_uses_lowercase_b() {
        assert_eq!(flags(&CheckoutOptions::new().create(true)), vec!["-b"]);
        assert_eq!(
            flags(&CheckoutOptions::new().create_and_reset(true)),
            vec!["-B"]
        );
    }

    #[test]
    fn checkout_conflict_fails_validation() {
        let opts = CheckoutOptions {
            create: true,
            create_and_reset: true,
        };
        let err = opts.validate().unwrap_err();
        assert!(err.is_conflicting_options());
    }

    #[test]
    fn checkout_conflict_refuses_to_build_flags() {
        let opts = CheckoutOptions::new().create(true).create_and_reset(true);
        let mut args = vec![OsString::from("checkout")];
        let err = opts.push_flags(&mut args).unwrap_err();
        assert!(err.is_conflicting_options());
        assert_eq!(args, vec![OsString::from("checkout")]);
    }

    #[test]
    fn checkout_mode_roundtrips_through_options() {
        for mode in [
            CheckoutMode::Existing,
            CheckoutMode::Create,
            CheckoutMode::CreateOrReset,
        ] {
            assert_eq!(CheckoutOptions::from(mode).mode().unwrap(), mode);
        }
    }

    #[test]
    fn commit_value_flag_is_two_tokens() {
        let opts = CommitOptions::new()
            .quiet(true)
            .use_commit_object("abc123")
            .amend(true)
            .all(true);
        assert_eq!(flags(&opts), vec!["-a", "--amend", "-C", "abc123", "-q"]);
    }

    #[test]
    fn log_embeds_values_in_flags() {
        let opts = LogOptions::new().skip(2).count(3).pretty("oneline");
        assert_eq!(flags(&opts), vec!["--pretty=oneline", "-3", "--skip=2"]);
    }

    #[test]
    fn log_count_zero_is_still_rendered() {
        assert_eq!(flags(&LogOptions::new().count(0)), vec!["-0"]);
    }

    #[test]
    fn log_empty_filter_is_dropped() {
        assert_eq!(LogOptions::new().filter("").positional(), None);
        assert_eq!(
            LogOptions::new().filter("main").positional(),
            Some("main")
        );
    }

    #[test]
    fn reset_flag_order() {
        let opts = ResetOptions::new().quiet(true).hard(true);
        assert_eq!(flags(&opts), vec!["--hard", "-q"]);
    }

    #[test]
    fn init_quiet() {
        assert_eq!(flags(&InitOptions::new().quiet(true)), vec!["-q"]);
    }
}
