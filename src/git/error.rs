//! git::error
//!
//! Error taxonomy for the command layer.
//!
//! # Categories
//!
//! - [`GitError::ConflictingOptions`]: mutually exclusive options were
//!   requested; raised before any process is spawned
//! - [`GitError::PatchDidNotApplyCleanly`]: `git am` exited non-zero
//! - [`GitError::CommandFailed`]: a capturing command (`format-patch`, `log`)
//!   exited non-zero; carries the exit code and both output streams
//! - [`GitError::ProcessFailed`]: a non-capturing command exited non-zero
//!
//! The remaining variants cover failures around the process itself
//! (spawning, resolving a repo path, switching directories).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from git command execution.
#[derive(Debug, Error)]
pub enum GitError {
    /// Mutually exclusive options were requested together.
    #[error("mutually incompatible options: {options}")]
    ConflictingOptions {
        /// The options that cannot be combined
        options: String,
    },

    /// `git am` could not apply the patch series.
    ///
    /// The exit status is intentionally not preserved; any non-zero exit
    /// from `am` maps here.
    #[error("patch did not apply cleanly")]
    PatchDidNotApplyCleanly,

    /// A capturing command exited non-zero.
    #[error("{}", describe_failure(.code, .stderr))]
    CommandFailed {
        /// Exit code, or `None` if the process was killed by a signal
        code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// A non-capturing command exited non-zero.
    #[error("command '{command}' returned non-zero exit status {}", format_code(.code))]
    ProcessFailed {
        /// The full command line, for diagnostics
        command: String,
        /// Exit code, or `None` if the process was killed by a signal
        code: Option<i32>,
    },

    /// The external tool could not be launched.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// The program that was spawned
        program: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// A repository path could not be resolved.
    #[error("cannot resolve repository path '{}': {source}", .path.display())]
    InvalidPath {
        /// The path as given by the caller
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The process working directory could not be switched.
    #[error("cannot change directory to '{}': {source}", .path.display())]
    DirectoryChange {
        /// The directory that could not be entered
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },
}

impl GitError {
    /// Whether this is the `am` patch-application failure.
    pub fn is_patch_conflict(&self) -> bool {
        matches!(self, GitError::PatchDidNotApplyCleanly)
    }

    /// Whether this error was raised for mutually exclusive options.
    pub fn is_conflicting_options(&self) -> bool {
        matches!(self, GitError::ConflictingOptions { .. })
    }

    /// The exit code of the failed process, if this error carries one.
    ///
    /// # Example
    ///
    /// ```
    /// use ply_git::git::GitError;
    ///
    /// let err = GitError::ProcessFailed { command: "git add x".into(), code: Some(128) };
    /// assert_eq!(err.exit_code(), Some(128));
    /// assert_eq!(GitError::PatchDidNotApplyCleanly.exit_code(), None);
    /// ```
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GitError::CommandFailed { code, .. } | GitError::ProcessFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "(terminated by signal)".to_string(),
    }
}

fn describe_failure(code: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("git exited with status {}", format_code(code))
    } else {
        format!("git exited with status {}: {}", format_code(code), stderr)
    }
}
