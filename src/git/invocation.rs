//! git::invocation
//!
//! A fully built git command line.
//!
//! An [`Invocation`] is constructed fresh for every call and discarded after
//! the process exits. Its argument vector always reads
//! `[program, subcommand, flags..., positionals...]`.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::operation::Operation;

/// One git process to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    operation: Operation,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

impl Invocation {
    /// Start an invocation of `operation` using `program`.
    pub fn new(program: impl Into<OsString>, operation: Operation) -> Self {
        Self {
            program: program.into(),
            operation,
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
        }
    }

    /// Append one argument after the subcommand.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments after the subcommand.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run in `dir` instead of the caller's working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// The program to spawn.
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// The git subcommand.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Every token passed to the OS after the program name.
    pub fn process_args(&self) -> impl Iterator<Item = &OsStr> {
        std::iter::once(OsStr::new(self.operation.subcommand()))
            .chain(self.args.iter().map(OsString::as_os_str))
    }

    /// The working directory, if one was set explicitly.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Environment overrides, in insertion order.
    pub fn envs(&self) -> &[(OsString, OsString)] {
        &self.envs
    }

    /// The full argument vector, starting with the program name.
    ///
    /// Non-UTF-8 tokens are converted lossily; use [`Invocation::process_args`]
    /// for the exact values.
    ///
    /// # Example
    ///
    /// ```
    /// use ply_git::git::{Invocation, Operation};
    ///
    /// let inv = Invocation::new("git", Operation::Reset).arg("--hard").arg("HEAD~1");
    /// assert_eq!(inv.argv(), vec!["git", "reset", "--hard", "HEAD~1"]);
    /// ```
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.as_os_str())
            .chain(self.process_args())
            .map(|token| token.to_string_lossy().into_owned())
            .collect()
    }

    /// The argument vector joined with spaces, for messages.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}
