//! git::repo
//!
//! A git command layer bound to one repository directory.
//!
//! # Architecture
//!
//! `Repo` resolves its path once, at construction, and forwards every
//! operation to a [`Git`] bound to that path. The path reaches git as the
//! child process's working directory; the calling process's own working
//! directory is never read or changed by these methods. Two `Repo`s can
//! therefore be used from different threads at the same time.
//!
//! Callers that need the process itself inside the repository use
//! [`Repo::enter`], which returns a [`ScopedDir`] guard.
//!
//! # Example
//!
//! ```no_run
//! use ply_git::git::{CommitOptions, InitOptions, Repo};
//!
//! let repo = Repo::new("/path/to/repo")?;
//! repo.init(".", &InitOptions::new().quiet(true))?;
//! repo.add("README.md")?;
//! repo.commit(Some("Initial commit"), &CommitOptions::new().quiet(true))?;
//! # Ok::<(), ply_git::git::GitError>(())
//! ```

use std::path::{Path, PathBuf};

use super::commands::Git;
use super::error::GitError;
use super::options::{
    AmOptions, CheckoutOptions, CommitOptions, InitOptions, LogOptions, ResetOptions,
};
use super::runner::{CommandRunner, SystemRunner};
use super::scoped_dir::ScopedDir;
use crate::config::Config;

/// A git repository at a fixed path.
#[derive(Debug, Clone)]
pub struct Repo<R = SystemRunner> {
    path: PathBuf,
    git: Git<R>,
}

impl Repo<SystemRunner> {
    /// Bind the system `git` to `path`.
    ///
    /// # Errors
    ///
    /// [`GitError::InvalidPath`] if `path` does not exist or cannot be
    /// canonicalized.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, GitError> {
        Self::with_git(path, Git::new())
    }

    /// Bind the system `git` to `path` with explicit configuration.
    pub fn with_config(path: impl AsRef<Path>, config: Config) -> Result<Self, GitError> {
        Self::with_git(path, Git::new().with_config(config))
    }
}

impl<R: CommandRunner> Repo<R> {
    /// Bind an existing command layer to `path`.
    ///
    /// Any directory `git` was already bound to is replaced.
    pub fn with_git(path: impl AsRef<Path>, git: Git<R>) -> Result<Self, GitError> {
        let given = path.as_ref();
        let path = given.canonicalize().map_err(|e| GitError::InvalidPath {
            path: given.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            git: git.in_dir(path.clone()),
            path,
        })
    }

    /// The canonical repository path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bound command layer.
    pub fn git(&self) -> &Git<R> {
        &self.git
    }

    /// Switch the process working directory into the repository.
    ///
    /// See [`ScopedDir`] for the locking rules.
    pub fn enter(&self) -> Result<ScopedDir, GitError> {
        ScopedDir::enter(&self.path)
    }

    /// `git add` inside the repository.
    pub fn add(&self, filename: impl AsRef<Path>) -> Result<(), GitError> {
        self.git.add(filename)
    }

    /// `git am` inside the repository.
    pub fn am<I, P>(&self, patch_paths: I, options: &AmOptions) -> Result<(), GitError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.git.am(patch_paths, options)
    }

    /// `git checkout` inside the repository.
    pub fn checkout(&self, branch_name: &str, options: &CheckoutOptions) -> Result<(), GitError> {
        self.git.checkout(branch_name, options)
    }

    /// `git commit` inside the repository.
    ///
    /// Interactive when `msg` is `None`; see [`Git::commit`].
    pub fn commit(&self, msg: Option<&str>, options: &CommitOptions) -> Result<(), GitError> {
        self.git.commit(msg, options)
    }

    /// `git format-patch` inside the repository.
    ///
    /// Returned filenames are relative to [`Repo::path`].
    pub fn format_patch(&self, since: &str) -> Result<Vec<String>, GitError> {
        self.git.format_patch(since)
    }

    /// `git init` inside the repository.
    ///
    /// A relative `directory` is resolved against [`Repo::path`].
    pub fn init(&self, directory: impl AsRef<Path>, options: &InitOptions) -> Result<(), GitError> {
        self.git.init(directory, options)
    }

    /// `git log` inside the repository.
    pub fn log(&self, options: &LogOptions) -> Result<String, GitError> {
        self.git.log(options)
    }

    /// `git reset` inside the repository.
    pub fn reset(&self, commit: &str, options: &ResetOptions) -> Result<(), GitError> {
        self.git.reset(commit, options)
    }
}
