//! git::scoped_dir
//!
//! Scoped switch of the process working directory.
//!
//! # Architecture
//!
//! The commands in this crate never need this: a bound [`Git`](super::Git)
//! or [`Repo`](super::Repo) hands its directory to the child process. The
//! guard exists for callers that must run cwd-relative code (the free
//! functions in [`commands`](super::commands), or their own file access)
//! inside a repository.
//!
//! # Invariants
//!
//! - The prior directory is restored when the guard drops, including
//!   during unwinding; a failed restore on drop is logged with `warn!`
//! - All guards in the process serialize on one mutex, so two threads
//!   never observe each other's switch
//! - Guards must not be nested on one thread; the second `enter` blocks
//!   forever
//!
//! # Example
//!
//! ```no_run
//! use ply_git::git::{self, ScopedDir};
//!
//! {
//!     let _dir = ScopedDir::enter("/path/to/repo")?;
//!     git::add("README.md")?;
//! }
//! // back in the original directory
//! # Ok::<(), ply_git::git::GitError>(())
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::error::GitError;

/// Serializes every working-directory switch in the process.
static CWD_LOCK: Mutex<()> = Mutex::new(());

/// A held working-directory switch.
///
/// The original directory is restored when this guard is dropped (RAII
/// pattern).
#[derive(Debug)]
pub struct ScopedDir {
    /// Directory that was current before the switch.
    original: PathBuf,
    /// Directory switched into.
    target: PathBuf,
    /// Set once restoration succeeded.
    restored: bool,
    /// Released after `drop` has restored the directory.
    _lock: MutexGuard<'static, ()>,
}

impl ScopedDir {
    /// Switch the process working directory to `dir`.
    ///
    /// Blocks while another guard is held anywhere in the process.
    ///
    /// # Errors
    ///
    /// [`GitError::DirectoryChange`] if the current directory cannot be
    /// read or `dir` cannot be entered. The working directory is unchanged
    /// in that case.
    pub fn enter(dir: impl AsRef<Path>) -> Result<Self, GitError> {
        let target = dir.as_ref().to_path_buf();
        let lock = CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let original = env::current_dir().map_err(|e| GitError::DirectoryChange {
            path: PathBuf::from("."),
            source: e,
        })?;

        env::set_current_dir(&target).map_err(|e| GitError::DirectoryChange {
            path: target.clone(),
            source: e,
        })?;

        debug!(from = %original.display(), to = %target.display(), "entered directory");
        Ok(Self {
            original,
            target,
            restored: false,
            _lock: lock,
        })
    }

    /// Run `f` with the working directory switched to `dir`.
    ///
    /// The directory is restored before this returns, whatever `f` returns
    /// and even if it panics.
    pub fn run<T>(dir: impl AsRef<Path>, f: impl FnOnce() -> T) -> Result<T, GitError> {
        let guard = Self::enter(dir)?;
        let value = f();
        guard.restore()?;
        Ok(value)
    }

    /// Directory that will be restored.
    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Directory currently entered.
    pub fn path(&self) -> &Path {
        &self.target
    }

    /// Restore the original directory now, reporting failure.
    ///
    /// Dropping the guard restores too, but can only log a failure.
    pub fn restore(mut self) -> Result<(), GitError> {
        env::set_current_dir(&self.original).map_err(|e| GitError::DirectoryChange {
            path: self.original.clone(),
            source: e,
        })?;
        self.restored = true;
        debug!(to = %self.original.display(), "restored directory");
        Ok(())
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        match env::set_current_dir(&self.original) {
            Ok(()) => debug!(to = %self.original.display(), "restored directory"),
            // The lock is released anyway; the process stays in `target`.
            Err(e) => warn!(
                path = %self.original.display(),
                stuck_in = %self.target.display(),
                error = %e,
                "failed to restore working directory"
            ),
        }
    }
}
