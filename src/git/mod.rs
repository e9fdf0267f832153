//! git
//!
//! Typed calls for a fixed set of git subcommands.
//!
//! # Architecture
//!
//! The module has two layers:
//!
//! - **Command layer** ([`Git`] and the free functions in [`commands`]):
//!   validates an operation's options, builds the argument vector, runs git,
//!   and classifies the outcome.
//! - **Repo facade** ([`Repo`]): binds the command layer to one repository
//!   path so callers never manage the working directory.
//!
//! All process spawning goes through the [`CommandRunner`] trait, which is
//! the seam tests use to observe argument vectors.
//!
//! # Supported operations
//!
//! `add`, `am`, `checkout`, `commit`, `format-patch`, `init`, `log`, `reset`.
//! Only the flags modeled by the option types in [`options`] are exposed.
//!
//! # Invariants
//!
//! - Argument vectors read `[program, subcommand, flags..., positionals...]`
//! - A `false` boolean option never produces a flag
//! - Invalid option combinations fail before any process is spawned
//! - Bound commands pass their directory to the child; the process working
//!   directory only changes through an explicit [`ScopedDir`]
//!
//! # Example
//!
//! ```no_run
//! use ply_git::git::{AmOptions, GitError, Repo};
//!
//! let repo = Repo::new("/path/to/repo")?;
//! let patches = repo.format_patch("origin/main")?;
//!
//! match repo.am(&patches, &AmOptions::new().three_way_merge(true)) {
//!     Ok(()) => println!("applied {} patches", patches.len()),
//!     Err(GitError::PatchDidNotApplyCleanly) => println!("resolve conflicts, then am --resolved"),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), GitError>(())
//! ```

pub mod commands;
mod error;
mod invocation;
pub mod mock;
mod operation;
pub mod options;
mod repo;
mod runner;
mod scoped_dir;

pub use commands::{add, am, checkout, commit, format_patch, init, log, reset, Git};
pub use error::GitError;
pub use invocation::Invocation;
pub use operation::Operation;
pub use options::{
    AmOptions, CheckoutMode, CheckoutOptions, CommandOptions, CommitOptions, InitOptions,
    LogOptions, ResetOptions,
};
pub use repo::Repo;
pub use runner::{CommandRunner, ProcessOutput, ProcessStatus, SystemRunner};
pub use scoped_dir::ScopedDir;
