//! ply-git - typed calls for the git command line
//!
//! A small command layer over the `git` binary. It exposes eight
//! subcommands (add, am, checkout, commit, format-patch, init, log, reset)
//! as typed calls with validated option sets, and a [`git::Repo`] that binds
//! those calls to one repository directory.
//!
//! # Architecture
//!
//! - [`git`] - Command layer, repo facade, and the process-spawn seam
//! - [`config`] - Which git binary to run and with what environment
//!
//! # Concurrency
//!
//! Every call blocks the calling thread until git exits; there is no
//! timeout and no retry. Bound calls pass their directory to the child
//! process, so `Repo`s are safe to use from several threads. Only
//! [`git::ScopedDir`] touches the process working directory, and it
//! serializes on a process-wide mutex.

pub mod config;
pub mod git;
