//! git::mock
//!
//! Recording runner for deterministic testing.
//!
//! # Design
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every invocation it receives and answers with queued outputs,
//! falling back to a successful, empty result once the queue is drained.
//! The spawn count doubles as proof that validation failures never reach
//! the process layer.
//!
//! # Example
//!
//! ```
//! use ply_git::git::mock::MockRunner;
//! use ply_git::git::{Git, ProcessOutput};
//!
//! let runner = MockRunner::new();
//! runner.push_output(ProcessOutput::success("0001-a.patch\n"));
//!
//! let git = Git::with_runner(&runner);
//! let patches = git.format_patch("HEAD~1").unwrap();
//!
//! assert_eq!(patches, vec!["0001-a.patch"]);
//! assert_eq!(runner.spawn_count(), 1);
//! assert_eq!(runner.last_argv().unwrap(), vec!["git", "format-patch", "HEAD~1"]);
//! ```

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use super::invocation::Invocation;
use super::runner::{CommandRunner, ProcessOutput, ProcessStatus};

/// Mock runner for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    /// Every invocation received, in order.
    calls: Vec<Invocation>,
    /// Scripted results, consumed front to back.
    outputs: VecDeque<Result<ProcessOutput, io::ErrorKind>>,
}

impl MockRunner {
    /// Create a runner whose every call succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockRunnerInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue the result of the next unanswered call.
    pub fn push_output(&self, output: ProcessOutput) {
        self.lock().outputs.push_back(Ok(output));
    }

    /// Queue an exit code with no output for the next unanswered call.
    pub fn push_exit_code(&self, code: i32) {
        self.push_output(ProcessOutput::with_code(code, Vec::new(), Vec::new()));
    }

    /// Queue a spawn failure for the next unanswered call.
    pub fn push_spawn_error(&self, kind: io::ErrorKind) {
        self.lock().outputs.push_back(Err(kind));
    }

    /// Number of processes that would have been spawned.
    pub fn spawn_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// All recorded invocations.
    pub fn calls(&self) -> Vec<Invocation> {
        self.lock().calls.clone()
    }

    /// The most recent invocation.
    pub fn last_call(&self) -> Option<Invocation> {
        self.lock().calls.last().cloned()
    }

    /// The argument vector of the most recent invocation.
    pub fn last_argv(&self) -> Option<Vec<String>> {
        self.last_call().map(|call| call.argv())
    }

    fn answer(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let mut inner = self.lock();
        inner.calls.push(invocation.clone());
        match inner.outputs.pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(kind)) => Err(io::Error::new(kind, "mock spawn failure")),
            None => Ok(ProcessOutput::success(Vec::new())),
        }
    }
}

impl CommandRunner for MockRunner {
    fn status(&self, invocation: &Invocation) -> io::Result<ProcessStatus> {
        self.answer(invocation).map(|output| output.status)
    }

    fn output(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.answer(invocation)
    }
}
