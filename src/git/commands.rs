//! git::commands
//!
//! The command layer: one method per modeled git subcommand.
//!
//! # Execution
//!
//! Each call validates its options, builds an [`Invocation`], and runs it
//! through the configured [`CommandRunner`]. Calls block until git exits.
//! Nothing is retried and no error is swallowed.
//!
//! # Result classification
//!
//! | Operation | non-zero exit |
//! |---|---|
//! | `am` | [`GitError::PatchDidNotApplyCleanly`] |
//! | `format_patch`, `log` | [`GitError::CommandFailed`] with code and output |
//! | everything else | [`GitError::ProcessFailed`] |
//!
//! # Working directory
//!
//! A [`Git`] built with [`Git::new`] runs git in the caller's current
//! directory. [`Git::in_dir`] binds it to a directory, which is passed to the
//! child process rather than applied to the calling process.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::GitError;
use super::invocation::Invocation;
use super::operation::Operation;
use super::options::{
    AmOptions, CheckoutOptions, CommandOptions, CommitOptions, InitOptions, LogOptions,
    ResetOptions,
};
use super::runner::{CommandRunner, SystemRunner};
use crate::config::Config;

/// Typed access to git subcommands.
#[derive(Debug, Clone)]
pub struct Git<R = SystemRunner> {
    runner: R,
    config: Config,
    work_dir: Option<PathBuf>,
}

impl Git<SystemRunner> {
    /// Run the system `git` in the current working directory.
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for Git<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> Git<R> {
    /// Use a custom runner with the default configuration.
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            config: Config::default(),
            work_dir: None,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Run every command in `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// The directory commands run in, if bound.
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Start an invocation carrying program, directory, and environment.
    fn invocation(&self, operation: Operation) -> Invocation {
        let mut invocation = Invocation::new(self.config.program(), operation);
        if let Some(dir) = &self.work_dir {
            invocation = invocation.current_dir(dir);
        }
        for (key, value) in self.config.env() {
            invocation = invocation.env(key, value);
        }
        invocation
    }

    /// Build an invocation from validated options, then positionals.
    fn build<O: CommandOptions>(
        &self,
        operation: Operation,
        leading: Vec<OsString>,
        options: &O,
        positionals: Vec<OsString>,
    ) -> Result<Invocation, GitError> {
        options.validate()?;
        let mut flags = leading;
        options.push_flags(&mut flags)?;
        Ok(self.invocation(operation).args(flags).args(positionals))
    }

    /// Run a non-capturing invocation; non-zero exit is `ProcessFailed`.
    fn check_status(&self, invocation: &Invocation) -> Result<(), GitError> {
        let status = self
            .runner
            .status(invocation)
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            return Ok(());
        }

        warn!(
            operation = %invocation.operation(),
            code = ?status.code(),
            "git command failed"
        );
        Err(GitError::ProcessFailed {
            command: invocation.command_line(),
            code: status.code(),
        })
    }

    /// Run a capturing invocation; non-zero exit is `CommandFailed`.
    fn check_output(&self, invocation: &Invocation) -> Result<String, GitError> {
        let output = self
            .runner
            .output(invocation)
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            return Ok(output.stdout_lossy());
        }

        let stderr = output.stderr_lossy();
        warn!(
            operation = %invocation.operation(),
            code = ?output.status.code(),
            stderr = %stderr.trim(),
            "git command failed"
        );
        Err(GitError::CommandFailed {
            code: output.status.code(),
            stdout: output.stdout_lossy(),
            stderr,
        })
    }

    fn spawn_error(&self, source: std::io::Error) -> GitError {
        GitError::Spawn {
            program: self.config.program().to_string(),
            source,
        }
    }

    /// Stage a file: `git add <filename>`.
    pub fn add(&self, filename: impl AsRef<Path>) -> Result<(), GitError> {
        let invocation = self
            .invocation(Operation::Add)
            .arg(filename.as_ref().as_os_str());
        self.check_status(&invocation)
    }

    /// Apply mailbox patches: `git am [--3way] [--resolved] [-q] <patch>...`.
    ///
    /// # Errors
    ///
    /// Any non-zero exit is reported as [`GitError::PatchDidNotApplyCleanly`];
    /// the exit code is not preserved. The repository is left mid-`am` and
    /// the caller decides whether to resolve or abort.
    pub fn am<I, P>(&self, patch_paths: I, options: &AmOptions) -> Result<(), GitError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let patches: Vec<OsString> = patch_paths
            .into_iter()
            .map(|p| p.as_ref().as_os_str().to_os_string())
            .collect();
        let invocation = self.build(Operation::Am, Vec::new(), options, patches)?;

        match self.check_status(&invocation) {
            Err(GitError::ProcessFailed { .. }) => Err(GitError::PatchDidNotApplyCleanly),
            other => other,
        }
    }

    /// Switch branches: `git checkout [-b | -B] <branch>`.
    ///
    /// # Errors
    ///
    /// [`GitError::ConflictingOptions`] if both creation modes are set; no
    /// process is spawned in that case.
    pub fn checkout(&self, branch_name: &str, options: &CheckoutOptions) -> Result<(), GitError> {
        let invocation = self.build(
            Operation::Checkout,
            Vec::new(),
            options,
            vec![branch_name.into()],
        )?;
        self.check_status(&invocation)
    }

    /// Record a commit: `git commit [-m <msg>] [-a] [--amend] [-C <commit>] [-q]`.
    ///
    /// When `msg` is `None` no message flag is passed, so git takes the
    /// message from `-C` or opens the configured editor. Without `-C` the
    /// call is therefore interactive and blocks until the editor exits;
    /// callers that cannot host an editor must pass a message.
    pub fn commit(&self, msg: Option<&str>, options: &CommitOptions) -> Result<(), GitError> {
        let leading = match msg {
            Some(msg) => vec!["-m".into(), msg.into()],
            None => Vec::new(),
        };
        let invocation = self.build(Operation::Commit, leading, options, Vec::new())?;
        self.check_status(&invocation)
    }

    /// Write patch files: `git format-patch <since>`.
    ///
    /// Returns the produced patch filenames in the order git printed them.
    /// Files are written to the directory git runs in.
    pub fn format_patch(&self, since: &str) -> Result<Vec<String>, GitError> {
        let invocation = self.invocation(Operation::FormatPatch).arg(since);
        let stdout = self.check_output(&invocation)?;
        Ok(parse_patch_list(&stdout))
    }

    /// Create a repository: `git init [-q] <directory>`.
    pub fn init(&self, directory: impl AsRef<Path>, options: &InitOptions) -> Result<(), GitError> {
        let invocation = self.build(
            Operation::Init,
            Vec::new(),
            options,
            vec![directory.as_ref().as_os_str().to_os_string()],
        )?;
        self.check_status(&invocation)
    }

    /// Read history: `git log [--pretty=<fmt>] [-<n>] [--skip=<n>] [<filter>]`.
    ///
    /// Returns standard output unmodified (invalid UTF-8 is replaced).
    pub fn log(&self, options: &LogOptions) -> Result<String, GitError> {
        let positionals: Vec<OsString> = options
            .positional()
            .map(|filter| vec![filter.into()])
            .unwrap_or_default();
        let invocation = self.build(Operation::Log, Vec::new(), options, positionals)?;
        self.check_output(&invocation)
    }

    /// Move HEAD: `git reset [--hard] [-q] <commit>`.
    pub fn reset(&self, commit: &str, options: &ResetOptions) -> Result<(), GitError> {
        let invocation = self.build(Operation::Reset, Vec::new(), options, vec![commit.into()])?;
        self.check_status(&invocation)
    }
}

/// Split `format-patch` output into filenames, dropping blank lines.
fn parse_patch_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Current-directory shorthands
// =============================================================================

/// `git add` in the current working directory.
pub fn add(filename: impl AsRef<Path>) -> Result<(), GitError> {
    Git::new().add(filename)
}

/// `git am` in the current working directory.
pub fn am<I, P>(patch_paths: I, options: &AmOptions) -> Result<(), GitError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Git::new().am(patch_paths, options)
}

/// `git checkout` in the current working directory.
pub fn checkout(branch_name: &str, options: &CheckoutOptions) -> Result<(), GitError> {
    Git::new().checkout(branch_name, options)
}

/// `git commit` in the current working directory.
pub fn commit(msg: Option<&str>, options: &CommitOptions) -> Result<(), GitError> {
    Git::new().commit(msg, options)
}

/// `git format-patch` in the current working directory.
pub fn format_patch(since: &str) -> Result<Vec<String>, GitError> {
    Git::new().format_patch(since)
}

/// `git init` in the current working directory.
pub fn init(directory: impl AsRef<Path>, options: &InitOptions) -> Result<(), GitError> {
    Git::new().init(directory, options)
}

/// `git log` in the current working directory.
pub fn log(options: &LogOptions) -> Result<String, GitError> {
    Git::new().log(options)
}

/// `git reset` in the current working directory.
pub fn reset(commit: &str, options: &ResetOptions) -> Result<(), GitError> {
    Git::new().reset(commit, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::MockRunner;
    use crate::git::runner::ProcessOutput;

    fn git(runner: &MockRunner) -> Git<&MockRunner> {
        Git::with_runner(runner)
    }

    #[test]
    fn add_passes_filename() {
        let runner = MockRunner::new();
        git(&runner).add("src/lib.rs").unwrap();
        assert_eq!(runner.last_argv().unwrap(), vec!["git", "add", "src/lib.rs"]);
    }

    #[test]
    fn add_failure_is_process_failed() {
        let runner = MockRunner::new();
        runner.push_exit_code(128);
        let err = git(&runner).add("missing.txt").unwrap_err();
        match err {
            GitError::ProcessFailed { command, code } => {
                assert_eq!(command, "git add missing.txt");
                assert_eq!(code, Some(128));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn am_flags_precede_patches() {
        let runner = MockRunner::new();
        let opts = AmOptions::new().three_way_merge(true).quiet(true);
        git(&runner)
            .am(["0001-a.patch", "0002-b.patch"], &opts)
            .unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "am", "--3way", "-q", "0001-a.patch", "0002-b.patch"]
        );
    }

    #[test]
    fn am_nonzero_is_patch_conflict() {
        for code in [1, 2, 128] {
            let runner = MockRunner::new();
            runner.push_exit_code(code);
            let err = git(&runner)
                .am(["0001-a.patch"], &AmOptions::new())
                .unwrap_err();
            assert!(err.is_patch_conflict(), "code {code} gave {err:?}");
        }
    }

    #[test]
    fn am_spawn_failure_is_not_patch_conflict() {
        let runner = MockRunner::new();
        runner.push_spawn_error(std::io::ErrorKind::NotFound);
        let err = git(&runner)
            .am(["0001-a.patch"], &AmOptions::new())
            .unwrap_err();
        assert!(matches!(err, GitError::Spawn { .. }));
    }

    #[test]
    fn checkout_conflict_never_spawns() {
        let runner = MockRunner::new();
        let opts = CheckoutOptions::new().create(true).create_and_reset(true);
        let err = git(&runner).checkout("feature", &opts).unwrap_err();
        assert!(err.is_conflicting_options());
        assert_eq!(runner.spawn_count(), 0);
    }

    #[test]
    fn checkout_modes() {
        let runner = MockRunner::new();
        let g = git(&runner);

        g.checkout("main", &CheckoutOptions::new()).unwrap();
        assert_eq!(runner.last_argv().unwrap(), vec!["git", "checkout", "main"]);

        g.checkout("feature", &CheckoutOptions::new().create(true))
            .unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "checkout", "-b", "feature"]
        );

        g.checkout("feature", &CheckoutOptions::new().create_and_reset(true))
            .unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "checkout", "-B", "feature"]
        );
    }

    #[test]
    fn commit_message_comes_first() {
        let runner = MockRunner::new();
        let opts = CommitOptions::new().all(true).quiet(true);
        git(&runner).commit(Some("fix: typo"), &opts).unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "commit", "-m", "fix: typo", "-a", "-q"]
        );
    }

    #[test]
    fn commit_without_message_passes_no_message_flag() {
        let runner = MockRunner::new();
        let opts = CommitOptions::new().amend(true).use_commit_object("HEAD");
        git(&runner).commit(None, &opts).unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "commit", "--amend", "-C", "HEAD"]
        );
    }

    #[test]
    fn format_patch_returns_filenames() {
        let runner = MockRunner::new();
        runner.push_output(ProcessOutput::success("0001-a.patch\n0002-b.patch\n"));
        let patches = git(&runner).format_patch("main").unwrap();
        assert_eq!(patches, vec!["0001-a.patch", "0002-b.patch"]);
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "format-patch", "main"]
        );
    }

    #[test]
    fn format_patch_empty_output() {
        let runner = MockRunner::new();
        assert!(git(&runner).format_patch("HEAD").unwrap().is_empty());
    }

    #[test]
    fn format_patch_failure_carries_output() {
        let runner = MockRunner::new();
        runner.push_output(ProcessOutput::with_code(
            128,
            "",
            "fatal: ambiguous argument 'nope'\n",
        ));
        let err = git(&runner).format_patch("nope").unwrap_err();
        match err {
            GitError::CommandFailed {
                code,
                stdout,
                stderr,
            } => {
                assert_eq!(code, Some(128));
                assert!(stdout.is_empty());
                assert!(stderr.contains("ambiguous argument"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_patch_list_drops_blank_lines() {
        assert_eq!(
            parse_patch_list("\n0001-a.patch\n   \n0002-b.patch\r\n\n"),
            vec!["0001-a.patch", "0002-b.patch"]
        );
        assert!(parse_patch_list("").is_empty());
    }

    #[test]
    fn init_quiet_before_directory() {
        let runner = MockRunner::new();
        git(&runner)
            .init("sandbox", &InitOptions::new().quiet(true))
            .unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "init", "-q", "sandbox"]
        );
    }

    #[test]
    fn log_argv_and_raw_output() {
        let runner = MockRunner::new();
        let raw = "abc123 first\n\ndef456 second\n";
        runner.push_output(ProcessOutput::success(raw));

        let opts = LogOptions::new().count(3).pretty("oneline").skip(2);
        let out = git(&runner).log(&opts).unwrap();

        assert_eq!(out, raw);
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "log", "--pretty=oneline", "-3", "--skip=2"]
        );
    }

    #[test]
    fn log_filter_is_trailing() {
        let runner = MockRunner::new();
        let opts = LogOptions::new().filter("src/").count(1);
        git(&runner).log(&opts).unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "log", "-1", "src/"]
        );
    }

    #[test]
    fn reset_flags_before_commit() {
        let runner = MockRunner::new();
        git(&runner)
            .reset("HEAD~1", &ResetOptions::new().hard(true).quiet(true))
            .unwrap();
        assert_eq!(
            runner.last_argv().unwrap(),
            vec!["git", "reset", "--hard", "-q", "HEAD~1"]
        );
    }

    #[test]
    fn config_program_and_env_are_applied() {
        let runner = MockRunner::new();
        let config = Config::from_toml_str("program = \"/opt/git/bin/git\"\n[env]\nGIT_AUTHOR_NAME = \"Bot\"\n")
            .unwrap();
        git(&runner)
            .with_config(config)
            .add("a.txt")
            .unwrap();

        let call = runner.last_call().unwrap();
        assert_eq!(call.argv(), vec!["/opt/git/bin/git", "add", "a.txt"]);
        assert_eq!(
            call.envs(),
            &[(OsString::from("GIT_AUTHOR_NAME"), OsString::from("Bot"))]
        );
    }

    #[test]
    fn unbound_git_has_no_cwd() {
        let runner = MockRunner::new();
        git(&runner).log(&LogOptions::new()).unwrap();
        assert!(runner.last_call().unwrap().cwd().is_none());
    }

    #[test]
    fn bound_git_passes_cwd() {
        let runner = MockRunner::new();
        let g = git(&runner).in_dir("/srv/repo");
        g.reset("HEAD", &ResetOptions::new()).unwrap();
        assert_eq!(
            runner.last_call().unwrap().cwd(),
            Some(Path::new("/srv/repo"))
        );
        assert_eq!(g.work_dir(), Some(Path::new("/srv/repo")));
    }
}
