//! Recording command runner for testing.
//!
//! `RecordingRunner` implements [`CommandRunner`] without spawning anything.
//! Every invocation is captured for later assertion; canned stdout and
//! failures can be configured per command line prefix.
//!
//! # Example
//!
//! ```
//! use tome::shell::{CommandRunner, CommandSpec, RecordingRunner};
//!
//! let runner = RecordingRunner::new().with_stdout("git rev-parse", "abc123\n");
//! let result = runner
//!     .run(&CommandSpec::new("git").args(["rev-parse", "HEAD"]).captured())
//!     .unwrap();
//!
//! assert_eq!(result.stdout.trim(), "abc123");
//! assert_eq!(runner.commands(), vec!["git rev-parse HEAD".to_string()]);
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandResult, CommandRunner, CommandSpec};

/// Captures commands instead of running them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: RefCell<Vec<CommandSpec>>,
    stdout: Vec<(String, String)>,
    failures: Vec<(String, i32)>,
    create_clone_targets: bool,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `stdout` for commands whose line starts with `prefix`.
    pub fn with_stdout(mut self, prefix: &str, stdout: &str) -> Self {
        self.stdout.push((prefix.to_string(), stdout.to_string()));
        self
    }

    /// Fail commands whose line starts with `prefix` with `exit_code`.
    pub fn with_failure(mut self, prefix: &str, exit_code: i32) -> Self {
        self.failures.push((prefix.to_string(), exit_code));
        self
    }

    /// Create the target directory of `git clone URI DIR` like git would.
    pub fn creating_clone_targets(mut self) -> Self {
        self.create_clone_targets = true;
        self
    }

    /// All recorded invocations, in order.
    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.invocations.borrow().clone()
    }

    /// All recorded command lines, in order.
    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(CommandSpec::display_line)
            .collect()
    }

    /// Check whether any recorded command line starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.commands().iter().any(|c| c.starts_with(prefix))
    }

    /// Count recorded command lines starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        self.invocations.borrow_mut().push(spec.clone());
        let line = spec.display_line();

        if let Some((_, code)) = self.failures.iter().find(|(p, _)| line.starts_with(p)) {
            return Ok(CommandResult::failure(
                Some(*code),
                String::new(),
                String::new(),
                Duration::ZERO,
            ));
        }

        if self.create_clone_targets && spec.program == "git" {
            if let [sub, _uri, dir] = spec.args.as_slice() {
                if sub == "clone" {
                    std::fs::create_dir_all(dir)?;
                }
            }
        }

        let stdout = self
            .stdout
            .iter()
            .find(|(p, _)| line.starts_with(p))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();

        Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
    }
}
