//! External command execution.
//!
//! Commands are spawned directly (no intermediate shell) with an explicit
//! argument vector. Output is either inherited, so git and package manager
//! progress stays visible, or captured for commands whose output is parsed.

use crate::error::{Result, TomeError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,

    /// Arguments, passed verbatim.
    pub args: Vec<String>,

    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout/stderr (if false, inherits from parent).
    pub capture: bool,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture: false,
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run inside `dir`.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Capture output instead of inheriting it.
    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    /// The command line as it would be typed, e.g. `git clone URI DIR`.
    pub fn display_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Runs external commands.
///
/// The installer talks to git and the system package manager only through
/// this trait so the whole flow can be exercised without touching the host.
pub trait CommandRunner {
    /// Run a command and report its outcome, successful or not.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;

    /// Run a command, turning a non-zero exit into [`TomeError::CommandFailed`].
    fn run_checked(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let result = self.run(spec)?;
        if result.success {
            Ok(result)
        } else {
            Err(TomeError::CommandFailed {
                command: spec.display_line(),
                code: result.exit_code,
            })
        }
    }
}

/// Runs commands on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        execute(spec)
    }
}

/// Execute a command on the host.
pub fn execute(spec: &CommandSpec) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!("Executing: {}", spec);

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);

    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }

    if spec.capture {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {}: {}", spec.program, e);
        TomeError::CommandFailed {
            command: spec.display_line(),
            code: None,
        }
    })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!(
            "{} exited with {:?} after {:?}",
            spec.program,
            output.status.code(),
            duration
        );
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}
