//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use clap::CommandFactory;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, InstallArgs};
use crate::config::{Layout, PathScope};
use crate::error::Result;
use crate::platform;
use crate::shell::SystemRunner;
use crate::ui::UserInterface;

use super::install::InstallCommand;
use super::setup_project::SetupProjectCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory (where `.arcconfig` is written).
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand the usage text is printed and the run succeeds.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => {
                let layout = resolve_layout(args)?;
                let platform = platform::current()?;
                let runner = SystemRunner;
                let cmd = InstallCommand::new(layout, platform.as_ref(), &runner);
                cmd.execute(ui)
            }
            Some(Commands::SetupProject(args)) => {
                let cmd = SetupProjectCommand::new(&self.working_dir, args.phab_uri.clone());
                cmd.execute(ui)
            }
            None => {
                Cli::command().print_help()?;
                Ok(CommandResult::success())
            }
        }
    }
}

/// Build the layout for an `install` invocation.
///
/// A relative `--arcbase-dir` is made absolute against the current
/// directory; without one the root defaults to `~/.arcanist`.
pub fn resolve_layout(args: &InstallArgs) -> Result<Layout> {
    let root = match &args.arcbase_dir {
        Some(dir) => std::path::absolute(dir)?,
        None => Layout::default_root()?,
    };
    let scope = if args.user {
        PathScope::User
    } else {
        PathScope::System
    };
    Layout::load(root, scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.working_dir(), Path::new("/test"));
    }

    #[test]
    fn layout_from_explicit_root() {
        let temp = TempDir::new().unwrap();
        let args = InstallArgs {
            arcbase_dir: Some(temp.path().join("arc")),
            user: true,
        };
        let layout = resolve_layout(&args).unwrap();
        assert_eq!(layout.root, temp.path().join("arc"));
        assert_eq!(layout.scope, PathScope::User);
    }

    #[test]
    fn relative_root_is_made_absolute() {
        let args = InstallArgs {
            arcbase_dir: Some(PathBuf::from("arc-install")),
            user: false,
        };
        let layout = resolve_layout(&args).unwrap();
        assert!(layout.root.is_absolute());
        assert!(layout.root.ends_with("arc-install"));
        assert_eq!(layout.scope, PathScope::System);
    }

    #[test]
    fn setup_project_dispatches() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let cli = <Cli as clap::Parser>::parse_from(["tome", "setup-project", "https://phab.example.com"]);
        let mut ui = crate::ui::MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(temp.path().join(".arcconfig").exists());
    }
}
