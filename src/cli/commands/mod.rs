//! Command implementations.
//!
//! Each subcommand is implemented in its own module.

pub mod dispatcher;
pub mod install;
pub mod setup_project;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use install::{InstallCommand, InstallReport};
pub use setup_project::SetupProjectCommand;
