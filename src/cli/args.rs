//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tome - Installer for Arcanist.
#[derive(Debug, Parser)]
#[command(name = "tome")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install or update Arcanist
    Install(InstallArgs),

    /// Set up the working directory for Phabricator
    SetupProject(SetupProjectArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Directory to install Arcanist, PHP, and libphutil into [default: ~/.arcanist]
    #[arg(long, value_name = "DIR", env = "TOME_ARCBASE_DIR")]
    pub arcbase_dir: Option<PathBuf>,

    /// Modify the Windows user PATH (rather than the system PATH)
    #[arg(long)]
    pub user: bool,
}

/// Arguments for the `setup-project` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SetupProjectArgs {
    /// URL of the Phabricator instance
    #[arg(value_name = "PHAB_URI")]
    pub phab_uri: String,
}
