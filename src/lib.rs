//! tome - Installer and updater for the Arcanist code-review toolchain.
//!
//! tome makes sure Git and PHP are available, keeps local checkouts of
//! `libphutil` and `arcanist` up to date, and puts `arc` on PATH. On Windows
//! it downloads, verifies and configures PHP itself.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Installation layout, settings and `.arcconfig`
//! - [`detection`] - Linux distribution and package manager detection
//! - [`environment`] - PATH merging and shell profile updates
//! - [`error`] - Error types and result aliases
//! - [`platform`] - Windows/Unix differences behind one trait
//! - [`provision`] - PHP download, verification and configuration
//! - [`requirements`] - Tool lookup and package installation
//! - [`shell`] - External command execution
//! - [`sync`] - Clone-or-pull of the upstream repositories
//! - [`ui`] - Terminal output and spinners
//!
//! # Example
//!
//! ```
//! use tome::environment::{merge_path, PathSet};
//!
//! let mut additions = PathSet::new();
//! additions.add(r"C:\arc\php");
//! let merged = merge_path(r"C:\Windows;C:\arc\php", &additions, ';', |_| true);
//! assert_eq!(merged.value, r"C:\arc\php;C:\Windows");
//! assert_eq!(merged.duplicates, vec![r"C:\arc\php".to_string()]);
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod environment;
pub mod error;
pub mod platform;
pub mod provision;
pub mod requirements;
pub mod shell;
pub mod sync;
pub mod ui;

pub use error::{Result, TomeError};
