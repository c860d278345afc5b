//! Host platform detection.
//!
//! - [`distro`] - Linux distribution identity from os-release
//! - [`package_manager`] - System package manager and package names

pub mod distro;
pub mod package_manager;

pub use distro::{parse_os_release, Distro};
pub use package_manager::PackageManager;
