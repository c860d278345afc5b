//! Tool requirements: detection on PATH and installation of missing tools.
//!
//! - [`probe`] - Resolve `git`, `php` and `arc` on the search path
//! - [`packages`] - Install missing tools through the system package manager

pub mod packages;
pub mod probe;

pub use packages::PackagePlan;
pub use probe::{DependencyProbe, Tool};
