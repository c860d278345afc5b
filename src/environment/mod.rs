//! Persistent PATH changes.
//!
//! [`PathSet`] collects directories during an install; [`merge_path`] folds
//! them into an existing PATH value (used for the Windows registry) and
//! [`append_exports`] writes them to a shell profile on Unix-like hosts.

pub mod path;
pub mod profile;

pub use path::{expand_percent_vars, merge_path, PathMerge, PathSet};
pub use profile::append_exports;
