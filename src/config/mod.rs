//! Configuration: the installation layout, operator settings and the
//! per-project `.arcconfig`.
//!
//! # Example
//!
//! ```
//! use tome::config::{Layout, PathScope};
//!
//! let layout = Layout::new("/opt/arc", PathScope::User);
//! assert_eq!(layout.arcanist_bin(), std::path::PathBuf::from("/opt/arc/arcanist/bin"));
//! ```

pub mod arcconfig;
pub mod layout;
pub mod settings;

pub use arcconfig::{ArcConfig, ARCCONFIG_FILE};
pub use layout::{Layout, PathScope, RepoSpec};
pub use settings::Settings;
