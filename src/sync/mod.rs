//! Repository synchronization.

pub mod git;

pub use git::{RepoSynchronizer, SyncAction, SyncResult};
