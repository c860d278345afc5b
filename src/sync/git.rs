//! Clone-or-pull synchronization of git repositories.
//!
//! A repository directory that does not exist is cloned; an existing one is
//! updated in place with `git pull`. Either way the checked-out revision is
//! read back and reported.

use std::path::{Path, PathBuf};

use crate::config::RepoSpec;
use crate::error::Result;
use crate::shell::{CommandRunner, CommandSpec};
use crate::ui::UserInterface;

/// What the synchronizer did to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// The repository was absent and has been cloned.
    Cloned,
    /// The repository existed and has been pulled.
    Pulled,
}

/// Outcome of synchronizing one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Logical name (`libphutil`, `arcanist`).
    pub name: String,
    /// Repository directory.
    pub local_path: PathBuf,
    /// Checked-out commit SHA after the operation.
    pub commit_sha: String,
    /// Whether a clone or a pull happened.
    pub action: SyncAction,
}

/// Synchronizes repositories through git.
pub struct RepoSynchronizer<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> RepoSynchronizer<'a> {
    /// Create a synchronizer that runs git through `runner`.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Clone `repo` if its directory is absent, otherwise pull it.
    ///
    /// Any git failure is returned as [`crate::TomeError::CommandFailed`].
    pub fn sync(&self, repo: &RepoSpec, ui: &mut dyn UserInterface) -> Result<SyncResult> {
        let action = if repo.dir.is_dir() {
            self.pull(&repo.dir, ui)?;
            SyncAction::Pulled
        } else {
            self.clone_repo(&repo.uri, &repo.dir, ui)?;
            SyncAction::Cloned
        };

        let commit_sha = self.head_sha(&repo.dir)?;
        tracing::info!("{} is now at commit {}", repo.name, commit_sha);
        ui.message(&format!("{} is now at commit {}.", repo.name, commit_sha));

        Ok(SyncResult {
            name: repo.name.clone(),
            local_path: repo.dir.clone(),
            commit_sha,
            action,
        })
    }

    fn clone_repo(&self, uri: &str, dir: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        if let Some(parent) = dir.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let cmd = CommandSpec::new("git").args(["clone", uri, dir.to_string_lossy().as_ref()]);
        ui.command(&cmd.display_line());
        self.runner.run_checked(&cmd)?;
        Ok(())
    }

    fn pull(&self, dir: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        let cmd = CommandSpec::new("git").arg("pull").current_dir(dir);
        ui.command(&cmd.display_line());
        self.runner.run_checked(&cmd)?;
        Ok(())
    }

    fn head_sha(&self, dir: &Path) -> Result<String> {
        let cmd = CommandSpec::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(dir)
            .captured();
        let output = self.runner.run_checked(&cmd)?;
        Ok(output.stdout.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TomeError;
    use crate::shell::{RecordingRunner, SystemRunner};
    use crate::ui::MockUI;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serialize git-process tests to avoid flaky failures under parallel execution
    static GIT_LOCK: Mutex<()> = Mutex::new(());

    fn spec(name: &str, uri: &str, dir: PathBuf) -> RepoSpec {
        RepoSpec {
            name: name.to_string(),
            uri: uri.to_string(),
            dir,
        }
    }

    #[test]
    fn absent_directory_is_cloned() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("arcanist");
        let runner = RecordingRunner::new().with_stdout("git rev-parse", "abc123\n");
        let mut ui = MockUI::new();

        let result = RepoSynchronizer::new(&runner)
            .sync(&spec("arcanist", "https://example.com/arcanist.git", dir.clone()), &mut ui)
            .unwrap();

        assert_eq!(result.action, SyncAction::Cloned);
        assert_eq!(result.commit_sha, "abc123");
        assert_eq!(
            runner.commands()[0],
            format!("git clone https://example.com/arcanist.git {}", dir.display())
        );
        assert!(ui.has_message("arcanist is now at commit abc123."));
    }

    #[test]
    fn existing_directory_is_pulled() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("libphutil");
        std::fs::create_dir_all(&dir).unwrap();
        let runner = RecordingRunner::new().with_stdout("git rev-parse", "def456\n");
        let mut ui = MockUI::new();

        let result = RepoSynchronizer::new(&runner)
            .sync(&spec("libphutil", "https://example.com/libphutil.git", dir.clone()), &mut ui)
            .unwrap();

        assert_eq!(result.action, SyncAction::Pulled);
        let invocations = runner.invocations();
        assert_eq!(invocations[0].display_line(), "git pull");
        assert_eq!(invocations[0].cwd.as_deref(), Some(dir.as_path()));
        assert_eq!(runner.count("git clone"), 0);
    }

    #[test]
    fn second_sync_does_not_reclone() {
        let temp = TempDir::new().unwrap();
        let repo = spec(
            "arcanist",
            "https://example.com/arcanist.git",
            temp.path().join("arcanist"),
        );
        let runner = RecordingRunner::new().creating_clone_targets();
        let mut ui = MockUI::new();
        let sync = RepoSynchronizer::new(&runner);

        let first = sync.sync(&repo, &mut ui).unwrap();
        let second = sync.sync(&repo, &mut ui).unwrap();

        assert_eq!(first.action, SyncAction::Cloned);
        assert_eq!(second.action, SyncAction::Pulled);
        assert_eq!(runner.count("git clone"), 1);
        assert_eq!(runner.count("git pull"), 1);
    }

    #[test]
    fn git_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let runner = RecordingRunner::new().with_failure("git clone", 128);
        let mut ui = MockUI::new();

        let err = RepoSynchronizer::new(&runner)
            .sync(
                &spec("arcanist", "https://example.com/a.git", temp.path().join("a")),
                &mut ui,
            )
            .unwrap_err();

        assert!(matches!(err, TomeError::CommandFailed { code: Some(128), .. }));
        // No revision lookup after a failed clone.
        assert_eq!(runner.count("git rev-parse"), 0);
    }

    // --- Local bare repo git tests ---

    fn git(args: &[&str], cwd: &Path) {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Create a bare repo with one commit on `main`. Returns its path.
    fn create_bare_repo(parent: &Path) -> PathBuf {
        let bare_path = parent.join("upstream.git");
        let work_dir = parent.join("work");
        std::fs::create_dir_all(&work_dir).unwrap();

        git(
            &[
                "init",
                "--bare",
                "--initial-branch=main",
                bare_path.to_string_lossy().as_ref(),
            ],
            parent,
        );
        git(
            &[
                "clone",
                bare_path.to_string_lossy().as_ref(),
                work_dir.to_string_lossy().as_ref(),
            ],
            parent,
        );
        git(&["config", "user.name", "Test"], &work_dir);
        git(&["config", "user.email", "test@test.com"], &work_dir);

        std::fs::create_dir_all(work_dir.join("bin")).unwrap();
        std::fs::write(work_dir.join("bin/arc"), "#!/usr/bin/env php\n").unwrap();
        git(&["add", "."], &work_dir);
        git(&["commit", "-m", "Initial commit"], &work_dir);
        git(&["push", "origin", "HEAD:main"], &work_dir);

        bare_path
    }

    fn push_commit(work_dir: &Path) {
        std::fs::write(work_dir.join("CHANGELOG"), "second\n").unwrap();
        git(&["add", "."], work_dir);
        git(&["commit", "-m", "Second commit"], work_dir);
        git(&["push", "origin", "HEAD:main"], work_dir);
    }

    #[test]
    fn clone_then_pull_against_local_repo() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let bare = create_bare_repo(temp.path());
        let repo = spec(
            "arcanist",
            bare.to_string_lossy().as_ref(),
            temp.path().join("install/arcanist"),
        );
        let mut ui = MockUI::new();
        let sync = RepoSynchronizer::new(&SystemRunner);

        let first = sync.sync(&repo, &mut ui).unwrap();
        assert_eq!(first.action, SyncAction::Cloned);
        assert_eq!(first.commit_sha.len(), 40);
        assert!(repo.dir.join("bin/arc").exists());

        // Up to date: the pull is a no-op and the revision is unchanged.
        let second = sync.sync(&repo, &mut ui).unwrap();
        assert_eq!(second.action, SyncAction::Pulled);
        assert_eq!(second.commit_sha, first.commit_sha);

        push_commit(&temp.path().join("work"));
        let third = sync.sync(&repo, &mut ui).unwrap();
        assert_eq!(third.action, SyncAction::Pulled);
        assert_ne!(third.commit_sha, first.commit_sha);
        assert!(repo.dir.join("CHANGELOG").exists());
    }

    #[test]
    fn invalid_remote_returns_error() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let repo = spec(
            "arcanist",
            "/nonexistent/path/repo.git",
            temp.path().join("arcanist"),
        );
        let mut ui = MockUI::new();

        let result = RepoSynchronizer::new(&SystemRunner).sync(&repo, &mut ui);
        assert!(result.is_err());
    }
}
