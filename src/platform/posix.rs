//! Unix-like hosts: package manager installs and shell profile exports.

use std::path::PathBuf;

use crate::config::PathScope;
use crate::detection::{Distro, PackageManager};
use crate::environment::{append_exports, PathSet};
use crate::error::{Result, TomeError};
use crate::requirements::{DependencyProbe, Tool};
use crate::shell::ShellType;
use crate::ui::UserInterface;

use super::{Platform, PlatformKind};

/// Linux, macOS and other Unix-like hosts.
#[derive(Debug, Clone)]
pub struct Posix {
    probe: DependencyProbe,
    home: PathBuf,
    shell: ShellType,
    package_manager: Option<PackageManager>,
    elevated: bool,
}

impl Posix {
    /// Inspect the running host.
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| TomeError::EnvironmentError {
            message: "Could not determine the home directory".to_string(),
        })?;

        let distro = Distro::detect();
        if let Some(distro) = &distro {
            tracing::info!("Distro is {}", distro.id);
        }

        let probe = DependencyProbe::from_env();
        let package_manager =
            PackageManager::detect(distro.as_ref(), |exe| probe.locate_executable(exe).is_some());
        match package_manager {
            Some(pm) => tracing::debug!("Package manager is {}", pm),
            None => tracing::debug!("No supported package manager found"),
        }

        Ok(Self {
            probe,
            home,
            shell: ShellType::detect(),
            package_manager,
            elevated: effective_root(),
        })
    }

    /// Build a platform from explicit parts.
    pub fn new(
        probe: DependencyProbe,
        home: impl Into<PathBuf>,
        shell: ShellType,
        package_manager: Option<PackageManager>,
        elevated: bool,
    ) -> Self {
        Self {
            probe,
            home: home.into(),
            shell,
            package_manager,
            elevated,
        }
    }

    /// The profile that receives PATH exports.
    pub fn profile_path(&self) -> PathBuf {
        self.shell.profile_path(&self.home)
    }
}

#[cfg(unix)]
fn effective_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn effective_root() -> bool {
    false
}

impl Platform for Posix {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Posix
    }

    fn locate_executable(&self, tool: Tool) -> Option<PathBuf> {
        self.probe.locate(tool)
    }

    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn package_manager(&self) -> Option<PackageManager> {
        self.package_manager
    }

    fn update_persistent_path(
        &self,
        additions: &PathSet,
        _scope: PathScope,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        if additions.is_empty() {
            return Ok(());
        }

        let profile = self.profile_path();
        let added = append_exports(&profile, self.shell, additions)?;
        if added.is_empty() {
            ui.message(&format!("{} already updates PATH.", profile.display()));
        } else {
            for line in &added {
                ui.message(&format!("Added to {}: {}", profile.display(), line));
            }
            ui.warning("Open a new shell or source your profile to pick up the PATH changes.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn platform(home: &Path, shell: ShellType) -> Posix {
        Posix::new(
            DependencyProbe::new(Vec::new(), Vec::new()),
            home,
            shell,
            Some(PackageManager::Apt),
            false,
        )
    }

    #[test]
    fn profile_follows_shell() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            platform(temp.path(), ShellType::Zsh).profile_path(),
            temp.path().join(".zshrc")
        );
        assert_eq!(
            platform(temp.path(), ShellType::Unknown).profile_path(),
            temp.path().join(".bashrc")
        );
    }

    #[test]
    fn path_update_writes_profile() {
        let temp = TempDir::new().unwrap();
        let posix = platform(temp.path(), ShellType::Bash);
        let mut set = PathSet::new();
        set.add("/opt/arc/arcanist/bin");
        let mut ui = MockUI::new();

        posix
            .update_persistent_path(&set, PathScope::User, &mut ui)
            .unwrap();

        let content = fs::read_to_string(temp.path().join(".bashrc")).unwrap();
        assert_eq!(content, "export PATH=\"/opt/arc/arcanist/bin:$PATH\"\n");
        assert!(ui.has_message("Added to"));
    }

    #[test]
    fn empty_update_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let posix = platform(temp.path(), ShellType::Bash);
        let mut ui = MockUI::new();

        posix
            .update_persistent_path(&PathSet::new(), PathScope::System, &mut ui)
            .unwrap();

        assert!(!temp.path().join(".bashrc").exists());
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn reports_configuration() {
        let temp = TempDir::new().unwrap();
        let posix = platform(temp.path(), ShellType::Bash);
        assert_eq!(posix.kind(), PlatformKind::Posix);
        assert_eq!(posix.package_manager(), Some(PackageManager::Apt));
        assert!(!posix.is_elevated());
        assert!(posix.locate_executable(Tool::Git).is_none());
    }
}
