//! Windows hosts: registry-backed PATH and administrator checks.

use std::path::{Path, PathBuf};

use windows::Win32::UI::Shell::IsUserAnAdmin;
use windows_registry::{Key, CURRENT_USER, LOCAL_MACHINE};

use crate::config::PathScope;
use crate::detection::PackageManager;
use crate::environment::{expand_percent_vars, merge_path, PathSet};
use crate::error::{Result, TomeError};
use crate::requirements::{DependencyProbe, Tool};
use crate::ui::UserInterface;

use super::{Platform, PlatformKind};

const USER_ENVIRONMENT: &str = "Environment";
const SYSTEM_ENVIRONMENT: &str = r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// Windows hosts.
#[derive(Debug, Clone)]
pub struct Windows {
    probe: DependencyProbe,
}

impl Windows {
    /// Inspect the running host.
    pub fn detect() -> Self {
        Self {
            probe: DependencyProbe::from_env(),
        }
    }
}

fn registry_error(action: &str, e: impl std::fmt::Display) -> TomeError {
    TomeError::EnvironmentError {
        message: format!("{action}: {e}"),
    }
}

fn environment_key(scope: PathScope) -> Result<Key> {
    let (root, subkey) = match scope {
        PathScope::User => (CURRENT_USER, USER_ENVIRONMENT),
        PathScope::System => (LOCAL_MACHINE, SYSTEM_ENVIRONMENT),
    };
    root.create(subkey)
        .map_err(|e| registry_error(&format!("Could not open the {scope} environment"), e))
}

impl Platform for Windows {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Windows
    }

    fn locate_executable(&self, tool: Tool) -> Option<PathBuf> {
        self.probe.locate(tool)
    }

    fn is_elevated(&self) -> bool {
        // SAFETY: IsUserAnAdmin takes no arguments and only queries the token.
        unsafe { IsUserAnAdmin() }.as_bool()
    }

    fn package_manager(&self) -> Option<PackageManager> {
        None
    }

    fn update_persistent_path(
        &self,
        additions: &PathSet,
        scope: PathScope,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        if additions.is_empty() {
            return Ok(());
        }

        let key = environment_key(scope)?;
        let existing = match key.get_string("Path") {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("No {} Path value ({}), starting empty", scope, e);
                String::new()
            }
        };

        // Existence is checked on the expanded segment; the raw value is written back.
        let merge = merge_path(&existing, additions, ';', |segment| {
            let expanded =
                expand_percent_vars(&segment.to_string_lossy(), |name| std::env::var(name).ok());
            Path::new(&expanded).exists()
        });
        merge.warn(ui);
        if !merge.changed(&existing) {
            ui.message(&format!("The {scope} PATH is already up to date."));
            return Ok(());
        }

        key.set_expand_string("Path", merge.value.as_str())
            .map_err(|e| registry_error(&format!("Could not write the {scope} PATH"), e))?;

        tracing::info!("Updated {} PATH", scope);
        for dir in additions.dirs() {
            ui.message(&format!("Added {} to the {} PATH.", dir.display(), scope));
        }
        ui.warning("Open a new terminal (or sign out and back in) to pick up the PATH changes.");
        Ok(())
    }
}
