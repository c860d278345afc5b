//! System package installation for missing tools.

use crate::detection::PackageManager;
use crate::error::{Result, TomeError};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::probe::Tool;

/// Packages to install in a single package manager run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagePlan {
    tools: Vec<Tool>,
}

impl PackagePlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `tool` for installation.
    pub fn add(&mut self, tool: Tool) {
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
    }

    /// Whether nothing needs installing.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Scheduled tools, in the order they were added.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Package names for `manager`, without duplicates.
    pub fn packages(&self, manager: PackageManager) -> Vec<String> {
        let mut packages: Vec<String> = Vec::new();
        for tool in &self.tools {
            for name in manager.packages_for(*tool) {
                if !packages.iter().any(|p| p == name) {
                    packages.push(name.to_string());
                }
            }
        }
        packages
    }

    /// Install every scheduled tool.
    ///
    /// Returns the package names passed to the manager. Fails with
    /// [`TomeError::RequirementMissing`] when there is no package manager.
    pub fn install(
        &self,
        manager: Option<PackageManager>,
        elevated: bool,
        runner: &dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<String>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let Some(manager) = manager else {
            let names: Vec<&str> = self.tools.iter().map(|t| t.executable()).collect();
            return Err(TomeError::RequirementMissing {
                requirement: names.join(", "),
                message: "No supported package manager was found. Install these tools manually and re-run tome.".to_string(),
            });
        };

        let packages = self.packages(manager);
        let command = manager.install_command(&packages, elevated);
        tracing::info!("Installing packages via {}: {}", manager, packages.join(" "));
        ui.command(&command.display_line());
        runner.run_checked(&command)?;
        ui.success(&format!("Installed {}", packages.join(", ")));

        Ok(packages)
    }
}
