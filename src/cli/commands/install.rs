//! The `install` command.
//!
//! Runs the whole bootstrap in a fixed order: privilege check, tool probes,
//! package installation, repository synchronization (libphutil before
//! arcanist), PHP provisioning on Windows, and finally the PATH update.

use std::fs;

use crate::config::{Layout, PathScope};
use crate::environment::PathSet;
use crate::error::{Result, TomeError};
use crate::platform::{Platform, PlatformKind};
use crate::provision::{Arch, PhpProvisioner, ProvisionReport};
use crate::requirements::{PackagePlan, Tool};
use crate::shell::CommandRunner;
use crate::sync::{RepoSynchronizer, SyncResult};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// What an install run did.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Package names handed to the package manager.
    pub packages_installed: Vec<String>,
    /// Repositories in synchronization order.
    pub synced: Vec<SyncResult>,
    /// Directories added to PATH.
    pub path_added: PathSet,
    /// The PHP build provisioned on Windows.
    pub php_provisioned: Option<ProvisionReport>,
}

/// Installs or updates Arcanist.
pub struct InstallCommand<'a> {
    layout: Layout,
    platform: &'a dyn Platform,
    runner: &'a dyn CommandRunner,
    php_arch: Option<Arch>,
}

impl<'a> InstallCommand<'a> {
    /// Create the command.
    pub fn new(layout: Layout, platform: &'a dyn Platform, runner: &'a dyn CommandRunner) -> Self {
        Self {
            layout,
            platform,
            runner,
            php_arch: Arch::host(),
        }
    }

    /// Provision PHP builds for `arch` instead of the host architecture.
    pub fn with_php_arch(mut self, arch: Arch) -> Self {
        self.php_arch = Some(arch);
        self
    }

    /// The layout being installed.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn on_windows(&self) -> bool {
        self.platform.kind() == PlatformKind::Windows
    }

    fn check_privilege(&self) -> Result<()> {
        if self.on_windows() && self.layout.scope == PathScope::System && !self.platform.is_elevated()
        {
            return Err(TomeError::InsufficientPrivilege {
                message: "Please run tome as administrator to modify the system PATH. \
                          If you only wish to modify your user's PATH, add --user to the command line."
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Probe `tool`, returning whether it was found.
    fn probe(&self, tool: Tool, ui: &mut dyn UserInterface) -> bool {
        ui.section(&format!("Checking for {}...", tool.label()));
        match self.platform.locate_executable(tool) {
            Some(path) => {
                tracing::debug!("{} resolved to {}", tool, path.display());
                ui.success(&format!("{} is present in PATH.", tool.label()));
                true
            }
            None => {
                tracing::debug!("{} not found on PATH", tool);
                false
            }
        }
    }

    fn provision_php(&self, ui: &mut dyn UserInterface) -> Result<ProvisionReport> {
        let provisioner = PhpProvisioner::for_arch(&self.layout, self.php_arch)?;
        ui.section("Installing PHP...");
        provisioner.provision(ui)
    }

    /// Run the installation and report what was done.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<InstallReport> {
        ui.show_header(concat!("tome ", env!("CARGO_PKG_VERSION")));
        ui.message(&format!("Installing to {}", self.layout.root.display()));
        if self.on_windows() {
            ui.message(&format!(
                "Will modify {} environment variables.",
                self.layout.scope
            ));
        }
        self.check_privilege()?;

        let mut report = InstallReport::default();
        let mut plan = PackagePlan::new();

        if !self.probe(Tool::Git, ui) {
            if self.on_windows() {
                return Err(TomeError::RequirementMissing {
                    requirement: "git".to_string(),
                    message: "Git for Windows is missing from PATH. Please install it.".to_string(),
                });
            }
            ui.message("Git will be installed.");
            plan.add(Tool::Git);
        }

        let php_missing = !self.probe(Tool::Php, ui);
        if php_missing && !self.on_windows() {
            ui.message("PHP will be installed.");
            plan.add(Tool::Php);
        }

        report.packages_installed = plan.install(
            self.platform.package_manager(),
            self.platform.is_elevated(),
            self.runner,
            ui,
        )?;

        ui.section("Checking arcanist installation...");
        if !self.layout.root.is_dir() {
            ui.command(&format!("mkdir {}", self.layout.root.display()));
        }
        fs::create_dir_all(&self.layout.root)?;

        let synchronizer = RepoSynchronizer::new(self.runner);
        for repo in self.layout.repos() {
            report.synced.push(synchronizer.sync(repo, ui)?);
        }

        if php_missing && self.on_windows() {
            let provisioned = self.provision_php(ui)?;
            report.path_added.add(provisioned.php_dir.clone());
            report.php_provisioned = Some(provisioned);
        }

        if self.probe(Tool::Arcanist, ui) {
            tracing::debug!("arc already reachable, leaving PATH alone");
        } else {
            report.path_added.add(self.layout.arcanist_bin());
        }

        if report.path_added.is_empty() {
            tracing::info!("No PATH changes needed");
        } else {
            ui.section(&format!("Adjusting {} PATH...", self.layout.scope));
            self.platform
                .update_persistent_path(&report.path_added, self.layout.scope, ui)?;
        }

        ui.success("Arcanist is installed.");
        Ok(report)
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run(ui)?;
        Ok(CommandResult::success())
    }
}
