//! The `setup-project` command.

use std::path::{Path, PathBuf};

use crate::config::ArcConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Writes `.arcconfig` for a Phabricator instance.
pub struct SetupProjectCommand {
    project_dir: PathBuf,
    phab_uri: String,
}

impl SetupProjectCommand {
    /// Create the command for `project_dir`.
    pub fn new(project_dir: &Path, phab_uri: String) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            phab_uri,
        }
    }
}

impl Command for SetupProjectCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = ArcConfig::new(self.phab_uri.as_str());
        if !config.has_valid_uri() {
            tracing::warn!("'{}' is not an absolute URL", self.phab_uri);
            ui.warning(&format!(
                "'{}' does not look like a URL; arc expects something like https://phabricator.example.com",
                self.phab_uri
            ));
        }

        let path = config.write_to(&self.project_dir)?;
        tracing::info!("Created {}", path.display());
        ui.success("Created .arcconfig.");
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_arcconfig() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = SetupProjectCommand::new(temp.path(), "https://phab.example.com".to_string())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(
            fs::read_to_string(temp.path().join(".arcconfig")).unwrap(),
            "{\n    \"phabricator.uri\": \"https://phab.example.com\"\n}"
        );
        assert!(ui.has_success("Created .arcconfig."));
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn warns_on_non_url() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        SetupProjectCommand::new(temp.path(), "phab".to_string())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_warning("does not look like a URL"));
        assert!(temp.path().join(".arcconfig").exists());
    }

    #[test]
    fn unwritable_directory_fails() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = SetupProjectCommand::new(
            &temp.path().join("missing"),
            "https://phab.example.com".to_string(),
        )
        .execute(&mut ui);

        assert!(result.is_err());
    }
}
