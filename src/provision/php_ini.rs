//! Generation of `php.ini` from the shipped development template.
//!
//! The template is copied line by line. Two kinds of lines change: the
//! `extension_dir = "ext"` directive is pointed at the absolute extension
//! directory, and `extension=` directives are commented or uncommented
//! according to an explicit name → action table. Everything else, line
//! endings included, is preserved.

use anyhow::anyhow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name of the template shipped in PHP archives.
pub const INI_TEMPLATE: &str = "php.ini-development";

/// Name of the generated configuration.
pub const INI_FILE: &str = "php.ini";

const RELATIVE_EXTENSION_DIR: &str = r#"extension_dir = "ext""#;

/// What to do with an `extension=` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionAction {
    /// Make sure the directive is active.
    Enable,
    /// Make sure the directive is commented out.
    Disable,
}

/// A php.ini transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniPatch {
    extension_dir: PathBuf,
    extensions: BTreeMap<String, ExtensionAction>,
}

/// Output of [`IniPatch::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedIni {
    /// The resulting document.
    pub content: String,
    /// One description per rewritten line.
    pub changes: Vec<String>,
}

impl IniPatch {
    /// A patch that only rewrites `extension_dir`.
    pub fn new(extension_dir: impl Into<PathBuf>) -> Self {
        Self {
            extension_dir: extension_dir.into(),
            extensions: BTreeMap::new(),
        }
    }

    /// Patch that enables each of `names`.
    pub fn enabling<S: AsRef<str>>(extension_dir: impl Into<PathBuf>, names: &[S]) -> Self {
        names
            .iter()
            .fold(Self::new(extension_dir), |patch, name| patch.enable(name.as_ref()))
    }

    /// Enable the extension `name` (`curl`, `php_curl.dll` and `curl.dll`
    /// all name the same extension).
    pub fn enable(mut self, name: &str) -> Self {
        self.extensions
            .insert(normalize_extension(name), ExtensionAction::Enable);
        self
    }

    /// Disable the extension `name`.
    pub fn disable(mut self, name: &str) -> Self {
        self.extensions
            .insert(normalize_extension(name), ExtensionAction::Disable);
        self
    }

    /// The action for `name`, if any.
    pub fn action_for(&self, name: &str) -> Option<ExtensionAction> {
        self.extensions.get(&normalize_extension(name)).copied()
    }

    /// Transform `template`.
    pub fn apply(&self, template: &str) -> PatchedIni {
        let mut content = String::with_capacity(template.len() + 64);
        let mut changes = Vec::new();

        for raw in template.split_inclusive('\n') {
            let (body, ending) = split_line_ending(raw);
            match self.rewrite(body) {
                Some((line, change)) => {
                    content.push_str(&line);
                    changes.push(change);
                }
                None => content.push_str(body),
            }
            content.push_str(ending);
        }

        PatchedIni { content, changes }
    }

    /// Read the template at `template` and write the result to `output`.
    ///
    /// Returns the change descriptions. A missing template is an error.
    pub fn apply_file(&self, template: &Path, output: &Path) -> Result<Vec<String>> {
        if !template.is_file() {
            return Err(anyhow!(
                "PHP configuration template {} is missing",
                template.display()
            )
            .into());
        }

        let source = fs::read_to_string(template)?;
        let patched = self.apply(&source);
        fs::write(output, patched.content)?;

        tracing::debug!(
            "Wrote {} with {} change(s)",
            output.display(),
            patched.changes.len()
        );
        Ok(patched.changes)
    }

    fn rewrite(&self, body: &str) -> Option<(String, String)> {
        if body.contains(RELATIVE_EXTENSION_DIR) {
            let line = format!(
                r#"extension_dir = "{}""#,
                self.extension_dir.display()
            );
            let change = format!("Set {line}");
            return Some((line, change));
        }

        let trimmed = body.trim_start();
        let (commented, directive) = match trimmed.strip_prefix(';') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let name = extension_name(directive)?;

        match (self.action_for(name)?, commented) {
            (ExtensionAction::Enable, true) => {
                Some((directive.to_string(), format!("Uncommented {directive}")))
            }
            (ExtensionAction::Disable, false) => {
                Some((format!(";{directive}"), format!("Commented {directive}")))
            }
            _ => None,
        }
    }
}

/// The extension named by an `extension=` directive, if `directive` is one.
fn extension_name(directive: &str) -> Option<&str> {
    let (key, value) = directive.split_once('=')?;
    if key.trim_end() != "extension" {
        return None;
    }
    let value = value.trim().trim_matches('"');
    (!value.is_empty()).then_some(value)
}

/// Canonical extension name: `php_curl.dll` → `curl`.
fn normalize_extension(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();
    let name = name.strip_suffix(".dll").unwrap_or(&name);
    let name = name.strip_suffix(".so").unwrap_or(name);
    name.strip_prefix("php_").unwrap_or(name).to_string()
}

fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}
