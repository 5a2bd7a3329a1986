//! Resolved project options produced by prompts or CLI flags

use crate::error::ScaffoldError;
use crate::runtime::PackageManager;
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

/// Style choice meaning "no code-style module"
pub const NO_STYLE: &str = "none";

/// Longest name accepted in a package manifest
const MAX_NAME_LEN: usize = 214;

/// Version range targeted by npm-check-updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UpdateTarget {
    #[default]
    Latest,
    Minor,
    Patch,
}

impl UpdateTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateTarget::Latest => "latest",
            UpdateTarget::Minor => "minor",
            UpdateTarget::Patch => "patch",
        }
    }
}

impl fmt::Display for UpdateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// npm-check-updates options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateFlags {
    /// Write upgraded versions into package.json (`-u`)
    pub upgrade: bool,
    /// Let the user pick updates (`-i`)
    pub interactive: bool,
    pub target: UpdateTarget,
}

impl Default for UpdateFlags {
    fn default() -> Self {
        Self {
            upgrade: true,
            interactive: false,
            target: UpdateTarget::Latest,
        }
    }
}

impl UpdateFlags {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.upgrade {
            args.push("-u".to_string());
        }
        if self.interactive {
            args.push("-i".to_string());
        }
        args.push("-t".to_string());
        args.push(self.target.as_str().to_string());
        args
    }
}

/// Everything downstream components need to know about the new project
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Name written into package.json
    pub project_name: String,

    /// Where the project is created
    pub target_dir: PathBuf,

    /// Modules to apply, in order (later modules win manifest conflicts)
    pub modules: Vec<String>,

    /// Run npm-check-updates with these flags, if set
    pub check_updates: Option<UpdateFlags>,

    pub install_deps: bool,
    pub init_git: bool,
    pub package_manager: PackageManager,
}

impl ProjectOptions {
    /// Options for `name` created under `parent`, with no modules or post steps
    pub fn new(project_name: &str, parent: &Path) -> Result<Self, ScaffoldError> {
        validate_project_name(project_name)?;
        Ok(Self {
            project_name: project_name.to_string(),
            target_dir: parent.join(directory_name(project_name)),
            modules: Vec::new(),
            check_updates: None,
            install_deps: false,
            init_git: false,
            package_manager: PackageManager::default(),
        })
    }

    /// Build the ordered module list from a style choice and extras
    pub fn with_modules(mut self, style: Option<&str>, extras: &[String]) -> Self {
        self.modules = module_selection(style, extras);
        self
    }
}

/// Style first (unless "none"), then extras exactly in the order given.
/// A repeated module is applied again and wins over modules between.
pub fn module_selection(style: Option<&str>, extras: &[String]) -> Vec<String> {
    let mut modules = Vec::new();
    if let Some(style) = style.filter(|s| !s.is_empty() && *s != NO_STYLE) {
        modules.push(style.to_string());
    }
    modules.extend(extras.iter().cloned());
    modules
}

/// Directory name for a project (scope prefix dropped)
pub fn directory_name(project_name: &str) -> &str {
    match project_name.strip_prefix('@') {
        Some(scoped) => scoped.split_once('/').map(|(_, n)| n).unwrap_or(project_name),
        None => project_name,
    }
}

/// Check that a name works both as a directory and as a package name
pub fn validate_project_name(name: &str) -> Result<(), ScaffoldError> {
    let invalid = |reason: &str| -> Result<(), ScaffoldError> {
        Err(ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return invalid("name cannot be empty");
    }
    if name.len() > MAX_NAME_LEN {
        return invalid("name cannot be longer than 214 characters");
    }
    if name != name.to_lowercase() {
        return invalid("name must be lowercase");
    }

    let bare = match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, bare)) if !scope.is_empty() && is_valid_segment(scope) => bare,
            _ => return invalid("scoped names must look like @scope/name"),
        },
        None => name,
    };

    if bare.is_empty() || bare == "." || bare == ".." {
        return invalid("name must not be a relative path");
    }
    if bare.starts_with('.') || bare.starts_with('_') {
        return invalid("name cannot start with '.' or '_'");
    }
    if !is_valid_segment(bare) {
        return invalid("name may only contain letters, digits, '-', '.', '_' and '~'");
    }

    Ok(())
}

fn is_valid_segment(segment: &str) -> bool {
    segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_flags_args() {
        assert_eq!(UpdateFlags::default().to_args(), ["-u", "-t", "latest"]);

        let flags = UpdateFlags {
            upgrade: false,
            interactive: true,
            target: UpdateTarget::Minor,
        };
        assert_eq!(flags.to_args(), ["-i", "-t", "minor"]);
    }

    #[test]
    fn test_module_selection_order() {
        let extras = vec!["vitest".to_string(), "docker".to_string()];
        assert_eq!(
            module_selection(Some("eslint-prettier"), &extras),
            ["eslint-prettier", "vitest", "docker"]
        );
        assert_eq!(module_selection(Some(NO_STYLE), &extras), ["vitest", "docker"]);
        assert!(module_selection(None, &[]).is_empty());
    }

    #[test]
    fn test_module_selection_keeps_repeats() {
        let extras = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(module_selection(Some("lint"), &extras), ["lint", "a", "b", "a"]);
    }

    #[test]
    fn test_valid_names() {
        assert!(validate_project_name("my-ts-app").is_ok());
        assert!(validate_project_name("app.v2").is_ok());
        assert!(validate_project_name("@acme/tool").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "  ", "My-App", "my app", "../escape", "a/b", ".hidden", "_x", "..", "@acme", "@/x"] {
            assert!(validate_project_name(name).is_err(), "{name} should be rejected");
        }
        assert!(validate_project_name(&"a".repeat(215)).is_err());
    }

    #[test]
    fn test_directory_name() {
        assert_eq!(directory_name("my-app"), "my-app");
        assert_eq!(directory_name("@acme/tool"), "tool");
    }

    #[test]
    fn test_options_target_dir() {
        let options = ProjectOptions::new("@acme/tool", Path::new("/work"))
            .unwrap()
            .with_modules(Some("eslint-prettier"), &["vitest".to_string()]);
        assert_eq!(options.target_dir, PathBuf::from("/work/tool"));
        assert_eq!(options.project_name, "@acme/tool");
        assert_eq!(options.modules, ["eslint-prettier", "vitest"]);
        assert!(!options.install_deps && !options.init_git);
    }
}
