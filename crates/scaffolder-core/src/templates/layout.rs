//! Template root resolution and on-disk layout

use crate::product::ProductConfig;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Directory holding the mandatory base template
pub const BASE_DIR: &str = "base";

/// Directory holding one subdirectory per extra module
pub const EXTRA_DIR: &str = "extra";

/// Ignore file shipped under a placeholder name so packaging tools keep it
pub const GITIGNORE_TEMPLATE: &str = "_gitignore";
pub const GITIGNORE: &str = ".gitignore";

/// Paths inside a template root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    pub root: PathBuf,
    pub base: PathBuf,
    pub extra: PathBuf,
}

impl TemplateLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            base: root.join(BASE_DIR),
            extra: root.join(EXTRA_DIR),
            root,
        }
    }

    /// Locate the template root for a product
    ///
    /// Order: explicit directory, product environment variable, `templates/`
    /// next to the executable, then the product's bundled fallback.
    pub fn locate<C: ProductConfig>(config: &C, explicit: Option<&Path>) -> Result<Self> {
        if let Some(dir) = explicit {
            return Self::checked(dir.to_path_buf());
        }

        if let Ok(dir) = std::env::var(config.template_dir_env()) {
            if !dir.is_empty() {
                return Self::checked(PathBuf::from(dir));
            }
        }

        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("templates")));
        if let Some(dir) = beside_exe {
            if dir.join(BASE_DIR).is_dir() {
                return Ok(Self::new(dir));
            }
        }

        Self::checked(config.bundled_template_dir())
    }

    fn checked(root: PathBuf) -> Result<Self> {
        let layout = Self::new(root);
        if !layout.base.is_dir() {
            anyhow::bail!(
                "Template directory not found: {} (expected a '{}' subdirectory)",
                layout.root.display(),
                BASE_DIR
            );
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths() {
        let layout = TemplateLayout::new("/opt/templates");
        assert_eq!(layout.base, PathBuf::from("/opt/templates/base"));
        assert_eq!(layout.extra, PathBuf::from("/opt/templates/extra"));
    }

    #[test]
    fn test_checked_requires_base() {
        let temp = TempDir::new().expect("create temp dir");
        assert!(TemplateLayout::checked(temp.path().to_path_buf()).is_err());

        std::fs::create_dir(temp.path().join(BASE_DIR)).unwrap();
        let layout = TemplateLayout::checked(temp.path().to_path_buf()).unwrap();
        assert_eq!(layout.root, temp.path());
    }
}
