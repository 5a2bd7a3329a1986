//! Template layout, module composition and project scaffolding
//!
//! This module provides:
//! - Template root layout (`base/`, `extra/`) and the `template.yaml` catalog
//! - Directory tree copying
//! - Extra module resolution and application
//! - The scaffold orchestrator

pub mod catalog;
pub mod copier;
pub mod layout;
pub mod module;
pub mod scaffold;

pub use catalog::{ModuleEntry, TemplateCatalog};
pub use copier::copy_tree;
pub use layout::TemplateLayout;
pub use module::{add_module, resolve_module, ModuleOutcome, ResolvedModule};
pub use scaffold::{finalize_manifest, scaffold_project, ScaffoldSummary};

use anyhow::{Context, Result};
use std::path::Path;

/// Whether `dir` exists and has at least one entry
pub fn is_non_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Remove an existing project directory and everything in it
pub async fn clear_dir(dir: &Path) -> Result<()> {
    tokio::fs::remove_dir_all(dir)
        .await
        .with_context(|| format!("Failed to delete {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_non_empty_and_clear() {
        let temp = TempDir::new().expect("create temp dir");
        let dir = temp.path().join("project");
        assert!(!is_non_empty_dir(&dir));

        std::fs::create_dir(&dir).unwrap();
        assert!(!is_non_empty_dir(&dir));

        std::fs::write(dir.join("file"), "x").unwrap();
        assert!(is_non_empty_dir(&dir));

        clear_dir(&dir).await.unwrap();
        assert!(!dir.exists());
    }
}
