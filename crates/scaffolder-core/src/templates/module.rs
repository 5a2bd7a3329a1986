//! Extra module resolution and application
//!
//! A module is a directory under `extra/` holding files to overlay onto the
//! project plus an optional `package.json` fragment. Files are copied with
//! last-writer-wins semantics; the fragment is deep-merged into the
//! project's manifest instead.

use crate::error::ModuleError;
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use crate::report::Reporter;
use anyhow::Context;
use std::path::{Component, Path, PathBuf};

/// A module found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub name: String,
    /// Module directory (root of the file tree to overlay)
    pub files_path: PathBuf,
    /// Top-level manifest fragment, if the module has one
    pub manifest_path: Option<PathBuf>,
}

/// Outcome of applying one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleOutcome {
    Applied,
    NotFound,
    /// No files or manifest changes beyond those copied before the failure
    CopyFailed,
    /// Files were copied but the manifest fragment was dropped
    MergeFailed,
}

/// Find `name` directly under `extras_root`
///
/// Names that are not a single plain path component never resolve.
pub fn resolve_module(name: &str, extras_root: &Path) -> Option<ResolvedModule> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return None,
    }

    let files_path = extras_root.join(name);
    if !files_path.is_dir() {
        return None;
    }

    let manifest_path = Some(files_path.join(MANIFEST_FILE)).filter(|p| p.is_file());

    Some(ResolvedModule {
        name: name.to_string(),
        files_path,
        manifest_path,
    })
}

/// Apply a module to the project in `target_dir`, reporting progress
///
/// Never fails the caller: every problem is reported and summarized in the
/// returned outcome.
pub async fn add_module(
    name: &str,
    target_dir: &Path,
    extras_root: &Path,
    reporter: &mut dyn Reporter,
) -> ModuleOutcome {
    let Some(module) = resolve_module(name, extras_root) else {
        let err = ModuleError::NotFound(name.to_string());
        tracing::debug!(module = name, extras = %extras_root.display(), "module not found");
        reporter.fail(&err.to_string());
        return ModuleOutcome::NotFound;
    };

    reporter.start(&format!("Adding {}", name));

    match apply_module(&module, target_dir).await {
        Ok(()) => {
            reporter.succeed(&format!("Added {}", name));
            ModuleOutcome::Applied
        }
        Err(err) => {
            tracing::debug!(module = name, error = %err, "module failed");
            reporter.fail(&err.to_string());
            match err {
                ModuleError::NotFound(_) => ModuleOutcome::NotFound,
                ModuleError::Copy { .. } => ModuleOutcome::CopyFailed,
                ModuleError::Manifest { .. } => ModuleOutcome::MergeFailed,
            }
        }
    }
}

/// Copy the module's files, then merge its manifest fragment
pub async fn apply_module(module: &ResolvedModule, target_dir: &Path) -> Result<(), ModuleError> {
    let copied = super::copier::copy_tree(&module.files_path, target_dir, |relative| {
        relative != Path::new(MANIFEST_FILE)
    })
    .await
    .map_err(|source| ModuleError::Copy {
        name: module.name.clone(),
        source,
    })?;
    tracing::debug!(module = %module.name, files = copied.len(), "module files copied");

    if let Some(fragment_path) = &module.manifest_path {
        merge_fragment(fragment_path, &target_dir.join(MANIFEST_FILE))
            .await
            .map_err(|source| ModuleError::Manifest {
                name: module.name.clone(),
                source,
            })?;
        tracing::debug!(module = %module.name, "manifest fragment merged");
    }

    Ok(())
}

async fn merge_fragment(fragment_path: &Path, project_manifest: &Path) -> anyhow::Result<()> {
    let mut manifest = PackageManifest::load(project_manifest)
        .await
        .context("Failed to load project manifest")?;
    let fragment = PackageManifest::load(fragment_path)
        .await
        .context("Failed to load module manifest")?;

    manifest.merge(&fragment);
    manifest.save(project_manifest).await
}
