//! Directory tree copying with path filtering

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Copy every file under `source_dir` into `target_dir`, overwriting
/// existing files. `include` receives each file's path relative to
/// `source_dir` and decides whether it is copied.
///
/// Returns the relative paths of the copied files. Files written before a
/// failure stay in place.
pub async fn copy_tree<F>(source_dir: &Path, target_dir: &Path, include: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    if !source_dir.is_dir() {
        anyhow::bail!("Source directory not found: {}", source_dir.display());
    }

    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", source_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .context("Walked outside the source directory")?
            .to_path_buf();
        let target_path = target_dir.join(&relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .with_context(|| format!("Failed to create directory: {}", target_path.display()))?;
            continue;
        }

        if !include(&relative) {
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(entry.path(), &target_path)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        tracing::debug!(file = %relative.display(), "copied");

        copied_files.push(relative);
    }

    Ok(copied_files)
}
