//! Project scaffolding: base template, modules, manifest finalization

use super::copier::copy_tree;
use super::layout::{TemplateLayout, GITIGNORE, GITIGNORE_TEMPLATE};
use super::module::{add_module, ModuleOutcome};
use crate::error::ScaffoldError;
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use crate::options::ProjectOptions;
use crate::report::Reporter;
use anyhow::Context;
use std::path::Path;

/// What happened during a scaffold run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldSummary {
    /// Outcome per selected module, in application order
    pub modules: Vec<(String, ModuleOutcome)>,
    /// Whether the manifest was stamped and saved
    pub finalized: bool,
}

impl ScaffoldSummary {
    pub fn is_complete(&self) -> bool {
        self.finalized
            && self
                .modules
                .iter()
                .all(|(_, outcome)| *outcome == ModuleOutcome::Applied)
    }
}

/// Create the project described by `options` from `layout`
///
/// Only a failure to copy the base template is returned as an error; module
/// and finalization failures are reported and recorded in the summary.
pub async fn scaffold_project(
    options: &ProjectOptions,
    layout: &TemplateLayout,
    reporter: &mut dyn Reporter,
) -> Result<ScaffoldSummary, ScaffoldError> {
    let target_dir = &options.target_dir;

    reporter.start("Copying base template");
    if let Err(source) = copy_base(&layout.base, target_dir).await {
        reporter.fail("Could not copy base template");
        return Err(ScaffoldError::BaseCopy {
            path: layout.base.clone(),
            source,
        });
    }
    reporter.succeed("Base template copied");

    // Sequential on purpose: every module rewrites the same package.json
    let mut modules = Vec::with_capacity(options.modules.len());
    for name in &options.modules {
        let outcome = add_module(name, target_dir, &layout.extra, reporter).await;
        modules.push((name.clone(), outcome));
    }

    reporter.start("Finishing up");
    let finalized = match finalize_manifest(target_dir, &options.project_name).await {
        Ok(()) => {
            reporter.succeed("Project scaffolded!");
            true
        }
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "manifest finalization failed");
            reporter.fail(&format!("Could not finish package.json: {e:#}"));
            false
        }
    };

    Ok(ScaffoldSummary { modules, finalized })
}

async fn copy_base(base_dir: &Path, target_dir: &Path) -> anyhow::Result<()> {
    let copied = copy_tree(base_dir, target_dir, |_| true).await?;
    tracing::debug!(files = copied.len(), "base template copied");

    let placeholder = target_dir.join(GITIGNORE_TEMPLATE);
    if placeholder.exists() {
        tokio::fs::rename(&placeholder, target_dir.join(GITIGNORE))
            .await
            .with_context(|| format!("Failed to rename {}", placeholder.display()))?;
    }
    Ok(())
}

/// Stamp the project name and drop the schema reference
pub async fn finalize_manifest(target_dir: &Path, project_name: &str) -> anyhow::Result<()> {
    let path = target_dir.join(MANIFEST_FILE);
    let mut manifest = PackageManifest::load(&path).await?;
    manifest.set_name(project_name);
    manifest.strip_schema();
    manifest.save(&path).await
}
