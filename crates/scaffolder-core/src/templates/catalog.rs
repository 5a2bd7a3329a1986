//! Template catalog (`template.yaml`) listing selectable modules

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::layout::TemplateLayout;

/// Catalog file name at the template root
pub const CATALOG_FILE: &str = "template.yaml";

/// A selectable module as shown in prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Directory name under `extra/`
    pub name: String,

    /// Display label
    #[serde(default)]
    pub label: Option<String>,

    /// Short description shown next to the label
    #[serde(default)]
    pub hint: Option<String>,
}

impl ModuleEntry {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn hint(&self) -> &str {
        self.hint.as_deref().unwrap_or("")
    }
}

/// Root catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateCatalog {
    /// Mutually exclusive code-style modules
    #[serde(default)]
    pub styles: Vec<ModuleEntry>,

    /// Independently toggled extras
    #[serde(default)]
    pub extras: Vec<ModuleEntry>,
}

impl TemplateCatalog {
    /// Load the catalog, falling back to listing `extra/` when it is missing
    pub fn load(layout: &TemplateLayout) -> Result<Self> {
        let path = layout.root.join(CATALOG_FILE);
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()));
        }

        Ok(Self {
            styles: Vec::new(),
            extras: discover_modules(&layout.extra)?,
        })
    }

    pub fn style(&self, name: &str) -> Option<&ModuleEntry> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn extra(&self, name: &str) -> Option<&ModuleEntry> {
        self.extras.iter().find(|e| e.name == name)
    }
}

/// List module directories, sorted by name
fn discover_modules(extra_dir: &Path) -> Result<Vec<ModuleEntry>> {
    if !extra_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(extra_dir)
        .with_context(|| format!("Failed to read {}", extra_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| ModuleEntry {
            name,
            label: None,
            hint: None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_catalog() {
        let yaml = r#"
styles:
  - name: eslint-prettier
    label: ESLint + Prettier
extras:
  - name: vitest
    hint: Unit testing
"#;
        let catalog: TemplateCatalog = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalog.styles[0].label(), "ESLint + Prettier");
        assert_eq!(catalog.extras[0].label(), "vitest");
        assert_eq!(catalog.extras[0].hint(), "Unit testing");
        assert!(catalog.style("eslint-prettier").is_some());
        assert!(catalog.extra("eslint-prettier").is_none());
    }

    #[test]
    fn test_discover_without_catalog() {
        let temp = TempDir::new().expect("create temp dir");
        let layout = TemplateLayout::new(temp.path());
        std::fs::create_dir_all(layout.extra.join("zod")).unwrap();
        std::fs::create_dir_all(layout.extra.join("docker")).unwrap();
        std::fs::write(layout.extra.join("README.md"), "not a module").unwrap();

        let catalog = TemplateCatalog::load(&layout).unwrap();
        let names: Vec<&str> = catalog.extras.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["docker", "zod"]);
        assert!(catalog.styles.is_empty());
    }

    #[test]
    fn test_shipped_catalog_parses() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        let catalog = TemplateCatalog::load(&TemplateLayout::new(root)).unwrap();
        assert!(catalog.style("eslint-prettier").is_some());
        for entry in catalog.styles.iter().chain(&catalog.extras) {
            assert!(
                Path::new(env!("CARGO_MANIFEST_DIR"))
                    .join("../../templates/extra")
                    .join(&entry.name)
                    .is_dir(),
                "catalog lists missing module {}",
                entry.name
            );
        }
    }
}
