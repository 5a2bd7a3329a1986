//! Loading and persisting `package.json`

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

use super::merge::merge_object;

/// File name of the package manifest in templates, modules and projects
pub const MANIFEST_FILE: &str = "package.json";

/// Schema reference key stripped from the finished manifest
pub const SCHEMA_KEY: &str = "$schema";

/// In-memory package manifest
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    value: Value,
}

impl PackageManifest {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Read and parse a manifest file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Self { value })
    }

    /// Write the manifest as 2-space indented JSON with a trailing newline
    pub async fn save(&self, path: &Path) -> Result<()> {
        let mut content =
            serde_json::to_string_pretty(&self.value).context("Failed to serialize manifest")?;
        content.push('\n');
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Deep-merge a fragment into this manifest (the fragment wins conflicts)
    pub fn merge(&mut self, fragment: &PackageManifest) -> &mut Self {
        merge_object(&mut self.value, &[&fragment.value]);
        self
    }

    /// Force the `name` field, inserting it if missing
    pub fn set_name(&mut self, name: &str) {
        if let Value::Object(map) = &mut self.value {
            map.insert("name".to_string(), Value::String(name.to_string()));
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(Value::as_str)
    }

    /// Remove the schema reference key; returns whether it was present
    pub fn strip_schema(&mut self) -> bool {
        match &mut self.value {
            Value::Object(map) => map.shift_remove(SCHEMA_KEY).is_some(),
            _ => false,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_set_name_overrides_existing() {
        let mut manifest = PackageManifest::new(json!({ "name": "template", "version": "0.1.0" }));
        manifest.set_name("my-app");
        assert_eq!(manifest.name(), Some("my-app"));
        assert_eq!(manifest.as_value()["version"], "0.1.0");
    }

    #[test]
    fn test_strip_schema() {
        let mut manifest = PackageManifest::new(json!({
            "$schema": "https://json.schemastore.org/package.json",
            "name": "x"
        }));
        assert!(manifest.strip_schema());
        assert!(!manifest.strip_schema());
        assert_eq!(manifest.as_value(), &json!({ "name": "x" }));
    }

    #[test]
    fn test_merge_fragment() {
        let mut manifest = PackageManifest::new(json!({ "devDependencies": { "typescript": "^5" } }));
        let fragment = PackageManifest::new(json!({ "devDependencies": { "eslint": "^8" } }));
        manifest.merge(&fragment);
        assert_eq!(
            manifest.into_value(),
            json!({ "devDependencies": { "typescript": "^5", "eslint": "^8" } })
        );
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(MANIFEST_FILE);

        let manifest = PackageManifest::new(json!({ "name": "my-app", "scripts": { "dev": "tsx src" } }));
        manifest.save(&path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(written.contains("\n  \"name\": \"my-app\""));

        let loaded = PackageManifest::load(&path).await.unwrap();
        assert_eq!(loaded, manifest);
    }

    #[tokio::test]
    async fn test_load_invalid_json_fails() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(MANIFEST_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = PackageManifest::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
