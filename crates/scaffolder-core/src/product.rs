//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a scaffolding binary implements to
//! describe its identity, where its templates live and how it updates.

use crate::options::ProjectOptions;
use std::path::PathBuf;

/// Configuration trait for scaffolding CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name, published crate)
/// - Template root lookup
/// - Self-update and issue tracker links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Crate name queried for self-update checks
    fn crate_name(&self) -> &'static str {
        self.name()
    }

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template root used when nothing else is configured
    fn bundled_template_dir(&self) -> PathBuf;

    /// Project name suggested by the prompt
    fn default_project_name(&self) -> &'static str;

    /// Where users should report problems
    fn issues_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, options: &ProjectOptions) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
