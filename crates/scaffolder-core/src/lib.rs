//! Scaffolder Core - Shared library for TypeScript project scaffolding
//!
//! This library copies a base template into a new project folder, layers
//! optional "extra" modules on top (deep-merging their `package.json`
//! fragments into the base manifest) and then runs the usual setup tools.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Deep merge, module resolution, tree copying,
//!   package manager commands
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, `ProjectOptions`
//!   and `scaffold_project`, reporting through the `Reporter` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{ConsoleReporter, ProjectOptions, TemplateLayout};
//!
//! let layout = TemplateLayout::new("templates");
//! let options = ProjectOptions::new("my-app", &std::env::current_dir()?)?
//!     .with_modules(Some("eslint-prettier"), &["vitest".to_string()]);
//!
//! let summary =
//!     scaffolder_core::scaffold_project(&options, &layout, &mut ConsoleReporter).await?;
//! ```

pub mod error;
pub mod manifest;
pub mod options;
pub mod product;
pub mod report;
pub mod runtime;
pub mod templates;
pub mod update;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ModuleError, ScaffoldError};
pub use manifest::{merge_object, PackageManifest};
pub use options::{ProjectOptions, UpdateFlags, UpdateTarget};
pub use product::ProductConfig;
pub use report::{ConsoleReporter, Reporter};
pub use runtime::PackageManager;
pub use templates::{
    add_module, resolve_module, scaffold_project, ModuleOutcome, ScaffoldSummary,
    TemplateCatalog, TemplateLayout,
};

#[cfg(feature = "tui")]
pub use tui::run;
