//! Error types for scaffolding

use std::path::PathBuf;
use thiserror::Error;

/// Failures while applying a single extra module. All of these are
/// recoverable: the module is skipped or partially applied and the run
/// continues.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Extra {0} does not exist")]
    NotFound(String),

    #[error("Could not copy files for {name}: {source:#}")]
    Copy {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Could not merge package.json for {name}: {source:#}")]
    Manifest {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Failures that end the whole scaffold run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Could not copy base template from {path}: {source:#}")]
    BaseCopy {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },
}
