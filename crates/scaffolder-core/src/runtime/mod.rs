//! Package managers and external tools
//!
//! This module provides:
//! - Package manager detection and command construction
//! - Post-scaffold steps (dependency updates, install, git init)

pub mod pkg_man;
pub mod tasks;

pub use pkg_man::{ExternalCommand, PackageManager, PackageRunner};
pub use tasks::{check_updates, init_git, install_dependencies, tool_version};
