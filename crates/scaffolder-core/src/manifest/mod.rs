//! Package manifest (`package.json`) handling
//!
//! This module provides:
//! - The recursive deep merge used to layer module fragments onto the base
//! - Loading, stamping and persisting a project's manifest

pub mod merge;
pub mod package;

pub use merge::merge_object;
pub use package::{PackageManifest, MANIFEST_FILE, SCHEMA_KEY};
