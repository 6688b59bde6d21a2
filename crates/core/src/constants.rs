//! Constants used throughout the study definition core crate.
//!
//! This module contains the path, filename and environment variable names so that the store,
//! the configuration and the binary agree on them.

/// Environment variable naming the root directory of the file-system document store.
pub const DOCUMENT_DIR_ENV: &str = "STUDYDEF_DOCUMENT_DIR";

/// Default directory for stored documents when no explicit directory is configured.
pub const DEFAULT_DOCUMENT_DIR: &str = "study_definitions";

/// Filename of a stored Quality Measure Document inside its sharded directory.
pub const DOCUMENT_FILENAME: &str = "quality_measure_document.yaml";

/// Attempts at allocating an unused sharded directory before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;
