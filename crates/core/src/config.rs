//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store and
//! services. Environment variables are never read during request handling.

use crate::constants::DEFAULT_DOCUMENT_DIR;
use crate::{StudyDefinitionError, StudyDefinitionResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    document_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`StudyDefinitionError::InvalidInput`] if `document_dir` is empty.
    pub fn new(document_dir: PathBuf) -> StudyDefinitionResult<Self> {
        if document_dir.as_os_str().is_empty() {
            return Err(StudyDefinitionError::InvalidInput(
                "document_dir cannot be empty".into(),
            ));
        }

        Ok(Self { document_dir })
    }

    /// Root directory of the file-system document store.
    pub fn document_dir(&self) -> &Path {
        &self.document_dir
    }
}

/// Resolve the document directory from an optional override value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DOCUMENT_DIR`].
pub fn resolve_document_dir(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_DIR))
}
