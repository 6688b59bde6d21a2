//! File-system resource store.
//!
//! Each document is stored as YAML in its own sharded directory, named after a freshly allocated
//! canonical UUID which doubles as the external document id:
//!
//! ```text
//! <document_dir>/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         quality_measure_document.yaml
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the UUID.
//!
//! The stored document carries its own id: on save the document id extension is set to the
//! allocated UUID, so a document read back wraps to the internal id it was persisted under.

use crate::collaborators::{ResourceStore, StudyDefinitionInfo};
use crate::config::CoreConfig;
use crate::constants::DOCUMENT_FILENAME;
use crate::error::{StoreError, StoreResult};
use crate::repositories::shared::{create_uuid_and_shard_dir, sharded_leaf_dirs};
use hl7::poqm::constants::DOCUMENT_ID_ROOT;
use hl7::{Identifier, QualityMeasureDocument};
use std::fs;
use std::path::{Path, PathBuf};
use studydef_ids::{CanonicalUuid, DocumentId};

/// [`ResourceStore`] over a sharded directory tree.
#[derive(Clone, Debug)]
pub struct FileResourceStore {
    document_dir: PathBuf,
}

impl FileResourceStore {
    pub fn new(document_dir: impl Into<PathBuf>) -> Self {
        Self {
            document_dir: document_dir.into(),
        }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.document_dir())
    }

    /// Path of the document file for `id`, or `None` if `id` cannot name a document in this
    /// store.
    fn document_path(&self, id: &DocumentId) -> Option<PathBuf> {
        let uuid = CanonicalUuid::parse(id.as_str()).ok()?;
        Some(uuid.sharded_dir(&self.document_dir).join(DOCUMENT_FILENAME))
    }

    fn read_document(path: &Path) -> StoreResult<QualityMeasureDocument> {
        let contents = fs::read_to_string(path)?;
        QualityMeasureDocument::parse_yaml(&contents)
            .map_err(|e| StoreError::Backend(format!("{}: {e}", path.display())))
    }
}

impl ResourceStore for FileResourceStore {
    fn find_by_id(&self, id: &DocumentId) -> StoreResult<QualityMeasureDocument> {
        match self.document_path(id) {
            Some(path) if path.is_file() => Self::read_document(&path),
            _ => Err(StoreError::NotFound(id.clone())),
        }
    }

    /// Lists every readable document, ordered by id.
    ///
    /// Documents that cannot be read or parsed are logged as warnings and skipped.
    fn list(&self) -> StoreResult<Vec<StudyDefinitionInfo>> {
        let mut documents = Vec::new();

        for dir in sharded_leaf_dirs(&self.document_dir) {
            let path = dir.join(DOCUMENT_FILENAME);
            if !path.is_file() {
                continue;
            }

            let id = dir
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| CanonicalUuid::parse(name).ok())
                .map(DocumentId::from);
            let Some(id) = id else {
                tracing::warn!("skipping non-canonical document directory: {}", dir.display());
                continue;
            };

            match Self::read_document(&path) {
                Ok(document) => documents.push(StudyDefinitionInfo {
                    id,
                    title: document.title.unwrap_or_default(),
                }),
                Err(e) => {
                    tracing::warn!("failed to read {}: {}", path.display(), e);
                }
            }
        }

        Ok(documents)
    }

    fn save(&self, document: &QualityMeasureDocument) -> StoreResult<DocumentId> {
        let (uuid, dir) = create_uuid_and_shard_dir(&self.document_dir, CanonicalUuid::new)?;
        let id = DocumentId::from(uuid);

        let mut stored = document.clone();
        match stored.id.as_mut() {
            Some(document_id) => document_id.extension = Some(id.to_string()),
            None => stored.id = Some(Identifier::new(DOCUMENT_ID_ROOT, id.to_string())),
        }

        let written = stored
            .render_yaml()
            .map_err(|e| StoreError::Backend(e.to_string()))
            .and_then(|yaml| Ok(fs::write(dir.join(DOCUMENT_FILENAME), yaml)?));

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_dir_all(&dir) {
                tracing::warn!(
                    "failed to clean up {} after save error: {}",
                    dir.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        tracing::debug!(document_id = %id, "document saved");
        Ok(id)
    }
}
