//! External collaborators of the study definition service.
//!
//! Storage and bulk loading live outside this crate. The service reaches them through these
//! traits so that deployments can plug in their own backends; [`FileResourceStore`] is the
//! reference store shipped with the workspace.
//!
//! [`FileResourceStore`]: crate::repositories::file_store::FileResourceStore

use crate::error::{CatalogError, DataQueryError, StoreResult};
use hl7::QualityMeasureDocument;
use serde::Serialize;
use studydef_ids::DocumentId;

/// Summary of a stored document, as listed by a [`ResourceStore`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudyDefinitionInfo {
    pub id: DocumentId,
    pub title: String,
}

/// Persistent storage of Quality Measure Documents, keyed by external document id.
pub trait ResourceStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) if no document has this id.
    fn find_by_id(&self, id: &DocumentId) -> StoreResult<QualityMeasureDocument>;

    fn list(&self) -> StoreResult<Vec<StudyDefinitionInfo>>;

    /// Stores `document` and returns the id it was stored under.
    fn save(&self, document: &QualityMeasureDocument) -> StoreResult<DocumentId>;
}

/// Loads the catalog contents of a study definition into the research data store.
pub trait CatalogLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCatalog`] if no catalog exists for `id`.
    ///
    /// `id` is the study definition id exactly as the caller passed it to the service.
    fn load_catalog(&self, id: &str) -> Result<(), CatalogError>;
}

/// Loads the measured values selected by a stored document.
pub trait DataQueryLoader: Send + Sync {
    fn load_data(&self, document: &QualityMeasureDocument) -> Result<(), DataQueryError>;
}
