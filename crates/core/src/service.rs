//! Study definition service.
//!
//! Orchestrates the document mapping engine and the external collaborators:
//!
//! - `get`: internal id → external id → stored document → study definition view
//! - `find`: store listing, passed through
//! - `load`: catalog load, then data load for the stored document
//! - `persist`: study definition → document → store → internal id set on the definition
//!
//! Ids cross this API in the internal space; only the store sees external ids. The service keeps
//! no state between calls.

use crate::collaborators::{CatalogLoader, DataQueryLoader, ResourceStore, StudyDefinitionInfo};
use crate::error::{CatalogError, StudyDefinitionError, StudyDefinitionResult};
use hl7::{build_document, wrap_document, QmdStudyDefinition, StudyDefinitionData};
use std::sync::Arc;
use studydef_ids::{to_external_id, to_internal_id};

/// Service for study definition operations.
///
/// The resource store is required. The catalog and data query loaders are only needed by
/// [`load_study_definition`](Self::load_study_definition) and are attached with
/// [`with_catalog_loader`](Self::with_catalog_loader) and
/// [`with_data_query_loader`](Self::with_data_query_loader).
#[derive(Clone)]
pub struct StudyDefinitionService {
    store: Arc<dyn ResourceStore>,
    catalog_loader: Option<Arc<dyn CatalogLoader>>,
    data_query_loader: Option<Arc<dyn DataQueryLoader>>,
}

impl StudyDefinitionService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self {
            store,
            catalog_loader: None,
            data_query_loader: None,
        }
    }

    pub fn with_catalog_loader(mut self, loader: Arc<dyn CatalogLoader>) -> Self {
        self.catalog_loader = Some(loader);
        self
    }

    pub fn with_data_query_loader(mut self, loader: Arc<dyn DataQueryLoader>) -> Self {
        self.data_query_loader = Some(loader);
        self
    }

    /// Fetches a stored study definition.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`StudyDefinitionError::InvalidId`] if `id` is not a valid internal id,
    /// - [`StudyDefinitionError::Store`] with [`StoreError::NotFound`](crate::StoreError::NotFound)
    ///   if no document is stored under it,
    /// - [`StudyDefinitionError::Qmd`] if the stored document cannot be read as a study
    ///   definition.
    pub fn get_study_definition(&self, id: &str) -> StudyDefinitionResult<QmdStudyDefinition> {
        let external = to_external_id(id)?;
        tracing::debug!(id, document_id = %external, "fetching study definition");

        let document = self.store.find_by_id(&external)?;
        Ok(wrap_document(document)?)
    }

    /// Lists the stored study definitions.
    ///
    /// # Errors
    ///
    /// Returns [`StudyDefinitionError::Store`] if the store cannot be listed.
    pub fn find_study_definitions(&self) -> StudyDefinitionResult<Vec<StudyDefinitionInfo>> {
        Ok(self.store.list()?)
    }

    /// Loads the catalog and the selected data of a study definition.
    ///
    /// The catalog is loaded first, with `id` as given. When it is unknown the data query loader
    /// is not invoked. The id is converted to the external space only for the store fetch that
    /// follows. A failure after the catalog has been loaded is returned as is; the catalog load is
    /// not undone.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`StudyDefinitionError::CollaboratorUnavailable`] if either loader is not attached,
    /// - [`StudyDefinitionError::UnknownStudyDefinition`] if the catalog loader does not know it,
    /// - [`StudyDefinitionError::InvalidId`] if a known catalog id is not a valid internal id,
    /// - [`StudyDefinitionError::Catalog`], [`StudyDefinitionError::Store`] or
    ///   [`StudyDefinitionError::DataQuery`] for collaborator failures.
    pub fn load_study_definition(&self, id: &str) -> StudyDefinitionResult<()> {
        let catalog_loader = self
            .catalog_loader
            .as_ref()
            .ok_or(StudyDefinitionError::CollaboratorUnavailable("catalog loader"))?;
        let data_query_loader = self
            .data_query_loader
            .as_ref()
            .ok_or(StudyDefinitionError::CollaboratorUnavailable("data query loader"))?;

        catalog_loader.load_catalog(id).map_err(|e| match e {
            CatalogError::UnknownCatalog(_) => {
                StudyDefinitionError::UnknownStudyDefinition(id.to_string())
            }
            other => StudyDefinitionError::Catalog(other),
        })?;
        tracing::info!(id, "catalog loaded");

        let external = to_external_id(id)?;
        let document = self.store.find_by_id(&external)?;
        data_query_loader.load_data(&document)?;
        tracing::info!(id, document_id = %external, "study definition data loaded");

        Ok(())
    }

    /// Builds, stores and identifies a study definition.
    ///
    /// Returns `definition` with its id set to the internal id of the stored document.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`StudyDefinitionError::Qmd`] if no document can be built (e.g. the name is missing),
    /// - [`StudyDefinitionError::Store`] if saving fails,
    /// - [`StudyDefinitionError::InvalidId`] if the store returns an id outside the external id
    ///   space.
    pub fn persist_study_definition(
        &self,
        mut definition: StudyDefinitionData,
    ) -> StudyDefinitionResult<StudyDefinitionData> {
        let document = build_document(&definition)?;
        let external = self.store.save(&document)?;
        let internal = to_internal_id(external.as_str())?;

        tracing::info!(id = %internal, document_id = %external, "study definition persisted");

        definition.id = Some(internal);
        Ok(definition)
    }
}
