use studydef_ids::{DocumentId, IdError};

/// Errors reported by a [`ResourceStore`](crate::ResourceStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    #[error("document store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("document store error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors reported by a [`CatalogLoader`](crate::CatalogLoader).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown catalog: {0}")]
    UnknownCatalog(String),
    #[error("catalog loader error: {0}")]
    Backend(String),
}

/// Errors reported by a [`DataQueryLoader`](crate::DataQueryLoader).
#[derive(Debug, thiserror::Error)]
pub enum DataQueryError {
    #[error("data query failed: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StudyDefinitionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    InvalidId(#[from] IdError),

    #[error("unknown study definition: {0}")]
    UnknownStudyDefinition(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Qmd(#[from] hl7::QmdError),

    #[error(transparent)]
    Catalog(CatalogError),

    #[error(transparent)]
    DataQuery(#[from] DataQueryError),

    #[error("{0} is not configured")]
    CollaboratorUnavailable(&'static str),
}

pub type StudyDefinitionResult<T> = std::result::Result<T, StudyDefinitionError>;
