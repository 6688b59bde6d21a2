//! # Study Definition Core
//!
//! Core logic for publishing study definitions as HL7 Quality Measure Documents.
//!
//! This crate wires the document mapping engine (`hl7`) to its external collaborators:
//! - [`StudyDefinitionService`]: get, find, load and persist operations
//! - [`ResourceStore`], [`CatalogLoader`], [`DataQueryLoader`]: collaborator contracts
//! - [`FileResourceStore`]: reference store using sharded YAML files under `STUDYDEF_DOCUMENT_DIR`
//!
//! **No transport concerns**: command line handling and process start-up belong in `cli`.

pub mod collaborators;
pub mod config;
pub mod constants;
pub mod error;
pub mod repositories;
pub mod service;

pub use collaborators::{CatalogLoader, DataQueryLoader, ResourceStore, StudyDefinitionInfo};
pub use config::{resolve_document_dir, CoreConfig};
pub use error::{
    CatalogError, DataQueryError, StoreError, StoreResult, StudyDefinitionError,
    StudyDefinitionResult,
};
pub use repositories::file_store::FileResourceStore;
pub use service::StudyDefinitionService;
