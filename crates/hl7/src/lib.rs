//! HL7 v3 Quality Measure Document boundary support.
//!
//! This crate translates between study definitions (a named catalog of research data items) and
//! the HL7 v3 Quality Measure Document (`POQM_MT000001UV`, "QMD") used to exchange them.
//!
//! - [`public_structs`]: the study definition view contract and its owned carrier types.
//! - [`poqm`]: the QMD tree, its protocol constants, the builder and the reader.
//! - [`coding`]: resolution of the coded value embedded for each catalog item.
//!
//! Storage and transport of documents live elsewhere. This crate only handles the document shape
//! and standards alignment.

pub mod coding;
pub mod data_types;
pub mod poqm;
pub mod public_structs;

pub use data_types::{CodedValue, Identifier};
pub use poqm::builder::build_document;
pub use poqm::document::QualityMeasureDocument;
pub use poqm::reader::{wrap_document, QmdStudyDefinition};
pub use public_structs::{
    ItemCode, StudyDefinition, StudyDefinitionData, StudyDefinitionItemData,
    StudyDefinitionItemRef,
};

use studydef_ids::IdError;
use thiserror::Error;

/// Errors returned by the `hl7` boundary crate.
#[derive(Debug, Error)]
pub enum QmdError {
    /// The domain input cannot produce a complete document.
    #[error("cannot build quality measure document: {0}")]
    Build(String),

    /// A document lacks a field the reader requires.
    #[error("malformed quality measure document: {0}")]
    MalformedDocument(String),

    #[error(transparent)]
    InvalidId(#[from] IdError),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`QmdError`].
pub type QmdResult<T> = Result<T, QmdError>;
