//! Identifier spaces for study definitions.
//!
//! Two id spaces meet at the document-mapping boundary:
//!
//! - the **internal** space used by the study definition domain ([`StudyDefinitionId`]), and
//! - the **external** space used by the document store ([`DocumentId`]).
//!
//! They are related by a lossless prefix mapping:
//!
//! ```text
//! external:  550e8400e29b41d4a716446655440000
//! internal:  studydefinition_550e8400e29b41d4a716446655440000
//! ```
//!
//! All translation between the two goes through [`to_internal_id`] and [`to_external_id`]; no
//! other code should build or slice id strings by hand.
//!
//! This crate also provides [`CanonicalUuid`], the 32-lowercase-hex UUID form that stores use
//! when they mint their own document ids, together with the sharded directory layout derived
//! from it.

mod canonical;
mod converter;

pub use canonical::{CanonicalUuid, Uuid};
pub use converter::{
    to_external_id, to_internal_id, DocumentId, StudyDefinitionId, INTERNAL_ID_PREFIX,
    MAX_DOCUMENT_ID_LEN,
};

/// Error type for identifier operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input does not match the expected id-space format.
    #[error("invalid id: {0}")]
    InvalidId(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
