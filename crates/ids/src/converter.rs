//! Conversion between internal study definition ids and external document ids.

use crate::{CanonicalUuid, IdError, IdResult};
use std::{fmt, str::FromStr};

/// Prefix that places an external document id into the internal id space.
pub const INTERNAL_ID_PREFIX: &str = "studydefinition_";

/// Maximum length of an external document id.
pub const MAX_DOCUMENT_ID_LEN: usize = 253;

/// Identifier of a document in the external store.
///
/// Valid ids are 1 to [`MAX_DOCUMENT_ID_LEN`] ASCII characters drawn from letters, digits,
/// `.`, `-` and `_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Validates and wraps an external document id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidId`] if `input` is empty, too long, or contains characters
    /// outside the permitted set.
    pub fn parse(input: &str) -> IdResult<Self> {
        validate_document_id(input)?;
        Ok(Self(input.to_string()))
    }

    /// Allocates a fresh document id in canonical UUID form.
    pub fn generate() -> Self {
        Self::from(CanonicalUuid::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CanonicalUuid> for DocumentId {
    fn from(uuid: CanonicalUuid) -> Self {
        Self(uuid.to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifier of a study definition in the internal (domain) id space.
///
/// Always of the form `studydefinition_<document id>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudyDefinitionId(String);

impl StudyDefinitionId {
    /// Validates and wraps an internal study definition id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidId`] if the prefix is missing or the remainder is not a valid
    /// external document id.
    pub fn parse(input: &str) -> IdResult<Self> {
        let remainder = input.strip_prefix(INTERNAL_ID_PREFIX).ok_or_else(|| {
            IdError::InvalidId(format!(
                "study definition id must start with '{INTERNAL_ID_PREFIX}', got: '{input}'"
            ))
        })?;
        validate_document_id(remainder)?;
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudyDefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StudyDefinitionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Converts an internal study definition id into the external document id it refers to.
///
/// Exact inverse of [`to_internal_id`].
///
/// # Errors
///
/// Returns [`IdError::InvalidId`] if `internal` is not a valid internal id.
pub fn to_external_id(internal: &str) -> IdResult<DocumentId> {
    let id = StudyDefinitionId::parse(internal)?;
    // parse() has checked the prefix and the remainder
    Ok(DocumentId(id.0[INTERNAL_ID_PREFIX.len()..].to_string()))
}

/// Converts an external document id into the internal study definition id space.
///
/// Exact inverse of [`to_external_id`].
///
/// # Errors
///
/// Returns [`IdError::InvalidId`] if `external` is not a valid document id.
pub fn to_internal_id(external: &str) -> IdResult<StudyDefinitionId> {
    let id = DocumentId::parse(external)?;
    Ok(StudyDefinitionId(format!("{INTERNAL_ID_PREFIX}{id}")))
}

fn validate_document_id(input: &str) -> IdResult<()> {
    if input.trim().is_empty() {
        return Err(IdError::InvalidId("document id cannot be empty".into()));
    }

    if input.len() > MAX_DOCUMENT_ID_LEN {
        return Err(IdError::InvalidId(format!(
            "document id exceeds maximum length of {MAX_DOCUMENT_ID_LEN} characters"
        )));
    }

    let ok = input
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));
    if !ok {
        return Err(IdError::InvalidId(format!(
            "document id contains invalid characters (only alphanumeric, '.', '-', '_' allowed): '{input}'"
        )));
    }

    Ok(())
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{DocumentId, StudyDefinitionId};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for DocumentId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.0)
        }
    }

    impl<'de> Deserialize<'de> for DocumentId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::parse(&s).map_err(serde::de::Error::custom)
        }
    }

    impl Serialize for StudyDefinitionId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.0)
        }
    }

    impl<'de> Deserialize<'de> for StudyDefinitionId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::parse(&s).map_err(serde::de::Error::custom)
        }
    }
}
