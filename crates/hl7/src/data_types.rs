//! HL7 v3 data types used by the QMD tree.
//!
//! The generated HL7 schema has one wrapper type per data type (`II`, `CE`, `CD`, `CS`, `ED`,
//! `ST`, `INT`, ...). The QMD only needs two structured shapes, so they are modelled once:
//!
//! - [`Identifier`]: instance identifier (`II`), an OID root with an optional extension.
//! - [`CodedValue`]: concept descriptor (`CD`/`CE`), a code within a code system.
//!
//! Plain strings stand in for the text types (`ST`, `ED`, `PN`, `ON`) and the simple codes
//! (`CS`).

use serde::{Deserialize, Serialize};

/// HL7 v3 instance identifier (`II`).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Identifier {
    /// OID naming the identifier scheme.
    pub root: String,

    /// Identifier within the scheme; absent when the root alone identifies the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Identifier {
    /// Identifier consisting of a root only.
    pub fn root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: None,
        }
    }

    /// Identifier with both root and extension.
    pub fn new(root: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: Some(extension.into()),
        }
    }
}

/// HL7 v3 concept descriptor (`CD`/`CE`).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CodedValue {
    pub code: String,

    /// OID of the code system `code` belongs to.
    pub code_system: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl CodedValue {
    pub fn new(
        code: impl Into<String>,
        code_system: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            code_system: code_system.into(),
            display_name: Some(display_name.into()),
        }
    }
}
