//! Quality Measure Document tree and its YAML representation.
//!
//! The tree mirrors the `POQM_MT000001UV` message shape with plain value types:
//!
//! ```text
//! QualityMeasureDocument
//! ├── type_id, id, code, title, text, status_code, set_id, version_number
//! ├── author[]    Participation → AssignedEntity → Person / Organization → ContactParty
//! ├── custodian   Participation → AssignedEntity
//! └── component[] Component → Section → Entry[] → Observation
//! ```
//!
//! Notes:
//! - `id`, `title` and the component section are optional in the schema. Their absence is a
//!   reader-level error ([`QmdError::MalformedDocument`]) rather than a parse error.
//! - All structs use `#[serde(deny_unknown_fields)]`.

use crate::data_types::{CodedValue, Identifier};
use crate::{QmdError, QmdResult};
use serde::{Deserialize, Serialize};

/// HL7 v3 Quality Measure Document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QualityMeasureDocument {
    pub type_id: Identifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,

    /// Document classification.
    pub code: CodedValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-text summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub status_code: String,

    pub set_id: Identifier,

    pub version_number: u32,

    #[serde(default)]
    pub author: Vec<Participation>,

    pub custodian: Participation,

    #[serde(default)]
    pub component: Vec<Component>,
}

/// Author or custodian participation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Participation {
    pub type_code: String,
    pub assigned_person: AssignedEntity,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AssignedEntity {
    pub class_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_person: Option<Person>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub represented_organization: Option<Organization>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Person {
    pub class_code: String,
    pub determiner_code: String,
    #[serde(default)]
    pub name: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Organization {
    pub class_code: String,
    pub determiner_code: String,
    #[serde(default)]
    pub id: Vec<Identifier>,
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub contact_party: Vec<ContactParty>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContactParty {
    pub class_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_flavor: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub code: CodedValue,
    pub title: String,
    /// Human-readable rendering of the section.
    pub text: SectionText,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// Structured narrative: a list with one line per item.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionText {
    #[serde(default)]
    pub list: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    pub type_code: String,
    pub observation: Observation,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Observation {
    pub class_code: String,
    pub mood_code: String,
    pub code: CodedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl QualityMeasureDocument {
    /// Returns the first section found in the document components.
    pub fn section(&self) -> Option<&Section> {
        self.component.iter().find_map(|c| c.section.as_ref())
    }

    /// Parse a document from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `component[0].section.entry[1].observation.code`) to the failing field when the YAML does
    /// not match the schema.
    ///
    /// # Errors
    ///
    /// Returns [`QmdError::Translation`] if:
    /// - the YAML is not a document mapping,
    /// - any field has an unexpected type,
    /// - any unknown keys are present.
    pub fn parse_yaml(yaml_text: &str) -> QmdResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        serde_path_to_error::deserialize::<_, Self>(deserializer).map_err(|err| {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            QmdError::Translation(format!(
                "Quality measure document schema mismatch at {path}: {source}"
            ))
        })
    }

    /// Render the document as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`QmdError::Translation`] if serialisation fails.
    pub fn render_yaml(&self) -> QmdResult<String> {
        serde_yaml::to_string(self).map_err(|e| {
            QmdError::Translation(format!("Failed to serialize quality measure document: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"type_id:
  root: "2.16.840.1.113883.1.3"
  extension: "POQM_HD000001"
id:
  root: "2.16.840.1.113883.2.4.3.8.1000.54.7"
  extension: "550e8400e29b41d4a716446655440000"
code:
  code: "57024-2"
  code_system: "2.16.840.1.113883.6.1"
  display_name: "Health Quality Measure document"
title: "Diabetes Cohort"
text: "Created by Jane Doe (jane@example.org)"
status_code: "active"
set_id:
  root: "1.1.1"
  extension: "example"
version_number: 1
author:
  - type_code: "AUT"
    assigned_person:
      class_code: "ASSIGNED"
      assigned_person:
        class_code: "PSN"
        determiner_code: "INSTANCE"
        name: ["Onderzoeker X"]
      represented_organization:
        class_code: "ORG"
        determiner_code: "INSTANCE"
        id:
          - root: "2.16.840.1.113883.19.5"
        name: ["UMCG"]
        contact_party:
          - class_code: "CON"
            null_flavor: "UNK"
custodian:
  type_code: "CST"
  assigned_person:
    class_code: "ASSIGNED"
component:
  - section:
      code:
        code: "57025-9"
        code_system: "2.16.840.1.113883.6.1"
        display_name: "Data Criteria section"
      title: "Data criteria"
      text:
        list: ["Glucose", "HbA1c"]
      entry:
        - type_code: "DRIV"
          observation:
            class_code: "OBS"
            mood_code: "CRT"
            code:
              code: "ITEM1"
              code_system: "2.16.840.1.113883.2.4.3.8.1000.54.4"
              display_name: "Glucose"
            original_text: "Fasting glucose"
        - type_code: "DRIV"
          observation:
            class_code: "OBS"
            mood_code: "CRT"
            code:
              code: "4548-4"
              code_system: "2.16.840.1.113883.6.1"
              display_name: "HbA1c"
"#;

    #[test]
    fn round_trips_sample_yaml() {
        let document = QualityMeasureDocument::parse_yaml(SAMPLE).expect("parse yaml");
        let output = document.render_yaml().expect("render document");
        let reparsed = QualityMeasureDocument::parse_yaml(&output).expect("reparse yaml");
        assert_eq!(document, reparsed);
    }

    #[test]
    fn section_finds_data_criteria() {
        let document = QualityMeasureDocument::parse_yaml(SAMPLE).expect("parse yaml");
        let section = document.section().expect("section present");
        assert_eq!(section.title, "Data criteria");
        assert_eq!(section.entry.len(), 2);
        assert_eq!(section.text.list, ["Glucose", "HbA1c"]);
        assert_eq!(section.entry[1].observation.original_text, None);
    }

    #[test]
    fn parse_accepts_missing_reader_fields() {
        let without_title = SAMPLE.replace("title: \"Diabetes Cohort\"\n", "");
        let document = QualityMeasureDocument::parse_yaml(&without_title).expect("parse yaml");
        assert_eq!(document.title, None);

        let without_id = SAMPLE.replace(
            "id:\n  root: \"2.16.840.1.113883.2.4.3.8.1000.54.7\"\n  extension: \"550e8400e29b41d4a716446655440000\"\n",
            "",
        );
        let document = QualityMeasureDocument::parse_yaml(&without_id).expect("parse yaml");
        assert_eq!(document.id, None);
        assert!(document.section().is_some());
    }

    #[test]
    fn strict_value_rejects_unknown_keys() {
        let input = format!("{SAMPLE}unexpected_key: \"should fail\"\n");

        let err = QualityMeasureDocument::parse_yaml(&input).expect_err("unknown key");
        match err {
            QmdError::Translation(msg) => {
                assert!(msg.contains("unexpected_key"));
                assert!(msg.contains("unknown field"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn strict_value_rejects_wrong_types() {
        let input = SAMPLE.replace("version_number: 1", "version_number: \"one\"");

        let err = QualityMeasureDocument::parse_yaml(&input).expect_err("wrong type");
        match err {
            QmdError::Translation(msg) => {
                assert!(msg.contains("version_number"));
                assert!(msg.contains("invalid type"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn schema_errors_report_nested_path() {
        let input = SAMPLE.replace("mood_code: \"CRT\"", "mood_code: [\"CRT\"]");

        let err = QualityMeasureDocument::parse_yaml(&input).expect_err("wrong nested type");
        match err {
            QmdError::Translation(msg) => {
                assert!(msg.contains("component[0].section.entry[0].observation.mood_code"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rendered_yaml_omits_absent_optionals() {
        let document = QualityMeasureDocument::parse_yaml(SAMPLE).expect("parse yaml");
        let yaml = document.render_yaml().expect("render");
        assert!(!yaml.contains(": null"));
        assert!(!yaml.contains("~"));
        assert!(yaml.contains("UMCG"));
    }
}
