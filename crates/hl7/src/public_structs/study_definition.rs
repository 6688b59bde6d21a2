//! Study definition view contract and owned carrier types.
//!
//! A study definition is exposed through the [`StudyDefinition`] trait so that both a
//! caller-constructed [`StudyDefinitionData`] and a document-backed
//! [`QmdStudyDefinition`](crate::QmdStudyDefinition) can be handed to the same code without
//! converting one into the other.
//!
//! Items are yielded as [`StudyDefinitionItemRef`] borrows, lazily and in definition order.

use serde::{Deserialize, Serialize};
use studydef_ids::StudyDefinitionId;
use studydef_types::LocalizedText;

/// Read access to a study definition.
pub trait StudyDefinition {
    /// Identifier in the internal id space; `None` until the definition has been persisted.
    fn id(&self) -> Option<&StudyDefinitionId>;

    fn name(&self) -> Option<&str>;

    /// Author names in order.
    fn authors(&self) -> Vec<&str>;

    fn author_email(&self) -> Option<&str>;

    /// Catalog items in definition order.
    fn items(&self) -> Box<dyn Iterator<Item = StudyDefinitionItemRef<'_>> + '_>;
}

/// Borrowed view of a single catalog item.
///
/// `code` and `code_system` are exposed separately because sources may carry only one of them;
/// see [`resolve_code`](crate::coding::resolve_code) for how such items are coded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudyDefinitionItemRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
    /// Description resolved to a single display language.
    pub description: Option<&'a str>,
    pub code: Option<&'a str>,
    pub code_system: Option<&'a str>,
}

/// A code together with the code system it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemCode {
    pub code: String,
    pub code_system: String,
}

/// Owned study definition, as constructed by callers for each request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyDefinitionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudyDefinitionId>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub author_email: Option<String>,

    #[serde(default)]
    pub items: Vec<StudyDefinitionItemData>,
}

/// Owned catalog item.
///
/// The code and its code system travel together in [`ItemCode`], so an item either carries both
/// or neither.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyDefinitionItemData {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ItemCode>,
}

impl StudyDefinitionData {
    /// Creates an unpersisted definition with the given name and no items.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Copies any study definition view into an owned carrier.
    ///
    /// Item descriptions become single-language text; codes are kept only when both halves are
    /// present.
    pub fn from_view<S: StudyDefinition + ?Sized>(view: &S) -> Self {
        Self {
            id: view.id().cloned(),
            name: view.name().map(str::to_string),
            authors: view.authors().into_iter().map(str::to_string).collect(),
            author_email: view.author_email().map(str::to_string),
            items: view.items().map(StudyDefinitionItemData::from).collect(),
        }
    }
}

impl StudyDefinitionItemData {
    /// Creates an uncoded item without description.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            code: None,
        }
    }

    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>, code_system: impl Into<String>) -> Self {
        self.code = Some(ItemCode {
            code: code.into(),
            code_system: code_system.into(),
        });
        self
    }

    /// Borrowed view of this item.
    pub fn view(&self) -> StudyDefinitionItemRef<'_> {
        StudyDefinitionItemRef {
            id: &self.id,
            name: &self.name,
            description: self.description.as_ref().and_then(LocalizedText::resolve),
            code: self.code.as_ref().map(|c| c.code.as_str()),
            code_system: self.code.as_ref().map(|c| c.code_system.as_str()),
        }
    }
}

impl From<StudyDefinitionItemRef<'_>> for StudyDefinitionItemData {
    fn from(item: StudyDefinitionItemRef<'_>) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.to_string(),
            description: item.description.map(LocalizedText::plain),
            code: match (item.code, item.code_system) {
                (Some(code), Some(code_system)) => Some(ItemCode {
                    code: code.to_string(),
                    code_system: code_system.to_string(),
                }),
                _ => None,
            },
        }
    }
}

impl StudyDefinition for StudyDefinitionData {
    fn id(&self) -> Option<&StudyDefinitionId> {
        self.id.as_ref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn authors(&self) -> Vec<&str> {
        self.authors.iter().map(String::as_str).collect()
    }

    fn author_email(&self) -> Option<&str> {
        self.author_email.as_deref()
    }

    fn items(&self) -> Box<dyn Iterator<Item = StudyDefinitionItemRef<'_>> + '_> {
        Box::new(self.items.iter().map(StudyDefinitionItemData::view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_view_exposes_code_halves() {
        let item = StudyDefinitionItemData::new("ITEM1", "Glucose").with_code("123", "SYS1");
        let view = item.view();
        assert_eq!(view.code, Some("123"));
        assert_eq!(view.code_system, Some("SYS1"));

        let uncoded = StudyDefinitionItemData::new("ITEM2", "HbA1c");
        assert_eq!(uncoded.view().code, None);
        assert_eq!(uncoded.view().code_system, None);
    }

    #[test]
    fn item_view_resolves_description() {
        let description = LocalizedText::default()
            .with("nl", "Nuchter glucose")
            .expect("valid tag");
        let item = StudyDefinitionItemData::new("ITEM1", "Glucose").with_description(description);
        assert_eq!(item.view().description, Some("Nuchter glucose"));
    }

    #[test]
    fn items_are_yielded_in_order() {
        let mut definition = StudyDefinitionData::new("Diabetes Cohort");
        definition.items = vec![
            StudyDefinitionItemData::new("A", "Glucose"),
            StudyDefinitionItemData::new("B", "HbA1c"),
            StudyDefinitionItemData::new("C", "Insulin"),
        ];
        let names: Vec<&str> = definition.items().map(|i| i.name).collect();
        assert_eq!(names, ["Glucose", "HbA1c", "Insulin"]);
    }

    #[test]
    fn from_view_drops_half_codes() {
        let half = StudyDefinitionItemRef {
            id: "X",
            name: "Only code",
            description: None,
            code: Some("123"),
            code_system: None,
        };
        assert_eq!(StudyDefinitionItemData::from(half).code, None);
    }

    #[test]
    fn deserializes_domain_yaml() {
        let yaml = r#"name: "Diabetes Cohort"
authors: ["Jane", "Doe"]
author_email: "jane@example.org"
items:
  - id: ITEM1
    name: Glucose
    description:
      en: Fasting glucose
      nl: Nuchter glucose
    code:
      code: "123"
      code_system: "SYS1"
  - id: ITEM2
    name: HbA1c
    description: Glycated haemoglobin
"#;
        let definition: StudyDefinitionData = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(definition.name(), Some("Diabetes Cohort"));
        assert_eq!(definition.authors(), ["Jane", "Doe"]);
        assert_eq!(definition.items.len(), 2);
        assert_eq!(
            definition.items[0].code,
            Some(ItemCode {
                code: "123".into(),
                code_system: "SYS1".into()
            })
        );
        assert_eq!(
            definition.items[1].view().description,
            Some("Glycated haemoglobin")
        );
    }

    #[test]
    fn rejects_unknown_domain_fields() {
        let yaml = "name: x\nunexpected: 1\n";
        let err = serde_yaml::from_str::<StudyDefinitionData>(yaml).expect_err("unknown key");
        assert!(err.to_string().contains("unknown field"));
    }
}
