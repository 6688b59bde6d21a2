//! Read access to a Quality Measure Document through the study definition contract.
//!
//! [`QmdStudyDefinition`] is an adapter. It keeps the document tree as is and answers
//! [`StudyDefinition`] queries by walking it, so items are borrowed from the section entries in
//! their stored order.
//!
//! Codes are passed through as stored. An item coded with the legacy fallback reads back with its
//! id as code and the legacy code system.

use super::document::{Entry, QualityMeasureDocument};
use crate::public_structs::{StudyDefinition, StudyDefinitionItemRef};
use crate::{QmdError, QmdResult};
use studydef_ids::{to_internal_id, StudyDefinitionId};

/// A QMD exposed as a study definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QmdStudyDefinition {
    document: QualityMeasureDocument,
    id: Option<StudyDefinitionId>,
}

/// Wraps `document` as a study definition view.
///
/// The internal id is derived from the document id extension. A document that has not been
/// stored yet has no extension and therefore no id.
///
/// # Errors
///
/// Returns:
/// - [`QmdError::MalformedDocument`] if the document id, title or data criteria section is
///   missing,
/// - [`QmdError::InvalidId`] if the document id extension is not a valid document id.
pub fn wrap_document(document: QualityMeasureDocument) -> QmdResult<QmdStudyDefinition> {
    let Some(document_id) = document.id.as_ref() else {
        return Err(QmdError::MalformedDocument("document has no id".into()));
    };
    if document.title.is_none() {
        return Err(QmdError::MalformedDocument("document has no title".into()));
    }
    if document.section().is_none() {
        return Err(QmdError::MalformedDocument(
            "document has no data criteria section".into(),
        ));
    }

    let id = document_id
        .extension
        .as_deref()
        .map(to_internal_id)
        .transpose()?;

    Ok(QmdStudyDefinition { document, id })
}

impl QmdStudyDefinition {
    /// The wrapped document.
    pub fn document(&self) -> &QualityMeasureDocument {
        &self.document
    }

    pub fn into_document(self) -> QualityMeasureDocument {
        self.document
    }
}

fn item_view(entry: &Entry) -> StudyDefinitionItemRef<'_> {
    let code = &entry.observation.code;
    StudyDefinitionItemRef {
        id: &code.code,
        name: code.display_name.as_deref().unwrap_or(&code.code),
        description: entry.observation.original_text.as_deref(),
        code: Some(&code.code),
        code_system: Some(&code.code_system),
    }
}

impl StudyDefinition for QmdStudyDefinition {
    fn id(&self) -> Option<&StudyDefinitionId> {
        self.id.as_ref()
    }

    fn name(&self) -> Option<&str> {
        self.document.title.as_deref()
    }

    /// Names of the persons in the structured author blocks.
    fn authors(&self) -> Vec<&str> {
        self.document
            .author
            .iter()
            .filter_map(|participation| participation.assigned_person.assigned_person.as_ref())
            .flat_map(|person| person.name.iter().map(String::as_str))
            .collect()
    }

    /// The structured author block carries no contact details.
    fn author_email(&self) -> Option<&str> {
        None
    }

    fn items(&self) -> Box<dyn Iterator<Item = StudyDefinitionItemRef<'_>> + '_> {
        Box::new(
            self.document
                .section()
                .into_iter()
                .flat_map(|section| section.entry.iter())
                .map(item_view),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poqm::builder::build_document;
    use crate::poqm::constants::LEGACY_ITEM_CODE_SYSTEM;
    use crate::public_structs::{StudyDefinitionData, StudyDefinitionItemData};
    use studydef_ids::IdError;
    use studydef_types::LocalizedText;

    fn definition() -> StudyDefinitionData {
        let mut definition = StudyDefinitionData::new("Diabetes Cohort");
        definition.authors = vec!["Jane Doe".into()];
        definition.author_email = Some("jane@example.org".into());
        definition.items = vec![
            StudyDefinitionItemData::new("ITEM1", "Glucose")
                .with_description(LocalizedText::plain("Fasting glucose")),
            StudyDefinitionItemData::new("ITEM2", "HbA1c")
                .with_code("4548-4", "2.16.840.1.113883.6.1"),
            StudyDefinitionItemData::new("ITEM3", "Insulin"),
        ];
        definition
    }

    fn stored(extension: &str) -> QualityMeasureDocument {
        let mut document = build_document(&definition()).expect("build");
        if let Some(id) = document.id.as_mut() {
            id.extension = Some(extension.to_string());
        }
        document
    }

    #[test]
    fn item_names_survive_build_and_wrap() {
        let source = definition();
        let view = wrap_document(build_document(&source).expect("build")).expect("wrap");

        let built: Vec<&str> = source.items().map(|i| i.name).collect();
        let read: Vec<&str> = view.items().map(|i| i.name).collect();
        assert_eq!(built, read);
        assert_eq!(view.name(), Some("Diabetes Cohort"));
    }

    #[test]
    fn name_with_surrounding_whitespace_survives_build_and_wrap() {
        let mut source = definition();
        source.name = Some("  Diabetes Cohort ".into());
        let view = wrap_document(build_document(&source).expect("build")).expect("wrap");
        assert_eq!(view.name(), source.name());
    }

    #[test]
    fn unstored_document_has_no_id() {
        let view = wrap_document(build_document(&definition()).expect("build")).expect("wrap");
        assert_eq!(view.id(), None);
    }

    #[test]
    fn id_comes_from_document_id_extension() {
        let view = wrap_document(stored("550e8400e29b41d4a716446655440000")).expect("wrap");
        assert_eq!(
            view.id().map(StudyDefinitionId::as_str),
            Some("studydefinition_550e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn invalid_extension_is_rejected() {
        let err = wrap_document(stored("not a valid id")).expect_err("invalid extension");
        assert!(matches!(err, QmdError::InvalidId(IdError::InvalidId(_))));
    }

    #[test]
    fn codes_pass_through_as_stored() {
        let view = wrap_document(stored("abc")).expect("wrap");
        let items: Vec<_> = view.items().collect();

        assert_eq!(items[0].id, "ITEM1");
        assert_eq!(items[0].code, Some("ITEM1"));
        assert_eq!(items[0].code_system, Some(LEGACY_ITEM_CODE_SYSTEM));
        assert_eq!(items[0].description, Some("Fasting glucose"));

        assert_eq!(items[1].code, Some("4548-4"));
        assert_eq!(items[1].code_system, Some("2.16.840.1.113883.6.1"));
        assert_eq!(items[1].description, None);
    }

    #[test]
    fn authors_come_from_structured_block() {
        let view = wrap_document(stored("abc")).expect("wrap");
        assert_eq!(view.authors(), ["Onderzoeker X"]);
        assert_eq!(view.author_email(), None);
    }

    #[test]
    fn missing_display_name_falls_back_to_code() {
        let mut document = stored("abc");
        if let Some(section) = document.component[0].section.as_mut() {
            section.entry[0].observation.code.display_name = None;
        }
        let view = wrap_document(document).expect("wrap");
        assert_eq!(view.items().next().map(|i| i.name), Some("ITEM1"));
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        let mut no_id = stored("abc");
        no_id.id = None;

        let mut no_title = stored("abc");
        no_title.title = None;

        let mut no_section = stored("abc");
        no_section.component.clear();

        for document in [no_id, no_title, no_section] {
            let err = wrap_document(document).expect_err("malformed");
            assert!(matches!(err, QmdError::MalformedDocument(_)));
        }
    }

    #[test]
    fn into_document_returns_the_wrapped_tree() {
        let document = stored("abc");
        let view = wrap_document(document.clone()).expect("wrap");
        assert_eq!(view.document(), &document);
        assert_eq!(view.into_document(), document);
    }

    #[test]
    fn owned_copy_from_view() {
        let view = wrap_document(stored("abc")).expect("wrap");
        let copy = StudyDefinitionData::from_view(&view);
        assert_eq!(copy.name.as_deref(), Some("Diabetes Cohort"));
        assert_eq!(copy.items.len(), 3);
        assert_eq!(
            copy.id.as_ref().map(StudyDefinitionId::as_str),
            Some("studydefinition_abc")
        );
    }
}
