//! Construction of a Quality Measure Document from a study definition.
//!
//! The document has a fixed skeleton (root metadata, one author, one custodian) and a single
//! dynamic part, the data criteria section, with one observation entry per catalog item.
//!
//! Notes:
//! - The author and custodian blocks come from a constant template. They do not reflect
//!   [`StudyDefinition::authors`]; the real author names only appear in the free-text summary.
//! - The document id carries the root only. The store assigns the extension on save.

use super::constants::*;
use super::document::{
    AssignedEntity, Component, ContactParty, Entry, Observation, Organization, Participation,
    Person, QualityMeasureDocument, Section, SectionText,
};
use crate::coding::resolve_code;
use crate::data_types::{CodedValue, Identifier};
use crate::public_structs::StudyDefinition;
use crate::{QmdError, QmdResult};

/// Builds a complete QMD tree for `definition`.
///
/// Section entries are emitted in item order, one per item.
///
/// # Errors
///
/// Returns [`QmdError::Build`] if the definition has no name. The name becomes the title
/// verbatim.
pub fn build_document<S: StudyDefinition + ?Sized>(
    definition: &S,
) -> QmdResult<QualityMeasureDocument> {
    let title = definition
        .name()
        .ok_or_else(|| QmdError::Build("study definition has no name".into()))?;

    Ok(QualityMeasureDocument {
        type_id: Identifier::new(TYPE_ID_ROOT, TYPE_ID_EXTENSION),
        id: Some(Identifier::root(DOCUMENT_ID_ROOT)),
        code: CodedValue::new(DOCUMENT_CODE, LOINC_CODE_SYSTEM, DOCUMENT_CODE_DISPLAY_NAME),
        title: Some(title.to_string()),
        text: Some(summary_text(definition)),
        status_code: STATUS_CODE_ACTIVE.to_string(),
        set_id: Identifier::new(SET_ID_ROOT, SET_ID_EXTENSION),
        version_number: VERSION_NUMBER,
        author: vec![author_template()],
        custodian: custodian_template(),
        component: vec![Component {
            section: Some(data_criteria_section(definition)),
        }],
    })
}

/// `Created by <authors> (<email>)`.
fn summary_text<S: StudyDefinition + ?Sized>(definition: &S) -> String {
    format!(
        "{TEXT_CREATED_BY}{} ({})",
        definition.authors().join(" "),
        definition.author_email().unwrap_or_default()
    )
}

fn author_template() -> Participation {
    Participation {
        type_code: PARTICIPATION_AUTHOR.to_string(),
        assigned_person: AssignedEntity {
            class_code: ROLE_CLASS_ASSIGNED.to_string(),
            assigned_person: Some(Person {
                class_code: ENTITY_CLASS_PERSON.to_string(),
                determiner_code: DETERMINER_INSTANCE.to_string(),
                name: vec![AUTHOR_PLACEHOLDER_NAME.to_string()],
            }),
            represented_organization: Some(Organization {
                class_code: ENTITY_CLASS_ORGANIZATION.to_string(),
                determiner_code: DETERMINER_INSTANCE.to_string(),
                id: vec![Identifier::root(ORGANIZATION_ID_ROOT)],
                name: vec![ORGANIZATION_NAME.to_string()],
                contact_party: vec![ContactParty {
                    class_code: ROLE_CLASS_CONTACT.to_string(),
                    null_flavor: Some(NULL_FLAVOR_UNKNOWN.to_string()),
                }],
            }),
        },
    }
}

fn custodian_template() -> Participation {
    Participation {
        type_code: PARTICIPATION_CUSTODIAN.to_string(),
        assigned_person: AssignedEntity {
            class_code: ROLE_CLASS_ASSIGNED.to_string(),
            assigned_person: None,
            represented_organization: None,
        },
    }
}

fn data_criteria_section<S: StudyDefinition + ?Sized>(definition: &S) -> Section {
    let mut list = Vec::new();
    let mut entry = Vec::new();

    for item in definition.items() {
        let resolved = resolve_code(&item);
        if resolved.fallback {
            tracing::debug!(
                item = item.id,
                code_system = resolved.code_system,
                "item has no registry code, using legacy coding"
            );
        }

        list.push(item.name.to_string());
        entry.push(Entry {
            type_code: ENTRY_TYPE_DERIVED.to_string(),
            observation: Observation {
                class_code: ACT_CLASS_OBSERVATION.to_string(),
                mood_code: ACT_MOOD_CRITERION.to_string(),
                code: CodedValue::new(resolved.code, resolved.code_system, item.name),
                original_text: item.description.map(str::to_string),
            },
        });
    }

    Section {
        code: CodedValue::new(SECTION_CODE, LOINC_CODE_SYSTEM, SECTION_CODE_DISPLAY_NAME),
        title: SECTION_TITLE.to_string(),
        text: SectionText { list },
        entry,
    }
}
