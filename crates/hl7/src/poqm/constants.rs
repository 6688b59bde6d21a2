//! Protocol-fixed literals of the Quality Measure Document.
//!
//! Downstream consumers of the standard match on these values verbatim. They are not
//! configurable.

/// OID of the LOINC code system.
pub const LOINC_CODE_SYSTEM: &str = "2.16.840.1.113883.6.1";

// Document root

pub const TYPE_ID_ROOT: &str = "2.16.840.1.113883.1.3";
pub const TYPE_ID_EXTENSION: &str = "POQM_HD000001";

/// Root of the document id; the store supplies the extension.
pub const DOCUMENT_ID_ROOT: &str = "2.16.840.1.113883.2.4.3.8.1000.54.7";

pub const DOCUMENT_CODE: &str = "57024-2";
pub const DOCUMENT_CODE_DISPLAY_NAME: &str = "Health Quality Measure document";

pub const STATUS_CODE_ACTIVE: &str = "active";

pub const SET_ID_ROOT: &str = "1.1.1";
pub const SET_ID_EXTENSION: &str = "example";

pub const VERSION_NUMBER: u32 = 1;

/// Lead-in of the free-text summary, followed by the author names and email.
pub const TEXT_CREATED_BY: &str = "Created by ";

// Author and custodian

pub const PARTICIPATION_AUTHOR: &str = "AUT";
pub const PARTICIPATION_CUSTODIAN: &str = "CST";
pub const ROLE_CLASS_ASSIGNED: &str = "ASSIGNED";
pub const ROLE_CLASS_CONTACT: &str = "CON";
pub const ENTITY_CLASS_PERSON: &str = "PSN";
pub const ENTITY_CLASS_ORGANIZATION: &str = "ORG";
pub const DETERMINER_INSTANCE: &str = "INSTANCE";
pub const NULL_FLAVOR_UNKNOWN: &str = "UNK";

/// Name of the assigned person in the author block. Not taken from the study definition.
pub const AUTHOR_PLACEHOLDER_NAME: &str = "Onderzoeker X";

pub const ORGANIZATION_ID_ROOT: &str = "2.16.840.1.113883.19.5";
pub const ORGANIZATION_NAME: &str = "UMCG";

// Data criteria section

pub const SECTION_CODE: &str = "57025-9";
pub const SECTION_CODE_DISPLAY_NAME: &str = "Data Criteria section";
pub const SECTION_TITLE: &str = "Data criteria";

pub const ENTRY_TYPE_DERIVED: &str = "DRIV";
pub const ACT_CLASS_OBSERVATION: &str = "OBS";
pub const ACT_MOOD_CRITERION: &str = "CRT";

/// Code system used for items that carry no code of their own; the item id becomes the code.
pub const LEGACY_ITEM_CODE_SYSTEM: &str = "2.16.840.1.113883.2.4.3.8.1000.54.4";
