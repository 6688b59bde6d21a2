//! Public domain-level types for external API use.
//!
//! These types describe a study definition independently of the QMD wire shape.

pub mod study_definition;

pub use study_definition::{
    ItemCode, StudyDefinition, StudyDefinitionData, StudyDefinitionItemData,
    StudyDefinitionItemRef,
};
