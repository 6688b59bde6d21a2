//! Text primitives shared by the study definition crates.
//!
//! - [`LocalizedText`]: language-tagged text as carried by catalog item descriptions.

mod localized;

pub use localized::{LocalizedText, DEFAULT_LANGUAGE};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// A language tag was empty or contained characters outside `[A-Za-z0-9-]`
    #[error("invalid language tag: '{0}'")]
    InvalidLanguage(String),
}
