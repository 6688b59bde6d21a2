//! Language-tagged text.
//!
//! Catalog item descriptions arrive either as plain strings or as i18n objects such as
//! `{"en": "Fasting glucose", "nl": "Nuchter glucose"}`. [`LocalizedText`] stores both forms as a
//! map from language tag to text and resolves a single display value on demand.

use crate::TextError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Language used for plain (untagged) text and preferred when resolving.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Text available in one or more languages.
///
/// Serialises as a mapping of language tag to text. Deserialises from either such a mapping,
/// whose tags are checked like [`LocalizedText::with`], or a string, which is interpreted with
/// [`LocalizedText::from_raw`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Creates text in the default language.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(DEFAULT_LANGUAGE.to_string(), text.into());
        Self(values)
    }

    /// Adds (or replaces) the text for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidLanguage`] if the tag is empty or contains characters other
    /// than ASCII letters, digits and `-`.
    pub fn with(mut self, language: &str, text: impl Into<String>) -> Result<Self, TextError> {
        check_language(language)?;
        self.0.insert(language.to_string(), text.into());
        Ok(self)
    }

    /// Builds text from a language map, checking every tag as [`LocalizedText::with`] does.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidLanguage`] for the first invalid tag.
    pub fn from_map(values: BTreeMap<String, String>) -> Result<Self, TextError> {
        for language in values.keys() {
            check_language(language)?;
        }
        Ok(Self(values))
    }

    /// Interprets a raw description as stored by catalog sources.
    ///
    /// A JSON object of string values keyed by valid language tags is read as an i18n map;
    /// anything else is plain text in the default language.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        if trimmed.starts_with('{') {
            if let Ok(values) = serde_json::from_str::<BTreeMap<String, String>>(trimmed) {
                if let Ok(text) = Self::from_map(values) {
                    return text;
                }
            }
        }
        Self::plain(raw)
    }

    /// Returns the text for `language`, if present.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    /// Resolves the display value: the default language first, otherwise the first language in
    /// tag order.
    pub fn resolve(&self) -> Option<&str> {
        self.get(DEFAULT_LANGUAGE)
            .or_else(|| self.0.values().next().map(String::as_str))
    }
}

fn check_language(language: &str) -> Result<(), TextError> {
    let valid = !language.is_empty()
        && language
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(TextError::InvalidLanguage(language.to_string()))
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Tagged(BTreeMap<String, String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Plain(text) => Ok(Self::from_raw(&text)),
            Raw::Tagged(values) => Self::from_map(values).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_default_language() {
        let text = LocalizedText::plain("Fasting glucose")
            .with("nl", "Nuchter glucose")
            .expect("valid tag");
        assert_eq!(text.resolve(), Some("Fasting glucose"));
        assert_eq!(text.get("nl"), Some("Nuchter glucose"));
    }

    #[test]
    fn resolve_falls_back_to_first_language() {
        let text = LocalizedText::default()
            .with("nl", "Nuchter glucose")
            .and_then(|t| t.with("de", "Nüchternglukose"))
            .expect("valid tags");
        assert_eq!(text.resolve(), Some("Nüchternglukose"));
    }

    #[test]
    fn resolve_on_empty_text_is_none() {
        assert_eq!(LocalizedText::default().resolve(), None);
    }

    #[test]
    fn from_raw_reads_i18n_objects() {
        let text = LocalizedText::from_raw(r#"{"en":"Weight","nl":"Gewicht"}"#);
        assert_eq!(text.get("en"), Some("Weight"));
        assert_eq!(text.get("nl"), Some("Gewicht"));
    }

    #[test]
    fn from_raw_keeps_plain_and_broken_json_as_text() {
        assert_eq!(LocalizedText::from_raw("Weight").resolve(), Some("Weight"));
        assert_eq!(
            LocalizedText::from_raw("{not json").resolve(),
            Some("{not json")
        );
    }

    #[test]
    fn with_rejects_bad_language_tags() {
        let err = LocalizedText::default()
            .with("n l", "x")
            .expect_err("space not allowed");
        assert!(matches!(err, TextError::InvalidLanguage(tag) if tag == "n l"));
    }

    #[test]
    fn deserializes_plain_string_and_map() {
        let plain: LocalizedText = serde_json::from_str("\"Height\"").expect("plain");
        assert_eq!(plain.get("en"), Some("Height"));

        let tagged: LocalizedText =
            serde_json::from_str(r#"{"nl":"Lengte"}"#).expect("tagged");
        assert_eq!(tagged.resolve(), Some("Lengte"));
    }

    #[test]
    fn deserialize_rejects_bad_language_tags() {
        let err = serde_json::from_str::<LocalizedText>(r#"{"n l":"x"}"#).expect_err("bad tag");
        assert!(err.to_string().contains("invalid language tag: 'n l'"));
    }

    #[test]
    fn from_raw_keeps_objects_with_bad_tags_as_text() {
        let raw = r#"{"n l":"x"}"#;
        assert_eq!(LocalizedText::from_raw(raw).get("en"), Some(raw));
    }

    #[test]
    fn deserializes_embedded_i18n_string() {
        let text: LocalizedText =
            serde_json::from_str(r#""{\"en\":\"Weight\",\"nl\":\"Gewicht\"}""#).expect("raw");
        assert_eq!(text.get("nl"), Some("Gewicht"));
        assert_eq!(text.resolve(), Some("Weight"));
    }
}
