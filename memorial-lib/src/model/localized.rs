//! Multilingual text

use serde::Deserialize;
use serde::Serialize;

/// One translation of a text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Language code, e.g. `en`, `hr`.
    pub lang: String,
    pub value: String,
}

impl LocalizedText {
    pub fn new(lang: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            value: value.into(),
        }
    }
}

/// Picks the translation for `lang`, falling back to the first translation.
///
/// Returns an empty string when there are no translations.
///
/// # Example
///
/// ```
/// use memorial_lib::model::{LocalizedText, localized};
///
/// let name = vec![LocalizedText::new("en", "Croatia"), LocalizedText::new("hr", "Hrvatska")];
/// assert_eq!(localized(&name, "hr"), "Hrvatska");
/// assert_eq!(localized(&name, "de"), "Croatia");
/// ```
pub fn localized<'a>(texts: &'a [LocalizedText], lang: &str) -> &'a str {
    texts
        .iter()
        .find(|t| t.lang.eq_ignore_ascii_case(lang))
        .or_else(|| texts.first())
        .map(|t| t.value.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(localized(&[], "en"), "");
    }

    #[test]
    fn test_lang_is_case_insensitive() {
        let texts = vec![LocalizedText::new("EN", "Question")];
        assert_eq!(localized(&texts, "en"), "Question");
    }
}
