//! Frequently asked questions shown on the public site

use serde::Deserialize;
use serde::Serialize;

use super::LocalizedText;
use super::Resource;
use super::default_true;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub question: Vec<LocalizedText>,
    #[serde(default)]
    pub answer: Vec<LocalizedText>,
    #[serde(default)]
    pub category: Option<String>,
    /// Display position, ascending.
    #[serde(default, alias = "position")]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Resource for Faq {
    const PATH: &'static str = "faqs";
    const COLLECTION_KEY: &'static str = "faqs";
    const SINGULAR_KEY: &'static str = "faq";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_alias() {
        let faq: Faq =
            serde_json::from_str(r#"{"_id":"f1","question":[],"answer":[],"position":4}"#).unwrap();
        assert_eq!(faq.order, 4);
        assert!(faq.is_active);
    }
}
