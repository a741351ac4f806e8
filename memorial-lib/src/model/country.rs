//! Countries tributes can be published for

use serde::Deserialize;
use serde::Serialize;

use super::LocalizedText;
use super::Resource;
use super::default_true;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Vec<LocalizedText>,
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    #[serde(default)]
    pub phone_code: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub tributes_count: u64,
}

impl Resource for Country {
    const PATH: &'static str = "countries";
    const COLLECTION_KEY: &'static str = "countries";
    const SINGULAR_KEY: &'static str = "country";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::localized;

    #[test]
    fn test_deserialize() {
        let country: Country = serde_json::from_str(
            r#"{"_id":"c1","name":[{"lang":"en","value":"Croatia"},{"lang":"hr","value":"Hrvatska"}],
                "code":"HR","phoneCode":"+385","isActive":false}"#,
        )
        .unwrap();
        assert_eq!(localized(&country.name, "hr"), "Hrvatska");
        assert_eq!(country.phone_code.as_deref(), Some("+385"));
        assert!(!country.is_active);
        assert_eq!(country.tributes_count, 0);
    }
}
