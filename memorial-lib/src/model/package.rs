//! Paid publication packages

use serde::Deserialize;
use serde::Serialize;

use super::LocalizedText;
use super::Resource;
use super::default_true;

fn default_currency() -> String {
    "EUR".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Vec<LocalizedText>,
    #[serde(default)]
    pub description: Vec<LocalizedText>,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// How long a tribute stays published, in days.
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Package {
    /// Price with two decimals and the currency code, e.g. `49.00 EUR`.
    pub fn display_price(&self) -> String {
        format!("{:.2} {}", self.price, self.currency)
    }
}

impl Resource for Package {
    const PATH: &'static str = "packages";
    const COLLECTION_KEY: &'static str = "packages";
    const SINGULAR_KEY: &'static str = "package";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_price() {
        let package: Package =
            serde_json::from_str(r#"{"_id":"p1","price":49,"durationDays":30}"#).unwrap();
        assert_eq!(package.display_price(), "49.00 EUR");
        assert_eq!(package.duration_days, 30);
    }
}
