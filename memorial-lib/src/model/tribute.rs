//! Published obituaries and memorial pages

use chrono::DateTime;
use chrono::Datelike;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Resource;

/// Moderation state of a tribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TributeStatus {
    Draft,
    #[default]
    Pending,
    Published,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl TributeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Published => "Published",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }

    pub const LABELS: [&'static str; 4] = ["Draft", "Pending", "Published", "Rejected"];
}

/// The account that created a tribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TributeAuthor {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tribute {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub deceased_name: String,
    #[serde(default)]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_of_death: Option<DateTime<Utc>>,
    #[serde(default)]
    pub place: Option<String>,
    /// Country code.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub status: TributeStatus,
    #[serde(default)]
    pub author: Option<TributeAuthor>,
    #[serde(default)]
    pub candles: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Tribute {
    /// Birth and death years, e.g. `1938 – 2026`.
    pub fn lifespan(&self) -> String {
        let year = |d: Option<DateTime<Utc>>| d.map(|d| d.year().to_string()).unwrap_or_else(|| "?".into());
        format!("{} – {}", year(self.date_of_birth), year(self.date_of_death))
    }

    /// Age at death in whole years, when both dates are known.
    pub fn age_at_death(&self) -> Option<u32> {
        let born = self.date_of_birth?.date_naive();
        let died = self.date_of_death?.date_naive();
        died.years_since(born)
    }
}

impl Resource for Tribute {
    const PATH: &'static str = "tributes";
    const COLLECTION_KEY: &'static str = "tributes";
    const SINGULAR_KEY: &'static str = "tribute";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tribute() -> Tribute {
        serde_json::from_str(
            r#"{"_id":"t1","deceasedName":"Ivan Horvat",
                "dateOfBirth":"1938-05-20T00:00:00.000Z","dateOfDeath":"2026-05-19T00:00:00.000Z",
                "status":"published","author":{"_id":"u1","firstName":"Ana","lastName":"Horvat"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize() {
        let tribute = tribute();
        assert_eq!(tribute.status, TributeStatus::Published);
        assert_eq!(tribute.author.map(|a| a.first_name), Some("Ana".to_string()));
    }

    #[test]
    fn test_lifespan_and_age() {
        let tribute = tribute();
        assert_eq!(tribute.lifespan(), "1938 – 2026");
        assert_eq!(tribute.age_at_death(), Some(87));

        let unknown = Tribute {
            date_of_birth: None,
            ..tribute
        };
        assert_eq!(unknown.lifespan(), "? – 2026");
        assert_eq!(unknown.age_at_death(), None);
    }
}
