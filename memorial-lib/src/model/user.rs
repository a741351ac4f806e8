//! Public site accounts

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Resource;

/// Account state derived from the verification and block flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Active,
    Unverified,
    Blocked,
}

impl UserStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Unverified => "Unverified",
            Self::Blocked => "Blocked",
        }
    }

    pub const LABELS: [&'static str; 3] = ["Active", "Unverified", "Blocked"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Country code.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default, alias = "tributeCount")]
    pub tributes_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// First and last name joined, or the email when both are blank.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    pub fn status(&self) -> UserStatus {
        if self.is_blocked {
            UserStatus::Blocked
        } else if !self.is_verified {
            UserStatus::Unverified
        } else {
            UserStatus::Active
        }
    }
}

impl Resource for User {
    const PATH: &'static str = "users";
    const COLLECTION_KEY: &'static str = "users";
    const SINGULAR_KEY: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}
