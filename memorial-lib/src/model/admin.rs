//! Back office accounts

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Resource;
use super::default_true;

/// Permission level of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    #[default]
    Admin,
    Moderator,
    #[serde(other)]
    Unknown,
}

impl AdminRole {
    /// Human readable role name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super admin",
            Self::Admin => "Admin",
            Self::Moderator => "Moderator",
            Self::Unknown => "Unknown",
        }
    }

    pub const LABELS: [&'static str; 3] = ["Super admin", "Admin", "Moderator"];
}

/// A back office account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Admin {
    const PATH: &'static str = "admins";
    const COLLECTION_KEY: &'static str = "admins";
    const SINGULAR_KEY: &'static str = "admin";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let admin: Admin = serde_json::from_str(
            r#"{"_id":"a1","name":"Iva","email":"iva@example.com","role":"super_admin",
                "lastLoginAt":"2026-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(admin.id(), "a1");
        assert_eq!(admin.role, AdminRole::SuperAdmin);
        assert!(admin.is_active);
        assert!(admin.last_login_at.is_some());
    }

    #[test]
    fn test_unknown_role() {
        let admin: Admin =
            serde_json::from_str(r#"{"id":"a2","name":"X","email":"x@y.z","role":"auditor"}"#).unwrap();
        assert_eq!(admin.role, AdminRole::Unknown);
        assert_eq!(admin.role.label(), "Unknown");
    }
}
