//! Paid advertisement banners

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::LocalizedText;
use super::Resource;
use super::default_true;

/// Where an advertisement stands at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdStatus {
    /// Switched off by an admin.
    Inactive,
    /// Active but its campaign has not started.
    Scheduled,
    Running,
    /// Active but its campaign has ended.
    Expired,
}

impl AdStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Scheduled => "Scheduled",
            Self::Running => "Running",
            Self::Expired => "Expired",
        }
    }

    pub const LABELS: [&'static str; 4] = ["Inactive", "Scheduled", "Running", "Expired"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: Vec<LocalizedText>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    /// Page slot, e.g. `home_top`, `sidebar`.
    #[serde(default)]
    pub placement: String,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
}

impl Advertisement {
    /// Campaign status at `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> AdStatus {
        if !self.is_active {
            AdStatus::Inactive
        } else if self.starts_at.is_some_and(|start| now < start) {
            AdStatus::Scheduled
        } else if self.ends_at.is_some_and(|end| now >= end) {
            AdStatus::Expired
        } else {
            AdStatus::Running
        }
    }

    /// Click-through rate in percent, `None` before the first impression.
    pub fn click_through_rate(&self) -> Option<f64> {
        (self.impressions > 0).then(|| self.clicks as f64 * 100.0 / self.impressions as f64)
    }
}

impl Resource for Advertisement {
    const PATH: &'static str = "advertisements";
    const COLLECTION_KEY: &'static str = "advertisements";
    const SINGULAR_KEY: &'static str = "advertisement";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ad() -> Advertisement {
        serde_json::from_str(
            r#"{"_id":"ad1","title":[{"lang":"en","value":"Flowers"}],"placement":"sidebar",
                "startsAt":"2026-01-01T00:00:00Z","endsAt":"2026-02-01T00:00:00Z",
                "impressions":200,"clicks":5}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_status_follows_campaign_dates() {
        let ad = ad();
        let at = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        assert_eq!(ad.status_at(at(2025, 12, 1)), AdStatus::Scheduled);
        assert_eq!(ad.status_at(at(2026, 1, 15)), AdStatus::Running);
        assert_eq!(ad.status_at(at(2026, 2, 1)), AdStatus::Expired);
    }

    #[test]
    fn test_inactive_wins() {
        let ad = Advertisement {
            is_active: false,
            ..ad()
        };
        assert_eq!(ad.status_at(Utc::now()), AdStatus::Inactive);
    }

    #[test]
    fn test_click_through_rate() {
        assert_eq!(ad().click_through_rate(), Some(2.5));
        let fresh = Advertisement {
            impressions: 0,
            ..ad()
        };
        assert_eq!(fresh.click_through_rate(), None);
    }
}
