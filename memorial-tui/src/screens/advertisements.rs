use chrono::Utc;
use memorial_grid::CellValue;
use memorial_grid::Column;
use memorial_grid::Record;
use memorial_grid::SearchKey;
use memorial_lib::model::AdStatus;
use memorial_lib::model::Advertisement;
use memorial_lib::model::localized;

use super::Listing;
use super::format_date;

pub struct Advertisements;

#[derive(Debug, Clone)]
pub struct AdvertisementRow {
    pub id: String,
    pub title: String,
    pub placement: String,
    pub status: &'static str,
    pub starts: Option<String>,
    pub ends: Option<String>,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: Option<f64>,
}

impl Record for AdvertisementRow {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "title" => CellValue::from(&self.title),
            "placement" => CellValue::from(&self.placement),
            "status" => CellValue::from(self.status),
            "starts" => CellValue::from(self.starts.as_ref()),
            "ends" => CellValue::from(self.ends.as_ref()),
            "impressions" => CellValue::from(self.impressions),
            "clicks" => CellValue::from(self.clicks),
            "ctr" => CellValue::from(self.ctr),
            _ => CellValue::Empty,
        }
    }
}

impl Listing for Advertisements {
    type Entity = Advertisement;
    type Row = AdvertisementRow;

    const TITLE: &'static str = "Ads";
    const NOUN: &'static str = "advertisement";

    /// Status is computed against the clock when the page arrives.
    fn row(ad: &Advertisement, lang: &str) -> AdvertisementRow {
        AdvertisementRow {
            id: ad.id.clone(),
            title: localized(&ad.title, lang).to_string(),
            placement: ad.placement.clone(),
            status: ad.status_at(Utc::now()).label(),
            starts: format_date(ad.starts_at),
            ends: format_date(ad.ends_at),
            impressions: ad.impressions,
            clicks: ad.clicks,
            ctr: ad.click_through_rate(),
        }
    }

    fn row_id(row: &AdvertisementRow) -> &str {
        &row.id
    }

    fn row_label(row: &AdvertisementRow) -> String {
        format!("\"{}\"", row.title)
    }

    fn columns() -> Vec<Column<AdvertisementRow>> {
        vec![
            Column::new("title", "Title"),
            Column::new("placement", "Placement"),
            Column::new("status", "Status").facets(AdStatus::LABELS),
            Column::new("starts", "Starts"),
            Column::new("ends", "Ends"),
            Column::new("impressions", "Views"),
            Column::new("clicks", "Clicks"),
            Column::new("ctr", "CTR").cell(|_, value| match value {
                CellValue::Float(rate) => format!("{:.1}%", rate),
                _ => "–".to_string(),
            }),
        ]
    }

    fn search_key() -> SearchKey {
        SearchKey::fields(["title", "placement"])
    }

    fn search_placeholder() -> &'static str {
        "Search ads by title or placement..."
    }
}

#[cfg(test)]
mod tests {
    use memorial_lib::model::LocalizedText;

    use super::*;

    #[test]
    fn test_ctr_cell() {
        let mut ad = Advertisement {
            id: "ad1".into(),
            title: vec![LocalizedText::new("en", "Flowers"), LocalizedText::new("de", "Blumen")],
            image_url: None,
            link_url: None,
            placement: "sidebar".into(),
            starts_at: None,
            ends_at: None,
            is_active: true,
            impressions: 200,
            clicks: 5,
        };
        let columns = Advertisements::columns();

        let row = Advertisements::row(&ad, "de");
        assert_eq!(row.title, "Blumen");
        assert_eq!(row.status, "Running");
        assert_eq!(columns[7].render_cell(&row), "2.5%");

        ad.impressions = 0;
        ad.is_active = false;
        let row = Advertisements::row(&ad, "en");
        assert_eq!(row.status, "Inactive");
        assert_eq!(columns[7].render_cell(&row), "–");
    }
}
